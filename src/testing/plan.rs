//! Partitioned runs with an explicit merge association.

use anyhow::Result;

use crate::collector::Collector;

/// How partial accumulators are associated when merged.
///
/// Every plan keeps partitions in their left-to-right input positions;
/// only the bracketing changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergePlan {
    /// `((p0 + p1) + p2) + p3`
    LeftFold,
    /// `p0 + (p1 + (p2 + p3))`
    RightFold,
    /// `(p0 + p1) + (p2 + p3)`, recursively halving.
    Balanced,
}

impl MergePlan {
    pub const ALL: [Self; 3] = [Self::LeftFold, Self::RightFold, Self::Balanced];
}

/// Fold each partition into its own accumulator, merge them following
/// `plan`, and finish.
///
/// # Errors
/// Errors from the collector.
pub fn run_partitioned<T, C>(collector: &C, partitions: Vec<Vec<T>>, plan: MergePlan) -> Result<C::Output>
where
    C: Collector<T>,
{
    let accs = partitions
        .into_iter()
        .map(|part| collector.fold(part))
        .collect::<Result<Vec<_>>>()?;
    let acc = merge_with_plan(collector, accs, plan)?;
    Ok(collector.finish(acc))
}

/// Merge `accs` (in encounter order) following `plan`.
///
/// # Errors
/// Errors from the collector.
pub fn merge_with_plan<T, C>(collector: &C, accs: Vec<C::Acc>, plan: MergePlan) -> Result<C::Acc>
where
    C: Collector<T>,
{
    match plan {
        MergePlan::LeftFold => {
            let mut it = accs.into_iter();
            let first = it.next().unwrap_or_else(|| collector.create());
            it.try_fold(first, |left, right| collector.merge(left, right))
        }
        MergePlan::RightFold => {
            let mut it = accs.into_iter().rev();
            let last = it.next().unwrap_or_else(|| collector.create());
            it.try_fold(last, |right, left| collector.merge(left, right))
        }
        MergePlan::Balanced => balanced(collector, accs),
    }
}

fn balanced<T, C>(collector: &C, mut accs: Vec<C::Acc>) -> Result<C::Acc>
where
    C: Collector<T>,
{
    match accs.len() {
        0 => Ok(collector.create()),
        1 => Ok(accs.remove(0)),
        n => {
            let right = accs.split_off(n / 2);
            let left = balanced::<T, C>(collector, accs)?;
            let right = balanced::<T, C>(collector, right)?;
            collector.merge(left, right)
        }
    }
}

/// Cut `data` into pieces at the given ascending offsets.
///
/// ```
/// use firstrank::testing::split_at_offsets;
///
/// let parts = split_at_offsets(vec![1, 2, 3, 4, 5], &[1, 3]);
/// assert_eq!(parts, vec![vec![1], vec![2, 3], vec![4, 5]]);
/// ```
#[must_use]
pub fn split_at_offsets<T>(mut data: Vec<T>, offsets: &[usize]) -> Vec<Vec<T>> {
    let mut out = Vec::with_capacity(offsets.len() + 1);
    for &at in offsets.iter().rev() {
        let at = at.min(data.len());
        out.push(data.split_off(at));
    }
    out.push(data);
    out.reverse();
    out
}
