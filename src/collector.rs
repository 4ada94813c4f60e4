//! The first-rank collector.
//!
//! [`FirstRank`] keeps only the elements tied for first rank under a
//! [`Ranking`], feeding each of them into a downstream [`CombineFn`]. The
//! input does not need to be sorted. For an input of `n` elements with `m`
//! winners it classifies every element once, compares `n - 1` times and
//! makes between `m` and `n` downstream adds.
//!
//! ```
//! use firstrank::*;
//!
//! let winners = vec!["b", "a", "a"].into_iter().first_rank(&FirstRank::natural())?;
//! assert_eq!(winners, vec!["a", "a"]);
//!
//! let longest = vec!["a", "ccc", "bb", "ddd"]
//!     .into_iter()
//!     .first_rank(&Direction::Max.classify_by(|s: &&str| s.len(), Ranking::natural(), ToVec::new()))?;
//! assert_eq!(longest, vec!["ccc", "ddd"]);
//! # anyhow::Result::<()>::Ok(())
//! ```
//!
//! The downstream reducer may see containers that are created and then
//! dropped without being merged or finished: whenever a strictly better
//! element arrives, the current container is replaced by a fresh one.

use anyhow::Result;
use std::cmp::Ordering;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::accumulator::RankAccumulator;
use crate::combiners::ToVec;
use crate::metrics::RankMetrics;
use crate::ranking::{Direction, Ranking};
use crate::reducer::{CombineFn, OrderSensitivity};

/// Maps an element to the key it is ranked by.
pub type Classifier<T, K> = Arc<dyn Fn(&T) -> Result<K> + Send + Sync>;

/// A fallible, mergeable reduction over elements `T`.
///
/// This is the contract the [`Runner`](crate::Runner) and the iterator
/// extensions drive: one accumulator per partition, `add_input` per
/// element, `merge` to combine partitions left to right, `finish` once.
pub trait Collector<T>: Send + Sync {
    type Acc;
    type Output;

    fn create(&self) -> Self::Acc;

    /// Feed one element.
    ///
    /// # Errors
    /// Errors from user-supplied classifiers or comparison rules.
    fn add_input(&self, acc: &mut Self::Acc, v: T) -> Result<()>;

    /// Combine two accumulators; `left` holds the elements encountered first.
    ///
    /// # Errors
    /// Errors from user-supplied comparison rules.
    fn merge(&self, left: Self::Acc, right: Self::Acc) -> Result<Self::Acc>;

    fn finish(&self, acc: Self::Acc) -> Self::Output;

    fn order(&self) -> OrderSensitivity {
        OrderSensitivity::Ordered
    }

    /// Feed every element of `iter` into a fresh accumulator.
    ///
    /// # Errors
    /// The first error returned by [`add_input`](Collector::add_input).
    fn fold<I>(&self, iter: I) -> Result<Self::Acc>
    where
        I: IntoIterator<Item = T>,
        Self: Sized,
    {
        let mut acc = self.create();
        for v in iter {
            self.add_input(&mut acc, v)?;
        }
        Ok(acc)
    }
}

/// Collects every element tied for first rank into a downstream reducer.
///
/// - `T`: element type
/// - `K`: key the elements are ranked by (`T` itself unless a classifier is given)
/// - `C`, `A`, `O`: the downstream [`CombineFn`], its container and its output
pub struct FirstRank<T, K, C, A, O> {
    classifier: Classifier<T, K>,
    ranking: Ranking<K>,
    downstream: C,
    metrics: Option<Arc<RankMetrics>>,
    _m: PhantomData<fn(T, A) -> O>,
}

impl<T> FirstRank<T, T, ToVec<T>, Vec<T>, Vec<T>>
where
    T: Clone + 'static,
{
    /// Smallest elements by natural order, collected into a `Vec`.
    #[must_use]
    pub fn natural() -> Self
    where
        T: Ord,
    {
        Self::new(ToVec::new(), Ranking::natural())
    }

    /// Elements ranked first by `ranking`, collected into a `Vec`.
    #[must_use]
    pub fn compare_by(ranking: Ranking<T>) -> Self {
        Self::new(ToVec::new(), ranking)
    }
}

impl<T, C, A, O> FirstRank<T, T, C, A, O>
where
    T: Clone + 'static,
    C: CombineFn<T, A, O>,
{
    /// Elements ranked first by `ranking`, collected into `downstream`.
    ///
    /// Elements are their own keys; the current best element is cloned to
    /// keep as the key. Use [`classify_by`](Self::classify_by) to rank by a
    /// cheaper projection.
    pub fn new(downstream: C, ranking: Ranking<T>) -> Self {
        Self::classify_by(T::clone, ranking, downstream)
    }

    /// Smallest elements by natural order, collected into `downstream`.
    pub fn collect_into(downstream: C) -> Self
    where
        T: Ord,
    {
        Self::new(downstream, Ranking::natural())
    }
}

impl<T, K, C, A, O> FirstRank<T, K, C, A, O>
where
    T: 'static,
    K: 'static,
    C: CombineFn<T, A, O>,
{
    /// Rank elements by `classifier(element)` under `ranking`.
    pub fn classify_by<F>(classifier: F, ranking: Ranking<K>, downstream: C) -> Self
    where
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        Self::try_classify_by(move |t: &T| Ok(classifier(t)), ranking, downstream)
    }

    /// Like [`classify_by`](Self::classify_by) with a classifier that may fail.
    pub fn try_classify_by<F>(classifier: F, ranking: Ranking<K>, downstream: C) -> Self
    where
        F: Fn(&T) -> Result<K> + Send + Sync + 'static,
    {
        Self {
            classifier: Arc::new(classifier),
            ranking,
            downstream,
            metrics: None,
            _m: PhantomData,
        }
    }

    /// Count classifications, comparisons and container churn into `metrics`.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<RankMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Report the winning key alongside the downstream result.
    #[must_use]
    pub fn with_key(self) -> KeyedFirstRank<T, K, C, A, O> {
        KeyedFirstRank(self)
    }

    #[must_use]
    pub const fn ranking(&self) -> &Ranking<K> {
        &self.ranking
    }

    #[must_use]
    pub const fn downstream(&self) -> &C {
        &self.downstream
    }

    fn note(&self, record: impl FnOnce(&RankMetrics)) {
        if let Some(metrics) = &self.metrics {
            record(metrics);
        }
    }
}

impl<T, K, C, A, O> Collector<T> for FirstRank<T, K, C, A, O>
where
    T: 'static,
    K: 'static,
    C: CombineFn<T, A, O>,
{
    type Acc = RankAccumulator<K, A>;
    type Output = O;

    fn create(&self) -> Self::Acc {
        RankAccumulator::new(self.downstream.create())
    }

    fn add_input(&self, acc: &mut Self::Acc, v: T) -> Result<()> {
        let key = (self.classifier)(&v)?;
        self.note(RankMetrics::classified);

        let Some(current) = acc.key.as_ref() else {
            self.downstream.add_input(&mut acc.container, v);
            acc.key = Some(key);
            self.note(RankMetrics::added);
            return Ok(());
        };

        let ord = self.ranking.compare(current, &key)?;
        self.note(RankMetrics::compared);
        match ord {
            Ordering::Equal => {
                self.downstream.add_input(&mut acc.container, v);
                self.note(RankMetrics::added);
            }
            Ordering::Less => self.note(RankMetrics::discarded),
            Ordering::Greater => {
                // The old container is dropped unfinished.
                acc.container = self.downstream.create();
                self.downstream.add_input(&mut acc.container, v);
                acc.key = Some(key);
                self.note(RankMetrics::reset);
                self.note(RankMetrics::added);
            }
        }
        Ok(())
    }

    fn merge(&self, mut left: Self::Acc, right: Self::Acc) -> Result<Self::Acc> {
        let ord = match (left.key.as_ref(), right.key.as_ref()) {
            (_, None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(l), Some(r)) => self.ranking.compare(l, r)?,
        };
        self.note(|m| m.merged(ord == Ordering::Equal));
        Ok(match ord {
            Ordering::Less => left,
            Ordering::Greater => right,
            Ordering::Equal => {
                self.downstream.merge(&mut left.container, right.container);
                left
            }
        })
    }

    fn finish(&self, acc: Self::Acc) -> O {
        self.downstream.finish(acc.container)
    }

    fn order(&self) -> OrderSensitivity {
        self.downstream.order()
    }
}

/// A [`FirstRank`] whose result also carries the winning key.
///
/// The output is `(key, result)`; `key` is `None` for an empty input.
///
/// ```
/// use firstrank::*;
///
/// let collector = FirstRank::classify_by(|s: &&str| s.len(), Ranking::natural(), ToVec::new())
///     .with_key();
/// let (key, winners) = vec!["a", "aa", "b", "bb", "a"].into_iter().first_rank(&collector)?;
/// assert_eq!(key, Some(1));
/// assert_eq!(winners, vec!["a", "b", "a"]);
/// # anyhow::Result::<()>::Ok(())
/// ```
pub struct KeyedFirstRank<T, K, C, A, O>(FirstRank<T, K, C, A, O>);

impl<T, K, C, A, O> KeyedFirstRank<T, K, C, A, O> {
    #[must_use]
    pub fn into_inner(self) -> FirstRank<T, K, C, A, O> {
        self.0
    }
}

impl<T, K, C, A, O> Collector<T> for KeyedFirstRank<T, K, C, A, O>
where
    T: 'static,
    K: 'static,
    C: CombineFn<T, A, O>,
{
    type Acc = RankAccumulator<K, A>;
    type Output = (Option<K>, O);

    fn create(&self) -> Self::Acc {
        self.0.create()
    }

    fn add_input(&self, acc: &mut Self::Acc, v: T) -> Result<()> {
        self.0.add_input(acc, v)
    }

    fn merge(&self, left: Self::Acc, right: Self::Acc) -> Result<Self::Acc> {
        self.0.merge(left, right)
    }

    fn finish(&self, acc: Self::Acc) -> Self::Output {
        let (key, container) = acc.into_parts();
        (key, self.0.downstream.finish(container))
    }

    fn order(&self) -> OrderSensitivity {
        self.0.order()
    }
}

/// Direction-first construction, e.g. `Direction::Max.by_natural_order()`.
impl Direction {
    /// Winners by natural order, collected into a `Vec`.
    #[must_use]
    pub fn by_natural_order<T>(self) -> FirstRank<T, T, ToVec<T>, Vec<T>, Vec<T>>
    where
        T: Ord + Clone + 'static,
    {
        FirstRank::compare_by(self.apply(Ranking::natural()))
    }

    /// Winners by `ranking`, collected into a `Vec`.
    #[must_use]
    pub fn compare_by<T>(self, ranking: Ranking<T>) -> FirstRank<T, T, ToVec<T>, Vec<T>, Vec<T>>
    where
        T: Clone + 'static,
    {
        FirstRank::compare_by(self.apply(ranking))
    }

    /// Winners by natural order, collected into `downstream`.
    pub fn collect_into<T, C, A, O>(self, downstream: C) -> FirstRank<T, T, C, A, O>
    where
        T: Ord + Clone + 'static,
        C: CombineFn<T, A, O>,
    {
        FirstRank::new(downstream, self.apply(Ranking::natural()))
    }

    /// Winners by `ranking`, collected into `downstream`.
    pub fn compare_by_then_collect_into<T, C, A, O>(
        self,
        ranking: Ranking<T>,
        downstream: C,
    ) -> FirstRank<T, T, C, A, O>
    where
        T: Clone + 'static,
        C: CombineFn<T, A, O>,
    {
        FirstRank::new(downstream, self.apply(ranking))
    }

    /// Winners by `ranking` over `classifier(element)`, collected into `downstream`.
    pub fn classify_by<T, K, C, A, O, F>(
        self,
        classifier: F,
        ranking: Ranking<K>,
        downstream: C,
    ) -> FirstRank<T, K, C, A, O>
    where
        T: 'static,
        K: 'static,
        C: CombineFn<T, A, O>,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        FirstRank::classify_by(classifier, self.apply(ranking), downstream)
    }
}

/// Shorthand for [`Direction::Min`]: collect every element tied for the minimum.
#[must_use]
pub const fn multi_min() -> Direction {
    Direction::Min
}

/// Shorthand for [`Direction::Max`]: collect every element tied for the maximum.
#[must_use]
pub const fn multi_max() -> Direction {
    Direction::Max
}
