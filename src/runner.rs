//! Execution engine for collectors: sequential or partitioned across rayon.
//!
//! In parallel mode the input is split into contiguous partitions, each
//! partition is folded into its own accumulator on a rayon worker, and the
//! accumulators are merged in rounds. A round merges groups of at most
//! `fanout` adjacent accumulators, left to right, so encounter order
//! survives for order-sensitive reducers whatever the partitioning.

use crate::collector::Collector;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::{debug, instrument};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecMode {
    Sequential,
    Parallel {
        threads: Option<usize>,
        partitions: Option<usize>,
    },
}

#[derive(Clone, Debug)]
pub struct Runner {
    pub mode: ExecMode,
    pub default_partitions: usize,
    /// Most accumulators merged together per round; `None` merges all in one round.
    pub fanout: Option<usize>,
}

impl Default for Runner {
    fn default() -> Self {
        Self {
            mode: ExecMode::Parallel {
                threads: None,
                partitions: None,
            },
            default_partitions: 2 * num_cpus::get().max(2),
            fanout: None,
        }
    }
}

impl Runner {
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            mode: ExecMode::Sequential,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn parallel(threads: Option<usize>, partitions: Option<usize>) -> Self {
        Self {
            mode: ExecMode::Parallel {
                threads,
                partitions,
            },
            ..Default::default()
        }
    }

    /// Merge at most `fanout` accumulators per round (values below 2 act as 2).
    #[must_use]
    pub fn with_fanout(mut self, fanout: usize) -> Self {
        self.fanout = Some(fanout);
        self
    }

    /// Reduce `input` with `collector`.
    ///
    /// # Errors
    /// Errors from the collector, or from building a dedicated thread pool.
    #[instrument(level = "debug", skip_all, fields(mode = ?self.mode, elements = input.len()))]
    pub fn run<T, C>(&self, collector: &C, input: Vec<T>) -> Result<C::Output>
    where
        T: Send,
        C: Collector<T>,
        C::Acc: Send,
    {
        let acc = match self.mode {
            ExecMode::Sequential => collector.fold(input)?,
            ExecMode::Parallel {
                threads,
                partitions,
            } => {
                let parts = partitions.unwrap_or(self.default_partitions);
                let fanout = self.fanout;
                in_pool(threads, move || fold_partitioned(collector, input, parts, fanout))?
            }
        };
        Ok(collector.finish(acc))
    }

    /// Reduce each group of `(group, element)` pairs independently.
    ///
    /// Groups come back in no particular order.
    ///
    /// # Errors
    /// Errors from the collector, or from building a dedicated thread pool.
    #[instrument(level = "debug", skip_all, fields(mode = ?self.mode, elements = input.len()))]
    pub fn run_per_key<G, T, C>(&self, collector: &C, input: Vec<(G, T)>) -> Result<Vec<(G, C::Output)>>
    where
        G: Eq + Hash + Send,
        T: Send,
        C: Collector<T>,
        C::Acc: Send,
    {
        let groups = match self.mode {
            ExecMode::Sequential => fold_groups(collector, input)?,
            ExecMode::Parallel {
                threads,
                partitions,
            } => {
                let parts = partitions.unwrap_or(self.default_partitions);
                in_pool(threads, move || {
                    let chunks = split_vec(input, parts);
                    debug!(partitions = chunks.len(), "folding keyed partitions");
                    let maps = chunks
                        .into_par_iter()
                        .map(|chunk| fold_groups(collector, chunk))
                        .collect::<Result<Vec<_>>>()?;
                    merge_group_maps::<G, T, C>(collector, maps)
                })?
            }
        };
        debug!(groups = groups.len(), "finishing groups");
        Ok(groups
            .into_iter()
            .map(|(g, acc)| (g, collector.finish(acc)))
            .collect())
    }
}

/// Run `f` on a dedicated pool of `threads` workers, or on the global pool.
fn in_pool<R, F>(threads: Option<usize>, f: F) -> Result<R>
where
    R: Send,
    F: FnOnce() -> Result<R> + Send,
{
    match threads {
        Some(t) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(t)
                .build()
                .with_context(|| format!("building a rayon pool with {t} threads"))?;
            pool.install(f)
        }
        None => f(),
    }
}

fn fold_partitioned<T, C>(
    collector: &C,
    input: Vec<T>,
    partitions: usize,
    fanout: Option<usize>,
) -> Result<C::Acc>
where
    T: Send,
    C: Collector<T>,
    C::Acc: Send,
{
    let chunks = split_vec(input, partitions);
    debug!(partitions = chunks.len(), "folding partitions");
    let accs = chunks
        .into_par_iter()
        .map(|chunk| collector.fold(chunk))
        .collect::<Result<Vec<_>>>()?;
    merge_rounds::<T, C>(collector, accs, fanout)
}

/// Merge accumulators in rounds of adjacent groups until one is left.
fn merge_rounds<T, C>(collector: &C, mut accs: Vec<C::Acc>, fanout: Option<usize>) -> Result<C::Acc>
where
    C: Collector<T>,
    C::Acc: Send,
{
    let fanout = fanout.unwrap_or(usize::MAX).max(2);
    let mut round = 0usize;
    while accs.len() > 1 {
        round += 1;
        let groups = accs.len().div_ceil(fanout);
        debug!(round, accumulators = accs.len(), groups, "merge round");
        accs = split_vec(accs, groups)
            .into_par_iter()
            .map(|group| merge_all::<T, C>(collector, group))
            .collect::<Result<Vec<_>>>()?;
    }
    Ok(accs.pop().unwrap_or_else(|| collector.create()))
}

fn merge_all<T, C>(collector: &C, group: Vec<C::Acc>) -> Result<C::Acc>
where
    C: Collector<T>,
{
    let mut it = group.into_iter();
    let first = it.next().unwrap_or_else(|| collector.create());
    it.try_fold(first, |left, right| collector.merge(left, right))
}

fn fold_groups<G, T, C>(collector: &C, rows: Vec<(G, T)>) -> Result<HashMap<G, C::Acc>>
where
    G: Eq + Hash,
    C: Collector<T>,
{
    let mut map: HashMap<G, C::Acc> = HashMap::new();
    for (g, v) in rows {
        collector.add_input(map.entry(g).or_insert_with(|| collector.create()), v)?;
    }
    Ok(map)
}

/// Merge per-partition group maps; partitions arrive in encounter order.
fn merge_group_maps<G, T, C>(collector: &C, maps: Vec<HashMap<G, C::Acc>>) -> Result<HashMap<G, C::Acc>>
where
    G: Eq + Hash,
    C: Collector<T>,
{
    let mut merged: HashMap<G, C::Acc> = HashMap::new();
    for m in maps {
        for (g, acc) in m {
            let acc = match merged.remove(&g) {
                Some(left) => collector.merge(left, acc)?,
                None => acc,
            };
            merged.insert(g, acc);
        }
    }
    Ok(merged)
}

/// Split `v` into at most `n` contiguous chunks of near-equal size.
pub(crate) fn split_vec<T>(mut v: Vec<T>, n: usize) -> Vec<Vec<T>> {
    let len = v.len();
    let n = n.min(len);
    if n <= 1 {
        return vec![v];
    }
    let chunk = len.div_ceil(n);
    let mut out = Vec::with_capacity(n);
    // Peel chunks off the back so each split only moves one chunk.
    while v.len() > chunk {
        let at = ((v.len() - 1) / chunk) * chunk;
        out.push(v.split_off(at));
    }
    out.push(v);
    out.reverse();
    out
}
