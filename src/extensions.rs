//! Extension traits that run a [`Collector`] over iterators.
//!
//! - [`FirstRankExt`]: any `Iterator`, one sequential pass.
//! - [`ParFirstRankExt`]: any rayon `ParallelIterator`, folded per split
//!   and merged in encounter order.
//!
//! ```
//! use firstrank::*;
//! use rayon::prelude::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let data: Vec<u32> = (0..10_000).map(|i| (i * 7919) % 1000).collect();
//!
//! let seq = data.iter().copied().first_rank(&FirstRank::natural())?;
//! let par = data.par_iter().copied().par_first_rank(&FirstRank::natural())?;
//! assert_eq!(seq, par);
//! assert_eq!(seq, vec![0; 10]);
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use rayon::iter::ParallelIterator;

use crate::collector::Collector;

/// Sequential first-rank collection for iterators.
pub trait FirstRankExt: Iterator + Sized {
    /// Run `collector` over every element of this iterator.
    ///
    /// # Errors
    /// The first error returned by the collector's classifier or ranking.
    fn first_rank<C>(self, collector: &C) -> Result<C::Output>
    where
        C: Collector<Self::Item>,
    {
        let acc = collector.fold(self)?;
        Ok(collector.finish(acc))
    }
}

impl<I: Iterator> FirstRankExt for I {}

/// Parallel first-rank collection for rayon iterators.
///
/// Each rayon split gets its own accumulator; splits are merged pairwise
/// with left/right preserved, so an order-sensitive downstream sees the
/// winners in encounter order.
pub trait ParFirstRankExt: ParallelIterator {
    /// Run `collector` over every element of this parallel iterator.
    ///
    /// # Errors
    /// An error returned by the collector's classifier or ranking. Which
    /// error is reported is unspecified when several splits fail.
    fn par_first_rank<C>(self, collector: &C) -> Result<C::Output>
    where
        C: Collector<Self::Item>,
        C::Acc: Send,
    {
        let acc = self
            .try_fold(
                || collector.create(),
                |mut acc, v| {
                    collector.add_input(&mut acc, v)?;
                    Ok::<_, anyhow::Error>(acc)
                },
            )
            .try_reduce(|| collector.create(), |left, right| collector.merge(left, right))?;
        Ok(collector.finish(acc))
    }
}

impl<P: ParallelIterator> ParFirstRankExt for P {}
