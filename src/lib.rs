//! # firstrank
//!
//! Collect **every element tied for first rank** (all the minimums, or all the
//! maximums) in a single pass over unsorted input, feeding the winners into a
//! downstream reducer of your choice. Partial results from partitions merge
//! associatively, so the same reduction runs sequentially or in parallel.
//!
//! ## Key Features
//!
//! - **One pass, no sorting** - `n` classifications, `n - 1` comparisons
//! - **Pluggable downstream** - collect winners into a `Vec`, a set, a count, a sum, or any [`CombineFn`]
//! - **Pluggable ranking** - natural order, custom comparators, key projections, min or max
//! - **Explicit merge** - combine partition results in any association
//! - **Sequential and parallel execution** - via [`Runner`] or rayon parallel iterators
//!
//! ## Quick Start
//!
//! ```
//! use firstrank::*;
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! // All smallest elements, in encounter order.
//! let winners = vec!["b", "a", "a"].into_iter().first_rank(&FirstRank::natural())?;
//! assert_eq!(winners, vec!["a", "a"]);
//!
//! // Count the smallest elements.
//! let count = vec![3, 2, 2].into_iter().first_rank(&FirstRank::collect_into(Count))?;
//! assert_eq!(count, 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Ranking
//!
//! A [`Ranking<K>`] orders keys; keys comparing `Less` rank first. Rules may
//! fail (see [`Ranking::non_null`] or [`Ranking::partial`]) and their errors
//! reach the caller unchanged. [`Direction`] chooses min-ties or max-ties by
//! using a rule as-is or reversed.
//!
//! ### Downstream reducers
//!
//! The [`CombineFn`] trait is the create/add/merge/finish contract for what
//! the winners are accumulated into. See [`combiners`] for the built-ins and
//! [`reducer::FnCombiner`] to build one from closures.
//!
//! ### Collectors
//!
//! [`FirstRank`] implements [`Collector`]: `create`, `add_input`, `merge`,
//! `finish`. [`FirstRank::with_key`] also reports the winning key.
//!
//! ```
//! use firstrank::*;
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! let collector = FirstRank::classify_by(|s: &&str| s.len(), Ranking::natural(), ToVec::new())
//!     .with_key();
//! let (len, shortest) = vec!["a", "aa", "b", "bb", "a"].into_iter().first_rank(&collector)?;
//! assert_eq!(len, Some(1));
//! assert_eq!(shortest, vec!["a", "b", "a"]);
//! # Ok(())
//! # }
//! ```
//!
//! ### Execution Modes
//!
//! - **Sequential** - [`FirstRankExt::first_rank`] or [`Runner::sequential`]
//! - **Parallel** - [`ParFirstRankExt::par_first_rank`] or [`Runner::parallel`]
//!
//! Both produce the same result, including the order of tied winners.
//!
//! ## Module Overview
//!
//! - [`reducer`] - Downstream reducer contract
//! - [`combiners`] - Built-in downstream reducers
//! - [`ranking`] - Comparison rules and direction
//! - [`accumulator`] - Per-partition state
//! - [`collector`] - The first-rank collector and its merge
//! - [`runner`] - Sequential and partitioned execution
//! - [`extensions`] - Iterator and parallel-iterator adapters
//! - [`metrics`] - Operation counters
//! - [`testing`] - Assertions and merge-plan drivers for tests

pub mod accumulator;
pub mod collector;
pub mod combiners;
pub mod extensions;
pub mod metrics;
pub mod ranking;
pub mod reducer;
pub mod runner;
pub mod testing;

// General re-exports
pub use accumulator::RankAccumulator;
pub use collector::{Classifier, Collector, FirstRank, KeyedFirstRank, multi_max, multi_min};
pub use combiners::{DistinctCount, Sum, ToBTreeSet, ToSet, ToVec};
pub use extensions::{FirstRankExt, ParFirstRankExt};
pub use metrics::{MetricsSnapshot, RankMetrics};
pub use ranking::{Direction, Ranking};
pub use reducer::{CombineFn, Count, OrderSensitivity};
pub use runner::{ExecMode, Runner};
