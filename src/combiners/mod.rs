//! Built-in downstream reducers for first-rank collection.
//!
//! These are reusable implementations of [`CombineFn`](crate::reducer::CombineFn)
//! that the retained (tied-for-first) elements can be accumulated into:
//!
//! - [`ToVec<T>`] -- keep every winner, in encounter order.
//! - [`ToSet<T>`] -- keep distinct winners in a `HashSet` (unordered).
//! - [`ToBTreeSet<T>`] -- keep distinct winners sorted (unordered).
//! - [`Sum<T>`] -- add the winners up.
//! - [`DistinctCount<T>`] -- count distinct winners.
//!
//! [`Count`](crate::reducer::Count) lives next to the trait in [`reducer`](crate::reducer).
//!
//! # Examples
//! ```
//! use firstrank::*;
//! use firstrank::combiners::{ToSet, Sum};
//!
//! let winners = vec!["a", "b", "a"].into_iter()
//!     .first_rank(&FirstRank::collect_into(ToSet::new()))?;
//! assert_eq!(winners.len(), 1);
//!
//! let total = vec![3u32, 1, 1, 2].into_iter()
//!     .first_rank(&FirstRank::collect_into(Sum::<u32>::new()))?;
//! assert_eq!(total, 2);
//! # anyhow::Result::<()>::Ok(())
//! ```

mod basic;
mod collections;
mod distinct;

pub use basic::Sum;
pub use collections::{ToBTreeSet, ToSet, ToVec};
pub use distinct::DistinctCount;
