//! Testing utilities for first-rank reductions.
//!
//! - **Assertions**: compare results in order or as multisets
//! - **Merge plans**: drive a collector over hand-made partitions and
//!   merge the partial accumulators in a chosen association, the way a
//!   parallel engine would
//!
//! # Quick Start
//!
//! ```
//! use firstrank::*;
//! use firstrank::testing::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let collector = FirstRank::natural();
//! let parts = vec![vec![3, 1], vec![2, 1], vec![1]];
//!
//! for plan in MergePlan::ALL {
//!     let out = run_partitioned(&collector, parts.clone(), plan)?;
//!     assert_collections_equal(&out, &[1, 1, 1]);
//! }
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod plan;

pub use assertions::*;
pub use plan::*;
