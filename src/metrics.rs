//! Operation counters for first-rank reductions.
//!
//! Attach a [`RankMetrics`] to a collector with
//! [`FirstRank::with_metrics`](crate::FirstRank::with_metrics) to see how much
//! work a reduction did. For `n` input elements of which `m` tie for first
//! rank, a reduction performs `n` classifications, `n - 1` comparisons and
//! between `m` and `n` downstream adds.
//!
//! Counters are atomics, so one `RankMetrics` can be shared by every
//! partition of a parallel run.
//!
//! # Example
//!
//! ```
//! use firstrank::*;
//! use firstrank::metrics::RankMetrics;
//! use std::sync::Arc;
//!
//! # fn main() -> anyhow::Result<()> {
//! let metrics = Arc::new(RankMetrics::new());
//! let collector = FirstRank::natural().with_metrics(Arc::clone(&metrics));
//!
//! let winners = vec![3, 2, 2].into_iter().first_rank(&collector)?;
//! assert_eq!(winners, vec![2, 2]);
//!
//! let stats = metrics.snapshot();
//! assert_eq!(stats.classifications, 3);
//! assert_eq!(stats.comparisons, 2);
//! assert_eq!(stats.container_resets, 1);
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing the work done by a reduction.
#[derive(Debug, Default)]
pub struct RankMetrics {
    classifications: AtomicU64,
    comparisons: AtomicU64,
    downstream_adds: AtomicU64,
    container_resets: AtomicU64,
    discarded: AtomicU64,
    merges: AtomicU64,
    container_merges: AtomicU64,
}

/// A point-in-time copy of [`RankMetrics`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Keys computed from elements.
    pub classifications: u64,
    /// Calls to the comparison rule while adding elements.
    pub comparisons: u64,
    /// Elements handed to the downstream reducer.
    pub downstream_adds: u64,
    /// Containers thrown away because a strictly better element arrived.
    pub container_resets: u64,
    /// Elements dropped because they ranked worse than the current best.
    pub discarded: u64,
    /// Accumulator merges, including trivial ones with an empty side.
    pub merges: u64,
    /// Merges that tied and combined both downstream containers.
    pub container_merges: u64,
}

impl RankMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn classified(&self) {
        self.classifications.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn compared(&self) {
        self.comparisons.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn added(&self) {
        self.downstream_adds.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn reset(&self) {
        self.container_resets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn discarded(&self) {
        self.discarded.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn merged(&self, combined_containers: bool) {
        self.merges.fetch_add(1, Ordering::Relaxed);
        if combined_containers {
            self.container_merges.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Copy the current counter values.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            classifications: self.classifications.load(Ordering::Relaxed),
            comparisons: self.comparisons.load(Ordering::Relaxed),
            downstream_adds: self.downstream_adds.load(Ordering::Relaxed),
            container_resets: self.container_resets.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
            merges: self.merges.load(Ordering::Relaxed),
            container_merges: self.container_merges.load(Ordering::Relaxed),
        }
    }

    /// Zero every counter.
    pub fn clear(&self) {
        for counter in [
            &self.classifications,
            &self.comparisons,
            &self.downstream_adds,
            &self.container_resets,
            &self.discarded,
            &self.merges,
            &self.container_merges,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

#[cfg(feature = "metrics")]
mod report {
    use super::{MetricsSnapshot, RankMetrics};
    use anyhow::{Context, Result};
    use serde_json::{Map, Value, json};
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;

    impl RankMetrics {
        /// All counters as a JSON object.
        #[must_use]
        pub fn to_json(&self) -> Value {
            let counters: Map<String, Value> = self
                .snapshot()
                .rows()
                .into_iter()
                .map(|(name, value)| (name.to_string(), json!(value)))
                .collect();
            Value::Object(counters)
        }

        /// Print all counters to stdout in a human-readable format.
        pub fn print(&self) {
            let s = self.snapshot();
            println!("\n========== First-Rank Metrics ==========");
            for (name, value) in s.rows() {
                println!("{name}: {value}");
            }
            println!("========================================\n");
        }

        /// Save all counters to a JSON file.
        ///
        /// # Errors
        ///
        /// Returns an error if the file cannot be created or written to.
        pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
            let path = path.as_ref();
            let formatted = serde_json::to_string_pretty(&self.snapshot())?;
            let mut file =
                File::create(path).with_context(|| format!("create {}", path.display()))?;
            file.write_all(formatted.as_bytes())
                .with_context(|| format!("write {}", path.display()))?;
            Ok(())
        }
    }

    impl MetricsSnapshot {
        fn rows(&self) -> [(&'static str, u64); 7] {
            [
                ("classifications", self.classifications),
                ("comparisons", self.comparisons),
                ("container_merges", self.container_merges),
                ("container_resets", self.container_resets),
                ("discarded", self.discarded),
                ("downstream_adds", self.downstream_adds),
                ("merges", self.merges),
            ]
        }
    }
}
