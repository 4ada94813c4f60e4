//! Comparison rules and rank direction.
//!
//! A [`Ranking<K>`] is the ordering the first-rank collector uses to decide
//! which keys rank first: keys that compare [`Ordering::Less`] rank better.
//! Rules are fallible (`Fn(&K, &K) -> Result<Ordering>`) so that a rule may
//! reject inputs it cannot order, such as a missing key or a NaN. Such
//! errors surface unchanged from the collector.
//!
//! [`Direction`] picks whether the smallest or the largest keys win by
//! wrapping the same rule as-is or reversed.
//!
//! # Missing keys
//! The collector has no opinion on missing values. If keys are `Option<T>`,
//! pick one of [`Ranking::nulls_first`], [`Ranking::nulls_last`] or
//! [`Ranking::non_null`]; the natural `Ord` of `Option` (which also puts
//! `None` first) works as well.

use anyhow::{Result, anyhow, bail};
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A boxed comparison function.
pub type CompareFn<K> = Arc<dyn Fn(&K, &K) -> Result<Ordering> + Send + Sync>;

/// An ordering over keys `K`. Smaller ranks first.
pub struct Ranking<K> {
    cmp: CompareFn<K>,
}

impl<K> Clone for Ranking<K> {
    fn clone(&self) -> Self {
        Self {
            cmp: Arc::clone(&self.cmp),
        }
    }
}

impl<K> fmt::Debug for Ranking<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ranking").finish_non_exhaustive()
    }
}

impl<K: Ord + 'static> Default for Ranking<K> {
    fn default() -> Self {
        Self::natural()
    }
}

impl<K: 'static> Ranking<K> {
    /// The natural `Ord` order of `K`.
    #[must_use]
    pub fn natural() -> Self
    where
        K: Ord,
    {
        Self::by(K::cmp)
    }

    /// An infallible comparison function.
    pub fn by<F>(f: F) -> Self
    where
        F: Fn(&K, &K) -> Ordering + Send + Sync + 'static,
    {
        Self {
            cmp: Arc::new(move |a: &K, b: &K| -> Result<Ordering> { Ok(f(a, b)) }),
        }
    }

    /// A comparison function that may fail.
    pub fn try_by<F>(f: F) -> Self
    where
        F: Fn(&K, &K) -> Result<Ordering> + Send + Sync + 'static,
    {
        Self { cmp: Arc::new(f) }
    }

    /// Compare by the natural order of a projection of `K`.
    ///
    /// ```
    /// use firstrank::Ranking;
    /// use std::cmp::Ordering;
    ///
    /// let upper_last = Ranking::by_key(|c: &char| c.is_uppercase());
    /// assert_eq!(upper_last.compare(&'b', &'A')?, Ordering::Less);
    /// # anyhow::Result::<()>::Ok(())
    /// ```
    pub fn by_key<Q, F>(f: F) -> Self
    where
        Q: Ord,
        F: Fn(&K) -> Q + Send + Sync + 'static,
    {
        Self::by(move |a, b| f(a).cmp(&f(b)))
    }

    /// A `PartialOrd` order. Incomparable pairs (e.g. NaN) are an error.
    #[must_use]
    pub fn partial() -> Self
    where
        K: PartialOrd + fmt::Debug,
    {
        Self::try_by(|a: &K, b: &K| {
            a.partial_cmp(b)
                .ok_or_else(|| anyhow!("cannot rank incomparable keys {a:?} and {b:?}"))
        })
    }

    /// The rule with its sense flipped.
    #[must_use]
    pub fn reversed(self) -> Self {
        let cmp = self.cmp;
        Self {
            cmp: Arc::new(move |a: &K, b: &K| cmp(b, a)),
        }
    }

    /// Break ties of `self` with `next`.
    #[must_use]
    pub fn then(self, next: Self) -> Self {
        let first = self.cmp;
        let second = next.cmp;
        Self {
            cmp: Arc::new(move |a: &K, b: &K| match first(a, b)? {
                Ordering::Equal => second(a, b),
                ord => Ok(ord),
            }),
        }
    }

    /// Compare two keys.
    ///
    /// # Errors
    /// Whatever the underlying rule returns.
    #[inline]
    pub fn compare(&self, a: &K, b: &K) -> Result<Ordering> {
        (self.cmp)(a, b)
    }
}

impl Ranking<f64> {
    /// `OrderedFloat` order over `f64`: NaN sorts after every number, all
    /// NaNs tie, and `-0.0` ties with `0.0`.
    #[must_use]
    pub fn total_f64() -> Self {
        Self::by(|a: &f64, b: &f64| OrderedFloat(*a).cmp(&OrderedFloat(*b)))
    }
}

impl<T: 'static> Ranking<Option<T>> {
    /// `None` ranks before every `Some`; `Some` values use `inner`.
    #[must_use]
    pub fn nulls_first(inner: Ranking<T>) -> Self {
        Self::try_by(move |a, b| match (a, b) {
            (None, None) => Ok(Ordering::Equal),
            (None, Some(_)) => Ok(Ordering::Less),
            (Some(_), None) => Ok(Ordering::Greater),
            (Some(a), Some(b)) => inner.compare(a, b),
        })
    }

    /// `None` ranks after every `Some`; `Some` values use `inner`.
    #[must_use]
    pub fn nulls_last(inner: Ranking<T>) -> Self {
        Self::try_by(move |a, b| match (a, b) {
            (None, None) => Ok(Ordering::Equal),
            (None, Some(_)) => Ok(Ordering::Greater),
            (Some(_), None) => Ok(Ordering::Less),
            (Some(a), Some(b)) => inner.compare(a, b),
        })
    }

    /// Rank `Some` values with `inner` and fail on any `None`.
    #[must_use]
    pub fn non_null(inner: Ranking<T>) -> Self {
        Self::try_by(move |a, b| match (a, b) {
            (Some(a), Some(b)) => inner.compare(a, b),
            _ => bail!("cannot rank a missing key"),
        })
    }
}

/// Which end of the order counts as first rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Collect the elements tied for the smallest key.
    #[default]
    Min,
    /// Collect the elements tied for the largest key.
    Max,
}

impl Direction {
    /// Orient `ranking` so that first rank means this direction.
    #[must_use]
    pub fn apply<K: 'static>(self, ranking: Ranking<K>) -> Ranking<K> {
        match self {
            Self::Min => ranking,
            Self::Max => ranking.reversed(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Min => f.write_str("min"),
            Self::Max => f.write_str("max"),
        }
    }
}
