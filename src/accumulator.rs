//! Per-scan state of a first-rank reduction.

/// The best key seen so far and the downstream container holding every
/// element tied for it.
///
/// A `RankAccumulator` is created by [`Collector::create`](crate::Collector::create),
/// fed by `add_input`, combined by `merge` and consumed by `finish`. It has
/// exactly one owner at a time: `merge` and `finish` take it by value.
///
/// `key` is `None` until the first element arrives. Because keys may
/// themselves be optional, "nothing collected" is `key == None` while
/// "collected an element whose key is missing" is `key == Some(None)`.
#[derive(Debug)]
pub struct RankAccumulator<K, A> {
    pub(crate) container: A,
    pub(crate) key: Option<K>,
}

impl<K, A> RankAccumulator<K, A> {
    pub(crate) const fn new(container: A) -> Self {
        Self {
            container,
            key: None,
        }
    }

    /// Whether at least one element has been retained.
    #[must_use]
    pub const fn has_collected(&self) -> bool {
        self.key.is_some()
    }

    /// The key every retained element ties on, if any element was seen.
    #[must_use]
    pub const fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    /// The downstream container in its current state.
    #[must_use]
    pub const fn container(&self) -> &A {
        &self.container
    }

    /// Split into the winning key and the downstream container.
    #[must_use]
    pub fn into_parts(self) -> (Option<K>, A) {
        (self.key, self.container)
    }
}
