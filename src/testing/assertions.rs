//! Assertion functions for comparing reduction results.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Assert that two collections are equal in order and content.
///
/// # Panics
///
/// Panics if the collections differ in length or content.
///
/// # Example
///
/// ```
/// use firstrank::testing::assert_collections_equal;
///
/// assert_collections_equal(&["a", "a"], &["a", "a"]);
/// ```
pub fn assert_collections_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "Collection mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  Full expected: {expected:?}\n  Full actual: {actual:?}"
        );
    }
}

/// Assert that two collections hold the same elements with the same
/// multiplicities, ignoring order.
///
/// # Panics
///
/// Panics if any element occurs a different number of times in each.
///
/// # Example
///
/// ```
/// use firstrank::testing::assert_collections_unordered_equal;
///
/// assert_collections_unordered_equal(&[2, 1, 2], &[1, 2, 2]);
/// ```
pub fn assert_collections_unordered_equal<T: Debug + Eq + Hash>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    let actual_counts = counts(actual);
    let expected_counts = counts(expected);
    if actual_counts != expected_counts {
        let missing: Vec<_> = expected_counts
            .iter()
            .filter(|(k, n)| actual_counts.get(*k) != Some(*n))
            .map(|(k, _)| *k)
            .collect();
        let extra: Vec<_> = actual_counts
            .keys()
            .filter(|k| !expected_counts.contains_key(*k))
            .copied()
            .collect();

        panic!(
            "Collection content mismatch:\n  Missing or miscounted: {missing:?}\n  Extra elements: {extra:?}\n  Expected: {expected:?}\n  Actual: {actual:?}"
        );
    }
}

fn counts<T: Eq + Hash>(items: &[T]) -> HashMap<&T, usize> {
    let mut m = HashMap::new();
    for item in items {
        *m.entry(item).or_insert(0) += 1;
    }
    m
}

/// The elements of `input` whose key is minimal, in encounter order.
///
/// A brute-force reference (two passes, `Ord` keys) to check collectors against.
///
/// ```
/// use firstrank::testing::expected_min_ties;
///
/// assert_eq!(expected_min_ties(&["b", "a", "a"], |s| *s), vec!["a", "a"]);
/// ```
pub fn expected_min_ties<T, K, F>(input: &[T], key: F) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> K,
{
    let Some(best) = input.iter().map(&key).min() else {
        return Vec::new();
    };
    input.iter().filter(|t| key(*t) == best).cloned().collect()
}
