//! Downstream reducer contract.
//!
//! A downstream reducer decides what the elements retained by a first-rank
//! collector are accumulated into. It is a small capability set:
//!
//! - `create` builds an empty container,
//! - `add_input` feeds one element into a container,
//! - `merge` folds a second container into the first (only used by
//!   partitioned/parallel runs),
//! - `finish` turns a container into the final result,
//! - `order` declares whether the result depends on encounter order.
//!
//! Containers handed out by `create` may be dropped without ever being
//! merged or finished: the first-rank collector throws a container away as
//! soon as a strictly better element shows up. Reducers must not rely on
//! `finish` being called to release resources.

use std::marker::PhantomData;

/// Whether a reducer's output depends on the order elements were fed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum OrderSensitivity {
    /// Encounter order is observable in the result (e.g. a `Vec`).
    #[default]
    Ordered,
    /// The result is the same for any permutation of the input (e.g. a set or a count).
    Unordered,
}

impl OrderSensitivity {
    #[must_use]
    pub const fn is_ordered(self) -> bool {
        matches!(self, Self::Ordered)
    }
}

/// A downstream reducer over values `V`, with container `A` and output `O`.
pub trait CombineFn<V, A, O>: Send + Sync + 'static {
    fn create(&self) -> A;
    fn add_input(&self, acc: &mut A, v: V);
    fn merge(&self, acc: &mut A, other: A);
    fn finish(&self, acc: A) -> O;

    /// Reducers that don't say otherwise are treated as order-sensitive.
    fn order(&self) -> OrderSensitivity {
        OrderSensitivity::Ordered
    }
}

/// Counts the elements fed into it.
#[derive(Clone, Copy, Debug, Default)]
pub struct Count;

impl<V> CombineFn<V, u64, u64> for Count {
    fn create(&self) -> u64 {
        0
    }
    fn add_input(&self, acc: &mut u64, _v: V) {
        *acc += 1;
    }
    fn merge(&self, acc: &mut u64, other: u64) {
        *acc += other;
    }
    fn finish(&self, acc: u64) -> u64 {
        acc
    }
    fn order(&self) -> OrderSensitivity {
        OrderSensitivity::Unordered
    }
}

/// A reducer assembled from four closures.
///
/// Useful for one-off reductions that don't deserve their own type:
///
/// ```
/// use firstrank::reducer::{CombineFn, FnCombiner, OrderSensitivity};
///
/// // Joins strings with a comma.
/// let join = FnCombiner::new(
///     String::new,
///     |acc: &mut String, v: String| {
///         if !acc.is_empty() {
///             acc.push(',');
///         }
///         acc.push_str(&v);
///     },
///     |acc: &mut String, other: String| {
///         if !acc.is_empty() && !other.is_empty() {
///             acc.push(',');
///         }
///         acc.push_str(&other);
///     },
///     |acc: String| acc,
/// );
///
/// let mut acc = join.create();
/// join.add_input(&mut acc, "a".to_string());
/// join.add_input(&mut acc, "b".to_string());
/// assert_eq!(join.finish(acc), "a,b");
/// assert_eq!(join.order(), OrderSensitivity::Ordered);
/// ```
pub struct FnCombiner<V, A, O, C, F, M, Z> {
    create: C,
    add: F,
    merge: M,
    finish: Z,
    order: OrderSensitivity,
    _m: PhantomData<fn(V, A) -> O>,
}

impl<V, A, O, C, F, M, Z> FnCombiner<V, A, O, C, F, M, Z>
where
    C: Fn() -> A,
    F: Fn(&mut A, V),
    M: Fn(&mut A, A),
    Z: Fn(A) -> O,
{
    pub const fn new(create: C, add: F, merge: M, finish: Z) -> Self {
        Self {
            create,
            add,
            merge,
            finish,
            order: OrderSensitivity::Ordered,
            _m: PhantomData,
        }
    }

    /// Declare the reducer's order sensitivity (defaults to `Ordered`).
    #[must_use]
    pub fn with_order(mut self, order: OrderSensitivity) -> Self {
        self.order = order;
        self
    }
}

impl<V, A, O, C, F, M, Z> CombineFn<V, A, O> for FnCombiner<V, A, O, C, F, M, Z>
where
    V: 'static,
    A: 'static,
    O: 'static,
    C: Fn() -> A + Send + Sync + 'static,
    F: Fn(&mut A, V) + Send + Sync + 'static,
    M: Fn(&mut A, A) + Send + Sync + 'static,
    Z: Fn(A) -> O + Send + Sync + 'static,
{
    fn create(&self) -> A {
        (self.create)()
    }
    fn add_input(&self, acc: &mut A, v: V) {
        (self.add)(acc, v);
    }
    fn merge(&self, acc: &mut A, other: A) {
        (self.merge)(acc, other);
    }
    fn finish(&self, acc: A) -> O {
        (self.finish)(acc)
    }
    fn order(&self) -> OrderSensitivity {
        self.order
    }
}
