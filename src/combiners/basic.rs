use std::marker::PhantomData;
use std::ops::Add;

use crate::reducer::{CombineFn, OrderSensitivity};

/* ===================== Sum<T> ===================== */

/// Sum of the retained elements.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sum<T>(pub PhantomData<fn(T)>);
impl<T> Sum<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> CombineFn<T, T, T> for Sum<T>
where
    T: 'static + Add<Output = T> + Default,
{
    fn create(&self) -> T {
        T::default()
    }

    fn add_input(&self, acc: &mut T, v: T) {
        *acc = std::mem::take(acc) + v;
    }

    fn merge(&self, acc: &mut T, other: T) {
        *acc = std::mem::take(acc) + other;
    }

    fn finish(&self, acc: T) -> T {
        acc
    }

    fn order(&self) -> OrderSensitivity {
        OrderSensitivity::Unordered
    }
}
