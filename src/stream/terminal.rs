//! Terminal reducers: fold, count, any/contains, first/last/single, to_list/to_map, sum/average
//!
//! Terminals take `&self`, start a fresh pass, and pull only as far as they
//! need to: `first`, `any` and `contains` stop at the first hit, `single`
//! stops after the second element.

use std::collections::HashMap;
use std::hash::Hash;
use std::iter::Sum;
use std::num::Wrapping;

use crate::error::{QueryError, QueryResult};
use super::core::Stream;

/// Zero, one, or more-than-one element, from at most two pulls.
fn single_of<I: Iterator>(mut iter: I) -> QueryResult<Option<I::Item>> {
    match (iter.next(), iter.next()) {
        (None, _) => Ok(None),
        (Some(item), None) => Ok(Some(item)),
        (Some(_), Some(_)) => Err(QueryError::MultipleElementsFound),
    }
}

/// Numbers that `average` can take the mean of.
///
/// Wide integers convert the way `as f64` does, rounding to the nearest
/// representable value.
pub trait ToF64 {
    fn to_f64(self) -> f64;
}

macro_rules! impl_to_f64 {
    ($($t:ty),*) => {
        $(impl ToF64 for $t {
            fn to_f64(self) -> f64 {
                self as f64
            }
        })*
    };
}

impl_to_f64!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Extension trait providing the terminal operations
pub trait TerminalStreamExt: Stream {
    /// Left fold over the forward order.
    fn aggregate<A, F>(&self, seed: A, aggregator: F) -> A
    where
        F: FnMut(A, Self::Item) -> A,
    {
        self.iter().fold(seed, aggregator)
    }

    /// Number of elements; iterates only when the count is not already known.
    fn count(&self) -> usize {
        self.known_count()
            .unwrap_or_else(|| self.aggregate(0, |count, _| count + 1))
    }

    /// Whether the stream has at least one element.
    fn any(&self) -> bool {
        self.iter().next().is_some()
    }

    /// Whether any element matches `predicate`.
    fn any_match<P>(&self, predicate: P) -> bool
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.iter().any(|item| predicate(&item))
    }

    fn contains(&self, value: &Self::Item) -> bool
    where
        Self::Item: PartialEq,
    {
        self.any_match(|item| item == value)
    }

    /// Whether any element equals `value` under `equals`.
    fn contains_by<E>(&self, value: &Self::Item, equals: E) -> bool
    where
        E: Fn(&Self::Item, &Self::Item) -> bool,
    {
        self.any_match(|item| equals(item, value))
    }

    fn first(&self) -> QueryResult<Self::Item> {
        self.iter().next().ok_or(QueryError::EmptySequence)
    }

    fn first_where<P>(&self, predicate: P) -> QueryResult<Self::Item>
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.iter()
            .find(|item| predicate(item))
            .ok_or(QueryError::EmptySequence)
    }

    fn first_or_default(&self, default: Self::Item) -> Self::Item {
        self.iter().next().unwrap_or(default)
    }

    fn first_where_or_default<P>(&self, predicate: P, default: Self::Item) -> Self::Item
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.iter().find(|item| predicate(item)).unwrap_or(default)
    }

    fn first_or_none(&self) -> Option<Self::Item> {
        self.iter().next()
    }

    fn first_where_or_none<P>(&self, predicate: P) -> Option<Self::Item>
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.iter().find(|item| predicate(item))
    }

    /// Last element, taken from the front of a reverse pass.
    fn last(&self) -> QueryResult<Self::Item> {
        self.rev_iter().next().ok_or(QueryError::EmptySequence)
    }

    fn last_where<P>(&self, predicate: P) -> QueryResult<Self::Item>
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.rev_iter()
            .find(|item| predicate(item))
            .ok_or(QueryError::EmptySequence)
    }

    fn last_or_default(&self, default: Self::Item) -> Self::Item {
        self.rev_iter().next().unwrap_or(default)
    }

    fn last_where_or_default<P>(&self, predicate: P, default: Self::Item) -> Self::Item
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.rev_iter().find(|item| predicate(item)).unwrap_or(default)
    }

    fn last_or_none(&self) -> Option<Self::Item> {
        self.rev_iter().next()
    }

    fn last_where_or_none<P>(&self, predicate: P) -> Option<Self::Item>
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.rev_iter().find(|item| predicate(item))
    }

    /// The only element; fails when there are none or more than one.
    fn single(&self) -> QueryResult<Self::Item> {
        single_of(self.iter())?.ok_or(QueryError::EmptySequence)
    }

    fn single_where<P>(&self, predicate: P) -> QueryResult<Self::Item>
    where
        P: Fn(&Self::Item) -> bool,
    {
        single_of(self.iter().filter(|item| predicate(item)))?.ok_or(QueryError::EmptySequence)
    }

    /// The only element, or `default` when empty. More than one is still an error.
    fn single_or_default(&self, default: Self::Item) -> QueryResult<Self::Item> {
        Ok(single_of(self.iter())?.unwrap_or(default))
    }

    fn single_where_or_default<P>(&self, predicate: P, default: Self::Item) -> QueryResult<Self::Item>
    where
        P: Fn(&Self::Item) -> bool,
    {
        Ok(single_of(self.iter().filter(|item| predicate(item)))?.unwrap_or(default))
    }

    /// The only element, or `None` when empty. More than one is still an error.
    fn single_or_none(&self) -> QueryResult<Option<Self::Item>> {
        single_of(self.iter())
    }

    fn single_where_or_none<P>(&self, predicate: P) -> QueryResult<Option<Self::Item>>
    where
        P: Fn(&Self::Item) -> bool,
    {
        single_of(self.iter().filter(|item| predicate(item)))
    }

    fn to_list(&self) -> Vec<Self::Item> {
        let mut list = Vec::with_capacity(self.known_count().unwrap_or(0));
        list.extend(self.iter());
        list
    }

    /// Map of `key_selector(element)` to element; later duplicates win.
    fn to_map<K, F>(&self, key_selector: F) -> HashMap<K, Self::Item>
    where
        F: Fn(&Self::Item) -> K,
        K: Eq + Hash,
    {
        self.iter().map(|item| (key_selector(&item), item)).collect()
    }

    /// Map of `key_selector(element)` to `value_selector(element)`; later duplicates win.
    fn to_map_with<K, V, KF, VF>(&self, key_selector: KF, value_selector: VF) -> HashMap<K, V>
    where
        KF: Fn(&Self::Item) -> K,
        VF: Fn(Self::Item) -> V,
        K: Eq + Hash,
    {
        self.aggregate(HashMap::new(), |mut map, item| {
            map.insert(key_selector(&item), value_selector(item));
            map
        })
    }

    /// Sum of `selector(element)` over the stream.
    ///
    /// Integer overflow panics in debug builds, like `Iterator::sum`; use
    /// [`wrapping_sum`](TerminalStreamExt::wrapping_sum) to wrap instead.
    fn sum<N, F>(&self, selector: F) -> N
    where
        F: Fn(&Self::Item) -> N,
        N: Sum<N>,
    {
        self.iter().map(|item| selector(&item)).sum()
    }

    /// Sum of `selector(element)` in two's-complement wrapping arithmetic.
    fn wrapping_sum<N, F>(&self, selector: F) -> N
    where
        F: Fn(&Self::Item) -> N,
        Wrapping<N>: Sum<Wrapping<N>>,
    {
        self.iter()
            .map(|item| Wrapping(selector(&item)))
            .sum::<Wrapping<N>>()
            .0
    }

    /// Arithmetic mean of `selector(element)`; an empty stream has none.
    fn average<N, F>(&self, selector: F) -> QueryResult<f64>
    where
        F: Fn(&Self::Item) -> N,
        N: ToF64,
    {
        let (total, count) = self.aggregate((0.0f64, 0usize), |(total, count), item| {
            (total + selector(&item).to_f64(), count + 1)
        });
        if count == 0 {
            return Err(QueryError::EmptySequence);
        }
        Ok(total / count as f64)
    }
}

impl<S: Stream + ?Sized> TerminalStreamExt for S {}
