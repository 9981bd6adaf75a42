//! Ordering stage: stable multi-key sort with per-key direction.
//!
//! `order_by*` seeds an [`OrderBy`] with one sort key; every `then_by*` call
//! moves the same value through, appends a key, and returns it. Comparing two
//! elements walks the keys in order and stops at the first one that does not
//! tie, flipping the result for descending keys.
//!
//! Iteration buffers the upstream and sorts it with `sort_by`, which is stable.
//! The reverse producer walks that same sorted buffer backward rather than
//! sorting again with an inverted comparator, so elements that tie on every
//! key come out in exactly the opposite order to a forward pass.

use std::cmp::Ordering;
use std::fmt;
use std::iter::Rev;
use std::vec;

use crate::error::QueryResult;
use crate::stream_configuration::BufferConfig;
use super::core::Stream;
use super::terminal::TerminalStreamExt;

/// Direction of one sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// One level of the composite comparator: key selector and key comparator fused.
struct SortKey<'f, T> {
    compare: Box<dyn Fn(&T, &T) -> Ordering + 'f>,
    direction: SortDirection,
}

impl<'f, T> SortKey<'f, T> {
    fn new<K, F, C>(selector: F, comparator: C, direction: SortDirection) -> Self
    where
        F: Fn(&T) -> K + 'f,
        C: Fn(&K, &K) -> Ordering + 'f,
    {
        Self {
            compare: Box::new(move |a, b| comparator(&selector(a), &selector(b))),
            direction,
        }
    }

    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.direction.apply((self.compare)(a, b))
    }
}

/// Extension trait providing the ordering stage and the min/max reducers built on it
pub trait OrderingStreamExt: Stream + Sized {
    /// Sort ascending by `selector`.
    fn order_by<'f, K, F>(self, selector: F) -> OrderBy<'f, Self>
    where
        F: Fn(&Self::Item) -> K + 'f,
        K: Ord,
    {
        OrderBy::new(self).then_by(selector)
    }

    /// Sort ascending by `selector`, comparing keys with `comparator`.
    fn order_by_with<'f, K, F, C>(self, selector: F, comparator: C) -> OrderBy<'f, Self>
    where
        F: Fn(&Self::Item) -> K + 'f,
        C: Fn(&K, &K) -> Ordering + 'f,
    {
        OrderBy::new(self).then_by_with(selector, comparator)
    }

    /// Sort descending by `selector`.
    fn order_by_descending<'f, K, F>(self, selector: F) -> OrderBy<'f, Self>
    where
        F: Fn(&Self::Item) -> K + 'f,
        K: Ord,
    {
        OrderBy::new(self).then_by_descending(selector)
    }

    /// Sort descending by `selector`, comparing keys with `comparator`.
    fn order_by_descending_with<'f, K, F, C>(self, selector: F, comparator: C) -> OrderBy<'f, Self>
    where
        F: Fn(&Self::Item) -> K + 'f,
        C: Fn(&K, &K) -> Ordering + 'f,
    {
        OrderBy::new(self).then_by_descending_with(selector, comparator)
    }

    /// Element with the smallest key; the first of several ties.
    fn min<K, F>(&self, selector: F) -> QueryResult<Self::Item>
    where
        F: Fn(&Self::Item) -> K,
        K: Ord,
    {
        self.order_by(selector).first()
    }

    /// Element with the smallest key under `comparator`.
    fn min_with<K, F, C>(&self, selector: F, comparator: C) -> QueryResult<Self::Item>
    where
        F: Fn(&Self::Item) -> K,
        C: Fn(&K, &K) -> Ordering,
    {
        self.order_by_with(selector, comparator).first()
    }

    /// Element with the largest key; the last of several ties.
    fn max<K, F>(&self, selector: F) -> QueryResult<Self::Item>
    where
        F: Fn(&Self::Item) -> K,
        K: Ord,
    {
        self.order_by(selector).last()
    }

    /// Element with the largest key under `comparator`.
    fn max_with<K, F, C>(&self, selector: F, comparator: C) -> QueryResult<Self::Item>
    where
        F: Fn(&Self::Item) -> K,
        C: Fn(&K, &K) -> Ordering,
    {
        self.order_by_with(selector, comparator).last()
    }
}

impl<S: Stream> OrderingStreamExt for S {}

/// An ordered stream: the upstream plus its chain of sort keys.
pub struct OrderBy<'f, S: Stream> {
    stream: S,
    keys: Vec<SortKey<'f, S::Item>>,
    config: BufferConfig,
}

impl<'f, S: Stream> OrderBy<'f, S> {
    fn new(stream: S) -> Self {
        Self {
            stream,
            keys: Vec::new(),
            config: BufferConfig::default(),
        }
    }

    /// Break ties ascending by `selector`.
    pub fn then_by<K, F>(self, selector: F) -> Self
    where
        F: Fn(&S::Item) -> K + 'f,
        K: Ord,
    {
        self.push_key(SortKey::new(selector, |a: &K, b: &K| a.cmp(b), SortDirection::Ascending))
    }

    /// Break ties ascending by `selector`, comparing keys with `comparator`.
    pub fn then_by_with<K, F, C>(self, selector: F, comparator: C) -> Self
    where
        F: Fn(&S::Item) -> K + 'f,
        C: Fn(&K, &K) -> Ordering + 'f,
    {
        self.push_key(SortKey::new(selector, comparator, SortDirection::Ascending))
    }

    /// Break ties descending by `selector`.
    pub fn then_by_descending<K, F>(self, selector: F) -> Self
    where
        F: Fn(&S::Item) -> K + 'f,
        K: Ord,
    {
        self.push_key(SortKey::new(selector, |a: &K, b: &K| a.cmp(b), SortDirection::Descending))
    }

    /// Break ties descending by `selector`, comparing keys with `comparator`.
    pub fn then_by_descending_with<K, F, C>(self, selector: F, comparator: C) -> Self
    where
        F: Fn(&S::Item) -> K + 'f,
        C: Fn(&K, &K) -> Ordering + 'f,
    {
        self.push_key(SortKey::new(selector, comparator, SortDirection::Descending))
    }

    /// Override how the sort buffer is pre-sized.
    pub fn with_buffer_config(mut self, config: BufferConfig) -> Self {
        self.config = config;
        self
    }

    /// Directions of the sort keys, outermost first.
    pub fn directions(&self) -> Vec<SortDirection> {
        self.keys.iter().map(|key| key.direction).collect()
    }

    /// Composite comparison: first key that does not tie decides.
    pub fn compare(&self, a: &S::Item, b: &S::Item) -> Ordering {
        self.keys
            .iter()
            .map(|key| key.compare(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    fn push_key(mut self, key: SortKey<'f, S::Item>) -> Self {
        self.keys.push(key);
        self
    }

    fn sorted(&self) -> Vec<S::Item> {
        let mut buffer = self.config.buffer(self.stream.known_count());
        buffer.extend(self.stream.iter());
        log::trace!("sorting {} elements by {} keys", buffer.len(), self.keys.len());
        buffer.sort_by(|a, b| self.compare(a, b));
        buffer
    }
}

impl<'f, S: Stream> Stream for OrderBy<'f, S> {
    type Item = S::Item;
    type Iter<'a> = vec::IntoIter<S::Item> where Self: 'a;
    type RevIter<'a> = Rev<vec::IntoIter<S::Item>> where Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.sorted().into_iter()
    }

    fn rev_iter(&self) -> Self::RevIter<'_> {
        self.sorted().into_iter().rev()
    }

    fn known_count(&self) -> Option<usize> {
        self.stream.known_count()
    }
}

impl<'f, S> fmt::Debug for OrderBy<'f, S>
where
    S: Stream + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderBy")
            .field("stream", &self.stream)
            .field("keys", &self.directions())
            .field("config", &self.config)
            .finish()
    }
}
