//! Stream constructors: slices, owned lists, iterables, single-pass iterators, maps, empty
//!
//! Sources are the leaves of every pipeline. Slices and lists know their
//! length and run backward natively; arbitrary iterables only run forward
//! (reverse goes through the buffering fallback); a map has no order, so its
//! reverse producer is its forward producer.

use std::cell::Cell;
use std::collections::hash_map::{self, HashMap};
use std::fmt;
use std::iter::{self, Cloned, Flatten, Rev};
use std::marker::PhantomData;
use std::option;
use std::slice;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};
use super::core::Stream;
use super::reverse::{materialize_rev, Materialized};

// ================================
// Construction boundary
// ================================

/// Conversion into the source stream for a collection
pub trait IntoStream {
    type Stream: Stream;

    fn into_stream(self) -> Self::Stream;
}

/// Wrap a collection as the initial stream of a pipeline
pub fn stream<C: IntoStream>(source: C) -> C::Stream {
    source.into_stream()
}

/// Wrap a collection that may be absent
pub fn try_stream<C: IntoStream>(source: Option<C>) -> QueryResult<C::Stream> {
    source.map(IntoStream::into_stream).ok_or(QueryError::NullSource)
}

/// Create a re-iterable stream from any cloneable iterable
pub fn from_iter<I>(iterable: I) -> IterStream<I>
where
    I: IntoIterator + Clone,
{
    // Only trusted when the iterator reports an exact size.
    let known_count = match iterable.clone().into_iter().size_hint() {
        (lower, Some(upper)) if lower == upper => Some(lower),
        _ => None,
    };
    IterStream { iterable, known_count }
}

/// Create a stream that can be iterated only once
pub fn from_single_pass<I>(iter: I) -> SinglePassStream<I::IntoIter>
where
    I: IntoIterator,
{
    SinglePassStream {
        iter: Cell::new(Some(iter.into_iter())),
    }
}

/// Create a stream with no elements
pub fn empty<T>() -> EmptyStream<T> {
    EmptyStream { _phantom: PhantomData }
}

impl<'s, T> IntoStream for &'s [T] {
    type Stream = SliceStream<'s, T>;

    fn into_stream(self) -> Self::Stream {
        SliceStream { source: self }
    }
}

impl<'s, T, const N: usize> IntoStream for &'s [T; N] {
    type Stream = SliceStream<'s, T>;

    fn into_stream(self) -> Self::Stream {
        SliceStream { source: self.as_slice() }
    }
}

impl<'s, T> IntoStream for &'s Vec<T> {
    type Stream = SliceStream<'s, T>;

    fn into_stream(self) -> Self::Stream {
        SliceStream { source: self.as_slice() }
    }
}

impl<T: Clone> IntoStream for Vec<T> {
    type Stream = ListStream<T>;

    fn into_stream(self) -> Self::Stream {
        ListStream::new(self)
    }
}

impl<'s, K, V, H> IntoStream for &'s HashMap<K, V, H> {
    type Stream = MapStream<'s, K, V, H>;

    fn into_stream(self) -> Self::Stream {
        MapStream { source: self }
    }
}

// ================================
// Slice
// ================================

/// Borrowed array-like source yielding `&T`
#[derive(Debug)]
pub struct SliceStream<'s, T> {
    source: &'s [T],
}

impl<'s, T> Clone for SliceStream<'s, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'s, T> Copy for SliceStream<'s, T> {}

impl<'s, T> Stream for SliceStream<'s, T> {
    type Item = &'s T;
    type Iter<'a> = slice::Iter<'s, T> where Self: 'a;
    type RevIter<'a> = Rev<slice::Iter<'s, T>> where Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.source.iter()
    }

    fn rev_iter(&self) -> Self::RevIter<'_> {
        self.source.iter().rev()
    }

    fn known_count(&self) -> Option<usize> {
        Some(self.source.len())
    }
}

// ================================
// Owned list
// ================================

/// Owned list source yielding clones of its elements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListStream<T> {
    items: Vec<T>,
}

impl<T> ListStream<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for ListStream<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> From<Vec<T>> for ListStream<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T: Clone> Stream for ListStream<T> {
    type Item = T;
    type Iter<'a> = Cloned<slice::Iter<'a, T>> where Self: 'a;
    type RevIter<'a> = Rev<Cloned<slice::Iter<'a, T>>> where Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.items.iter().cloned()
    }

    fn rev_iter(&self) -> Self::RevIter<'_> {
        self.items.iter().cloned().rev()
    }

    fn known_count(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

// ================================
// Iterable
// ================================

/// Forward-only source over a cloneable iterable; each pass clones the iterable.
///
/// The size hint is read once, when the stream is built.
#[derive(Debug, Clone)]
pub struct IterStream<I> {
    iterable: I,
    known_count: Option<usize>,
}

impl<I> Stream for IterStream<I>
where
    I: IntoIterator + Clone,
{
    type Item = I::Item;
    type Iter<'a> = I::IntoIter where Self: 'a;
    type RevIter<'a> = Materialized<I::Item> where Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.iterable.clone().into_iter()
    }

    fn rev_iter(&self) -> Self::RevIter<'_> {
        materialize_rev(self.iter(), self.known_count)
    }

    fn known_count(&self) -> Option<usize> {
        self.known_count
    }
}

// ================================
// Single pass
// ================================

/// Source over a plain iterator. The first pass consumes it; later passes are empty.
pub struct SinglePassStream<I> {
    iter: Cell<Option<I>>,
}

impl<I> SinglePassStream<I> {
    /// Whether the underlying iterator has already been handed out.
    pub fn is_consumed(&self) -> bool {
        let iter = self.iter.take();
        let consumed = iter.is_none();
        self.iter.set(iter);
        consumed
    }
}

impl<I> fmt::Debug for SinglePassStream<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinglePassStream")
            .field("consumed", &self.is_consumed())
            .finish()
    }
}

impl<I: Iterator> Stream for SinglePassStream<I> {
    type Item = I::Item;
    type Iter<'a> = Flatten<option::IntoIter<I>> where Self: 'a;
    type RevIter<'a> = Materialized<I::Item> where Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.iter.take().into_iter().flatten()
    }

    fn rev_iter(&self) -> Self::RevIter<'_> {
        materialize_rev(self.iter(), None)
    }
}

// ================================
// Map
// ================================

/// Borrowed key/value source yielding `(&K, &V)` in the map's own order
#[derive(Debug)]
pub struct MapStream<'s, K, V, H> {
    source: &'s HashMap<K, V, H>,
}

impl<'s, K, V, H> Clone for MapStream<'s, K, V, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'s, K, V, H> Copy for MapStream<'s, K, V, H> {}

impl<'s, K, V, H> Stream for MapStream<'s, K, V, H> {
    type Item = (&'s K, &'s V);
    type Iter<'a> = hash_map::Iter<'s, K, V> where Self: 'a;
    type RevIter<'a> = hash_map::Iter<'s, K, V> where Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.source.iter()
    }

    // Unordered: backward is the same walk as forward.
    fn rev_iter(&self) -> Self::RevIter<'_> {
        self.source.iter()
    }

    fn known_count(&self) -> Option<usize> {
        Some(self.source.len())
    }
}

// ================================
// Empty
// ================================

#[derive(Debug)]
pub struct EmptyStream<T> {
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Clone for EmptyStream<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EmptyStream<T> {}

impl<T> Stream for EmptyStream<T> {
    type Item = T;
    type Iter<'a> = iter::Empty<T> where Self: 'a;
    type RevIter<'a> = iter::Empty<T> where Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        iter::empty()
    }

    fn rev_iter(&self) -> Self::RevIter<'_> {
        iter::empty()
    }

    fn known_count(&self) -> Option<usize> {
        Some(0)
    }
}
