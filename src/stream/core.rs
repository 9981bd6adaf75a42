//! Core stream capability and the lazy one-to-one stages: filter, select, take, skip.
//!
//! A [`Stream`] is not a container. It is something that can hand out a fresh
//! forward producer (and a fresh reverse producer) every time it is asked.
//! Stages own their upstream and pull from it only while they are iterated.

use std::iter;

use crate::error::{QueryError, QueryResult};
use super::reverse::{materialize_rev, Materialized, Reverse};

/// A re-iterable, optionally reversible sequence of `Item`s.
///
/// Every call to [`iter`](Stream::iter) starts a new pass over the sequence; the
/// iterator it returns owns all per-pass state. [`rev_iter`](Stream::rev_iter)
/// produces the same elements back to front, either natively or by buffering a
/// forward pass.
pub trait Stream {
    type Item;
    type Iter<'a>: Iterator<Item = Self::Item>
    where
        Self: 'a;
    type RevIter<'a>: Iterator<Item = Self::Item>
    where
        Self: 'a;

    /// Start a forward pass.
    fn iter(&self) -> Self::Iter<'_>;

    /// Start a reverse pass.
    fn rev_iter(&self) -> Self::RevIter<'_>;

    /// Number of elements, if it can be told without iterating.
    fn known_count(&self) -> Option<usize> {
        None
    }
}

// A borrowed stream is a stream, so pipelines can be built without giving up ownership.
impl<S> Stream for &S
where
    S: Stream + ?Sized,
{
    type Item = S::Item;
    type Iter<'a> = S::Iter<'a> where Self: 'a;
    type RevIter<'a> = S::RevIter<'a> where Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        (**self).iter()
    }

    fn rev_iter(&self) -> Self::RevIter<'_> {
        (**self).rev_iter()
    }

    fn known_count(&self) -> Option<usize> {
        (**self).known_count()
    }
}

/// Extension trait providing the lazy pipeline stages
pub trait StreamExt: Stream + Sized {
    /// Keep only the elements matching `predicate` (the LINQ `where`).
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        P: Fn(&Self::Item) -> bool,
    {
        Filter { stream: self, predicate }
    }

    /// Transform every element with `selector`.
    fn select<R, F>(self, selector: F) -> Select<Self, F>
    where
        F: Fn(Self::Item) -> R,
    {
        Select { stream: self, selector }
    }

    /// Yield at most the first `count` elements.
    fn take(self, count: isize) -> QueryResult<Take<Self>> {
        let count = usize::try_from(count).map_err(|_| QueryError::negative_count(count))?;
        Ok(Take { stream: self, count })
    }

    /// Drop the first `count` elements and yield the rest.
    fn skip(self, count: isize) -> QueryResult<Skip<Self>> {
        let count = usize::try_from(count).map_err(|_| QueryError::negative_count(count))?;
        Ok(Skip { stream: self, count })
    }

    /// Yield the elements back to front.
    fn reverse(self) -> Reverse<Self> {
        Reverse::new(self)
    }
}

impl<S: Stream> StreamExt for S {}

// ================================
// Filter
// ================================

#[derive(Debug, Clone)]
pub struct Filter<S, P> {
    stream: S,
    predicate: P,
}

impl<S, P> Stream for Filter<S, P>
where
    S: Stream,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;
    type Iter<'a> = FilterIter<'a, S::Iter<'a>, P> where Self: 'a;
    type RevIter<'a> = FilterIter<'a, S::RevIter<'a>, P> where Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        FilterIter {
            iter: self.stream.iter(),
            predicate: &self.predicate,
        }
    }

    // Same predicate over the upstream's reverse producer.
    fn rev_iter(&self) -> Self::RevIter<'_> {
        FilterIter {
            iter: self.stream.rev_iter(),
            predicate: &self.predicate,
        }
    }
}

pub struct FilterIter<'a, I, P> {
    iter: I,
    predicate: &'a P,
}

impl<'a, I, P> Iterator for FilterIter<'a, I, P>
where
    I: Iterator,
    P: Fn(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = self.iter.next()?;
            if (self.predicate)(&item) {
                return Some(item);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

// ================================
// Select
// ================================

#[derive(Debug, Clone)]
pub struct Select<S, F> {
    stream: S,
    selector: F,
}

impl<S, F, R> Stream for Select<S, F>
where
    S: Stream,
    F: Fn(S::Item) -> R,
{
    type Item = R;
    type Iter<'a> = SelectIter<'a, S::Iter<'a>, F> where Self: 'a;
    type RevIter<'a> = SelectIter<'a, S::RevIter<'a>, F> where Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        SelectIter {
            iter: self.stream.iter(),
            selector: &self.selector,
        }
    }

    fn rev_iter(&self) -> Self::RevIter<'_> {
        SelectIter {
            iter: self.stream.rev_iter(),
            selector: &self.selector,
        }
    }

    fn known_count(&self) -> Option<usize> {
        self.stream.known_count()
    }
}

pub struct SelectIter<'a, I, F> {
    iter: I,
    selector: &'a F,
}

impl<'a, I, F, R> Iterator for SelectIter<'a, I, F>
where
    I: Iterator,
    F: Fn(I::Item) -> R,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        self.iter.next().map(self.selector)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

// ================================
// Take / Skip
// ================================

#[derive(Debug, Clone)]
pub struct Take<S> {
    stream: S,
    count: usize,
}

impl<S: Stream> Stream for Take<S> {
    type Item = S::Item;
    type Iter<'a> = iter::Take<S::Iter<'a>> where Self: 'a;
    type RevIter<'a> = Materialized<S::Item> where Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.stream.iter().take(self.count)
    }

    fn rev_iter(&self) -> Self::RevIter<'_> {
        materialize_rev(self.iter(), self.known_count())
    }

    fn known_count(&self) -> Option<usize> {
        if self.count == 0 {
            return Some(0);
        }
        self.stream.known_count().map(|upstream| upstream.min(self.count))
    }
}

#[derive(Debug, Clone)]
pub struct Skip<S> {
    stream: S,
    count: usize,
}

impl<S: Stream> Stream for Skip<S> {
    type Item = S::Item;
    type Iter<'a> = iter::Skip<S::Iter<'a>> where Self: 'a;
    type RevIter<'a> = Materialized<S::Item> where Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.stream.iter().skip(self.count)
    }

    fn rev_iter(&self) -> Self::RevIter<'_> {
        materialize_rev(self.iter(), self.known_count())
    }

    fn known_count(&self) -> Option<usize> {
        self.stream
            .known_count()
            .map(|upstream| upstream.saturating_sub(self.count))
    }
}
