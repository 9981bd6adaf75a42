//! Advanced lazy stages: select_many (flattening) and distinct (dedupe)
use std::collections::HashSet;
use std::hash::Hash;

use super::core::Stream;
use super::reverse::{materialize_rev, Materialized};

/// Extension trait providing the flattening and dedupe stages
pub trait AdvancedStreamExt: Stream + Sized {
    /// Expand every element into a sub-sequence and flatten the results in order.
    fn select_many<U, F>(self, selector: F) -> SelectMany<Self, F>
    where
        F: Fn(Self::Item) -> U,
        U: IntoIterator,
    {
        SelectMany { stream: self, selector }
    }

    /// Yield each distinct value once, at its first occurrence.
    fn distinct(self) -> Distinct<Self>
    where
        Self::Item: Eq + Hash + Clone,
    {
        Distinct { stream: self }
    }
}

impl<S: Stream> AdvancedStreamExt for S {}

// ================================
// SelectMany
// ================================

#[derive(Debug, Clone)]
pub struct SelectMany<S, F> {
    stream: S,
    selector: F,
}

impl<S, F, U> Stream for SelectMany<S, F>
where
    S: Stream,
    F: Fn(S::Item) -> U,
    U: IntoIterator,
{
    type Item = U::Item;
    type Iter<'a> = SelectManyIter<'a, S::Iter<'a>, U, F> where Self: 'a;
    type RevIter<'a> = Materialized<U::Item> where Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        SelectManyIter {
            outer: self.stream.iter(),
            selector: &self.selector,
            inner: None,
        }
    }

    fn rev_iter(&self) -> Self::RevIter<'_> {
        materialize_rev(self.iter(), None)
    }
}

/// Two-level cursor: the upstream position and the current expansion.
///
/// The inner cursor survives between calls to `next`, so an expansion is only
/// advanced as far as the caller pulls.
pub struct SelectManyIter<'a, I, U, F>
where
    U: IntoIterator,
{
    outer: I,
    selector: &'a F,
    inner: Option<U::IntoIter>,
}

impl<'a, I, U, F> Iterator for SelectManyIter<'a, I, U, F>
where
    I: Iterator,
    F: Fn(I::Item) -> U,
    U: IntoIterator,
{
    type Item = U::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(inner) = &mut self.inner {
                match inner.next() {
                    Some(item) => return Some(item),
                    None => self.inner = None,
                }
            }

            let item = self.outer.next()?;
            self.inner = Some((self.selector)(item).into_iter());
        }
    }
}

// ================================
// Distinct
// ================================

#[derive(Debug, Clone)]
pub struct Distinct<S> {
    stream: S,
}

impl<S> Stream for Distinct<S>
where
    S: Stream,
    S::Item: Eq + Hash + Clone,
{
    type Item = S::Item;
    type Iter<'a> = DistinctIter<S::Iter<'a>> where Self: 'a;
    type RevIter<'a> = Materialized<S::Item> where Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        DistinctIter {
            iter: self.stream.iter(),
            seen: HashSet::new(),
        }
    }

    // Reverse of the forward result, not a dedupe of the reversed upstream:
    // the latter would keep last occurrences instead of first.
    fn rev_iter(&self) -> Self::RevIter<'_> {
        materialize_rev(self.iter(), None)
    }
}

/// Seen-set lives here, so every pass starts empty.
pub struct DistinctIter<I: Iterator> {
    iter: I,
    seen: HashSet<I::Item>,
}

impl<I> Iterator for DistinctIter<I>
where
    I: Iterator,
    I::Item: Eq + Hash + Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = self.iter.next()?;
            if self.seen.insert(item.clone()) {
                return Some(item);
            }
        }
    }
}
