//! Reversal stage and the shared "materialize, then walk backward" fallback.

use std::iter::Rev;
use std::vec;

use super::core::Stream;

/// Reverse producer for stages with no native way to run backward.
pub type Materialized<T> = Rev<vec::IntoIter<T>>;

/// Buffer a full forward pass and hand it back last element first.
///
/// This is the one place a non-reversible stage pays for reversal; every
/// stage without a native reverse producer routes its `rev_iter` here.
pub fn materialize_rev<I>(iter: I, known_count: Option<usize>) -> Materialized<I::Item>
where
    I: Iterator,
{
    let mut buffer = Vec::with_capacity(known_count.unwrap_or_else(|| iter.size_hint().0));
    buffer.extend(iter);
    log::trace!("materialized {} elements for reverse iteration", buffer.len());
    buffer.into_iter().rev()
}

/// Yields its upstream back to front.
///
/// Forward iteration is the upstream's reverse producer and vice versa, so a
/// native reverse capability is used as is and reversing twice gives back the
/// upstream's own forward producer.
#[derive(Debug, Clone)]
pub struct Reverse<S> {
    stream: S,
}

impl<S> Reverse<S> {
    pub(crate) fn new(stream: S) -> Self {
        Self { stream }
    }

    /// The stream being reversed.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Stream> Stream for Reverse<S> {
    type Item = S::Item;
    type Iter<'a> = S::RevIter<'a> where Self: 'a;
    type RevIter<'a> = S::Iter<'a> where Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.stream.rev_iter()
    }

    fn rev_iter(&self) -> Self::RevIter<'_> {
        self.stream.iter()
    }

    fn known_count(&self) -> Option<usize> {
        self.stream.known_count()
    }
}
