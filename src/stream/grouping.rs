//! Grouping stage: partitions the upstream by key, keeping first-seen key order.
//!
//! Grouping is eager. Each pass over a [`GroupBy`] drains the upstream once,
//! builds every group in memory, and then hands the groups out one by one.
//! Nothing is cached between passes, so re-iterating always reflects the
//! upstream as it is now.

use std::collections::hash_map::{Entry, HashMap};
use std::convert::identity;
use std::hash::Hash;
use std::iter::Rev;
use std::vec;

use serde::{Deserialize, Serialize};

use crate::stream_configuration::BufferConfig;
use super::constructors::ListStream;
use super::core::Stream;

/// A key together with every element that produced it, in upstream order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grouping<K, E> {
    key: K,
    elements: ListStream<E>,
}

impl<K, E> Grouping<K, E> {
    pub fn new(key: K, elements: Vec<E>) -> Self {
        Self {
            key,
            elements: ListStream::new(elements),
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    /// The grouped elements as a stream of their own.
    pub fn elements(&self) -> &ListStream<E> {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn into_parts(self) -> (K, ListStream<E>) {
        (self.key, self.elements)
    }
}

/// Extension trait providing the grouping stage
pub trait GroupingStreamExt: Stream + Sized {
    /// Group elements by `key_selector`; each group holds the elements themselves.
    fn group_by<K, KF>(self, key_selector: KF) -> GroupBy<Self, KF, fn(Self::Item) -> Self::Item>
    where
        KF: Fn(&Self::Item) -> K,
        K: Eq + Hash + Clone,
    {
        GroupBy::new(self, key_selector, identity as fn(Self::Item) -> Self::Item)
    }

    /// Group elements by `key_selector`, storing `element_selector(element)` in each group.
    fn group_by_with<K, E, KF, EF>(self, key_selector: KF, element_selector: EF) -> GroupBy<Self, KF, EF>
    where
        KF: Fn(&Self::Item) -> K,
        EF: Fn(Self::Item) -> E,
        K: Eq + Hash + Clone,
    {
        GroupBy::new(self, key_selector, element_selector)
    }
}

impl<S: Stream> GroupingStreamExt for S {}

#[derive(Debug, Clone)]
pub struct GroupBy<S, KF, EF> {
    stream: S,
    key_selector: KF,
    element_selector: EF,
    config: BufferConfig,
}

impl<S, KF, EF> GroupBy<S, KF, EF> {
    fn new(stream: S, key_selector: KF, element_selector: EF) -> Self {
        Self {
            stream,
            key_selector,
            element_selector,
            config: BufferConfig::default(),
        }
    }

    /// Override how the group list is pre-sized.
    pub fn with_buffer_config(mut self, config: BufferConfig) -> Self {
        self.config = config;
        self
    }
}

impl<S, KF, EF, K, E> GroupBy<S, KF, EF>
where
    S: Stream,
    KF: Fn(&S::Item) -> K,
    EF: Fn(S::Item) -> E,
    K: Eq + Hash + Clone,
{
    fn groupings(&self) -> Vec<Grouping<K, E>> {
        let mut slots: HashMap<K, usize> = HashMap::new();
        let mut groups: Vec<(K, Vec<E>)> = self.config.buffer(None);
        let mut total = 0usize;

        for item in self.stream.iter() {
            let key = (self.key_selector)(&item);
            let element = (self.element_selector)(item);
            total += 1;

            match slots.entry(key) {
                Entry::Occupied(slot) => groups[*slot.get()].1.push(element),
                Entry::Vacant(slot) => {
                    groups.push((slot.key().clone(), vec![element]));
                    slot.insert(groups.len() - 1);
                }
            }
        }

        log::trace!("grouped {} elements into {} groups", total, groups.len());
        groups
            .into_iter()
            .map(|(key, elements)| Grouping::new(key, elements))
            .collect()
    }
}

impl<S, KF, EF, K, E> Stream for GroupBy<S, KF, EF>
where
    S: Stream,
    KF: Fn(&S::Item) -> K,
    EF: Fn(S::Item) -> E,
    K: Eq + Hash + Clone,
{
    type Item = Grouping<K, E>;
    type Iter<'a> = vec::IntoIter<Grouping<K, E>> where Self: 'a;
    type RevIter<'a> = Rev<vec::IntoIter<Grouping<K, E>>> where Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.groupings().into_iter()
    }

    // Groups in reverse first-seen order; each group's elements keep upstream order.
    fn rev_iter(&self) -> Self::RevIter<'_> {
        self.groupings().into_iter().rev()
    }
}
