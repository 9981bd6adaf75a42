//! Configuration types for query stream operations

use serde::{Deserialize, Serialize};

/// Buffer configuration for eager stages (ordering, grouping)
///
/// Eager stages drain their upstream into a buffer before producing anything.
/// When the upstream reports a known count and `use_known_count` is set, the
/// buffer is sized exactly; otherwise it starts at `initial_capacity` and grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferConfig {
    pub initial_capacity: usize,
    pub use_known_count: bool,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 16,
            use_known_count: true,
        }
    }
}

impl BufferConfig {
    /// Create a new buffer configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the capacity used when the upstream count is unknown
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Pre-size buffers from the upstream's known count when it has one
    pub fn use_known_count(mut self, enabled: bool) -> Self {
        self.use_known_count = enabled;
        self
    }

    /// Capacity to reserve for an upstream reporting `known_count`
    pub fn capacity_for(&self, known_count: Option<usize>) -> usize {
        match known_count {
            Some(count) if self.use_known_count => count,
            _ => self.initial_capacity,
        }
    }

    /// Allocate an empty buffer sized for an upstream reporting `known_count`
    pub fn buffer<T>(&self, known_count: Option<usize>) -> Vec<T> {
        Vec::with_capacity(self.capacity_for(known_count))
    }
}
