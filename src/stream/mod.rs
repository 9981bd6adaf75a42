//! Lazy, re-iterable query streams
//!
//! A pipeline is a chain of stages over a source. Lazy stages (filter, select,
//! select_many, take, skip, distinct) pull one upstream element at a time;
//! eager stages (group_by, order_by, and reversal of anything without a native
//! reverse producer) drain their upstream into a buffer first.

pub mod core;
pub mod constructors;
pub mod advanced;
pub mod reverse;
pub mod grouping;
pub mod ordering;
pub mod terminal;

// Re-export core types
pub use self::core::{Filter, FilterIter, Select, SelectIter, Skip, Stream, StreamExt, Take};

// Re-export constructors
pub use constructors::{
    empty, from_iter, from_single_pass, stream, try_stream,
    EmptyStream, IntoStream, IterStream, ListStream, MapStream, SinglePassStream, SliceStream,
};

// Re-export advanced stages
pub use advanced::{AdvancedStreamExt, Distinct, DistinctIter, SelectMany, SelectManyIter};

// Re-export reversal
pub use reverse::{materialize_rev, Materialized, Reverse};

// Re-export grouping
pub use grouping::{GroupBy, Grouping, GroupingStreamExt};

// Re-export ordering
pub use ordering::{OrderBy, OrderingStreamExt, SortDirection};

// Re-export terminals
pub use terminal::{TerminalStreamExt, ToF64};
