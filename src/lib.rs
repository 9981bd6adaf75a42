pub mod error;
pub mod stream;
pub mod stream_configuration;

// Re-export the public surface of the stream module at the crate root
pub use stream::{
    empty, from_iter, from_single_pass, materialize_rev, stream, try_stream,
    AdvancedStreamExt, Distinct, EmptyStream, Filter, GroupBy, Grouping, GroupingStreamExt,
    IntoStream, IterStream, ListStream, MapStream, Materialized, OrderBy, OrderingStreamExt,
    Reverse, Select, SelectMany, SinglePassStream, Skip, SliceStream, SortDirection, Stream,
    StreamExt, Take, TerminalStreamExt, ToF64,
};
pub use error::{QueryError, QueryResult};
pub use stream_configuration::BufferConfig;
