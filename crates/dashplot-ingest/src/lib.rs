// File: crates/dashplot-ingest/src/lib.rs
// Summary: Ingestion entry point; turns blobs, files and URLs into chart input and mounts the result.

pub mod delimited;
pub mod error;
pub mod format;
pub mod header;
pub mod pinglog;
pub mod pipeline;
pub mod source;

pub use delimited::{parse_delimited, ParsedTable};
pub use error::IngestError;
pub use format::{looks_like_ping_log, DataFormat};
pub use header::{looks_like_header, HeaderMode};
pub use pinglog::{aggregate_ping_log, PingAggregate, DEFAULT_PING_LIMIT};
pub use pipeline::{ingest, ChartLoader, IngestOptions, IngestReport, Ingested, Mounted};
pub use source::{FetchedBody, Fetcher, HttpFetcher, Source};
