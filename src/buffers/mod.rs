//! Pooled, chunked buffer machinery for blob construction.
//!
//! Every blob the embedding encoder produces is written through a
//! [`ChunkedBlobSink`]; sinks are acquired from a bounded [`SinkPool`] so a
//! compilation with thousands of documents reuses a handful of instances
//! instead of allocating scratch buffers per document.
//!
//! # Key Components
//!
//! - [`ChunkedBlobSink`] - Write-only byte sink organized in fixed-size chunks
//! - [`SinkPool`] - Bounded pool with guard-based acquire/release
//! - [`PooledSink`] - Drop guard that releases an acquired sink

mod pool;
mod sink;

pub use pool::{PooledSink, SinkPool, POOL_CAPACITY, POOL_RETAIN_CHUNKS};
pub use sink::{ChunkedBlobSink, CHUNK_SIZE};
