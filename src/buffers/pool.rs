//! Bounded pool of reusable [`ChunkedBlobSink`] instances.
//!
//! Each document encode needs short-lived scratch capacity; allocating it per
//! document would churn the heap across thousands of documents. The pool keeps
//! a bounded free list of reset sinks, handing one out per encoding operation
//! and taking it back when the operation's guard drops.
//!
//! # Retention Policy
//!
//! Real compilations are bimodal: almost all documents fit in one 32 KiB chunk,
//! while rare huge generated files grow a sink to many chunks. Retaining those
//! grown instances would let pooled capacity balloon, so a sink whose chunk
//! count exceeds [`POOL_RETAIN_CHUNKS`] on release is dropped instead of pooled.
//! This is the size-based realization of the pooled/unpooled sink split.
//!
//! # Thread Safety
//!
//! [`SinkPool`] supports concurrent `acquire`/`release` from multiple threads
//! through a mutex-protected free list. Each handed-out instance is
//! single-writer for its lifetime between acquire and release; document-level
//! parallelism works by every worker acquiring its own instance.

use std::sync::Mutex;

use crate::buffers::sink::ChunkedBlobSink;

/// Maximum number of reset sink instances the pool retains.
pub const POOL_CAPACITY: usize = 16;

/// Maximum chunk count a sink may have grown to and still be retained on release.
///
/// 8 chunks of 32 KiB bounds retained per-instance capacity at 256 KiB; sinks
/// that served a larger payload are dropped rather than pooled.
pub const POOL_RETAIN_CHUNKS: usize = 8;

/// A bounded, thread-safe pool of [`ChunkedBlobSink`] instances.
///
/// Acquired sinks are returned automatically when their [`PooledSink`] guard
/// drops: the sink is reset, and retained only if the pool has room and the
/// instance did not grow past [`POOL_RETAIN_CHUNKS`].
///
/// # Examples
///
/// ```rust
/// use srcembed::buffers::SinkPool;
///
/// let pool = SinkPool::new();
/// let mut sink = pool.acquire();
/// sink.write_bytes(b"scratch");
/// let blob = sink.materialize_and_reset();
/// assert_eq!(blob, b"scratch");
/// // dropping `sink` returns the instance to the pool
/// ```
#[derive(Debug)]
pub struct SinkPool {
    free: Mutex<Vec<ChunkedBlobSink>>,
    capacity: usize,
}

impl SinkPool {
    /// Create a pool retaining at most [`POOL_CAPACITY`] instances.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(POOL_CAPACITY)
    }

    /// Create a pool retaining at most `capacity` instances.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        SinkPool {
            free: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
        }
    }

    /// Acquire a sink, reusing a pooled instance when one is available.
    ///
    /// The returned guard dereferences to the sink and releases it back to
    /// the pool on drop. The instance must only be written by the acquiring
    /// operation until then.
    #[must_use]
    pub fn acquire(&self) -> PooledSink<'_> {
        let sink = self.lock_free().pop().unwrap_or_default();
        PooledSink {
            pool: self,
            sink: Some(sink),
        }
    }

    /// Number of instances currently resident in the free list.
    #[must_use]
    pub fn available(&self) -> usize {
        self.lock_free().len()
    }

    /// Take a sink back, resetting it and applying the retention policy.
    fn release(&self, mut sink: ChunkedBlobSink) {
        if sink.chunk_count() > POOL_RETAIN_CHUNKS {
            return;
        }
        sink.reset();
        let mut free = self.lock_free();
        if free.len() < self.capacity {
            free.push(sink);
        }
    }

    /// Lock the free list, recovering from poisoning.
    ///
    /// A worker panicking mid-encode poisons the mutex but cannot leave the
    /// free list itself inconsistent: it only ever holds reset instances, and
    /// every acquired sink is reset again on release. Recovering here keeps
    /// one document's failure from corrupting the pool for its siblings.
    fn lock_free(&self) -> std::sync::MutexGuard<'_, Vec<ChunkedBlobSink>> {
        self.free
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Default for SinkPool {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard over a pool-owned [`ChunkedBlobSink`].
///
/// Dereferences to the underlying sink; dropping the guard releases the
/// instance back to its [`SinkPool`].
#[derive(Debug)]
pub struct PooledSink<'a> {
    pool: &'a SinkPool,
    sink: Option<ChunkedBlobSink>,
}

impl std::ops::Deref for PooledSink<'_> {
    type Target = ChunkedBlobSink;

    fn deref(&self) -> &Self::Target {
        self.sink.as_ref().expect("sink present until drop")
    }
}

impl std::ops::DerefMut for PooledSink<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.sink.as_mut().expect("sink present until drop")
    }
}

impl Drop for PooledSink<'_> {
    fn drop(&mut self) {
        if let Some(sink) = self.sink.take() {
            self.pool.release(sink);
        }
    }
}
