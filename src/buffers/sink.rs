//! Chunked append-only byte sink for blob construction.
//!
//! [`ChunkedBlobSink`] is the write target for every blob the embedding encoder
//! produces. It grows in fixed-size chunks instead of reallocating one contiguous
//! buffer, so encoding thousands of documents does not churn the heap and very
//! large generated files never force a single large allocation.
//!
//! # Architecture
//!
//! Content lives in a list of chunks of [`CHUNK_SIZE`] bytes. Writes append to
//! the last chunk and spill into a fresh chunk when it fills. The contract is
//! deliberately narrow: append operations, one bounded patch of the leading
//! 4 bytes (for length prefixes written before the length is known), and a
//! materialize-and-reset snapshot. There is no general random access.
//!
//! The sink implements [`std::io::Write`] so a `flate2::write::DeflateEncoder`
//! can compress directly into it.
//!
//! # Thread Safety
//!
//! A sink instance is single-writer: it is used by exactly one encoding
//! operation at a time. Concurrent encodes each acquire their own instance
//! from the [`crate::buffers::SinkPool`].

/// Fixed chunk size for [`ChunkedBlobSink`], in bytes.
///
/// 32 KiB is large enough that the overwhelming majority of real source
/// documents never allocate a second chunk, and small enough to stay off
/// large-object allocation paths.
pub const CHUNK_SIZE: usize = 32 * 1024;

/// A write-only, growable byte sink organized in fixed-size chunks.
///
/// Supports appending bytes, one in-place rewrite of the leading 4 bytes
/// (used to patch a length prefix once a streamed payload's size is known),
/// and snapshotting the accumulated content while resetting the sink for
/// reuse. Instances are pooled via [`crate::buffers::SinkPool`] and must only
/// be written by one encoding operation between acquire and release.
///
/// # Examples
///
/// ```rust
/// use srcembed::buffers::ChunkedBlobSink;
///
/// let mut sink = ChunkedBlobSink::new();
/// sink.write_i32_le(0);
/// sink.write_bytes(b"payload");
/// sink.patch_leading_i32(7);
///
/// let bytes = sink.materialize_and_reset();
/// assert_eq!(&bytes[..4], &7i32.to_le_bytes());
/// assert_eq!(&bytes[4..], b"payload");
/// assert_eq!(sink.len(), 0);
/// ```
#[derive(Debug)]
pub struct ChunkedBlobSink {
    /// Filled chunks, each exactly `CHUNK_SIZE` bytes long
    full: Vec<Vec<u8>>,
    /// Chunk currently being appended to, always < `CHUNK_SIZE` bytes long
    current: Vec<u8>,
}

impl ChunkedBlobSink {
    /// Create an empty sink with a single empty chunk.
    #[must_use]
    pub fn new() -> Self {
        ChunkedBlobSink {
            full: Vec::new(),
            current: Vec::with_capacity(CHUNK_SIZE),
        }
    }

    /// Total number of bytes written since the last reset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.full.len() * CHUNK_SIZE + self.current.len()
    }

    /// Returns `true` if no bytes have been written since the last reset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full.is_empty() && self.current.is_empty()
    }

    /// Number of chunks currently held, filled and partial.
    ///
    /// Used by the pool's release-time retention policy to decide whether an
    /// instance grew past the ordinary-file size and should not be retained.
    #[must_use]
    pub(crate) fn chunk_count(&self) -> usize {
        self.full.len() + 1
    }

    /// Append a single byte.
    pub fn write_byte(&mut self, value: u8) {
        if self.current.len() == CHUNK_SIZE {
            self.spill();
        }
        self.current.push(value);
    }

    /// Append a slice of bytes, spilling into new chunks as needed.
    pub fn write_bytes(&mut self, mut bytes: &[u8]) {
        while !bytes.is_empty() {
            if self.current.len() == CHUNK_SIZE {
                self.spill();
            }
            let room = CHUNK_SIZE - self.current.len();
            let take = room.min(bytes.len());
            self.current.extend_from_slice(&bytes[..take]);
            bytes = &bytes[take..];
        }
    }

    /// Append a signed 32-bit integer in little-endian byte order.
    ///
    /// Convenience for the blob format's length prefix.
    pub fn write_i32_le(&mut self, value: i32) {
        self.write_bytes(&value.to_le_bytes());
    }

    /// Rewrite the first 4 bytes of the very first chunk in place.
    ///
    /// This is the one permitted mutation of already-appended content: a
    /// length prefix written as a placeholder before a streamed payload is
    /// patched here once the exact byte count is known.
    ///
    /// # Panics
    ///
    /// Panics if fewer than 4 bytes have been written. That indicates an
    /// invariant violation in the caller (patching a prefix that was never
    /// emitted), not a recoverable condition.
    pub fn patch_leading_i32(&mut self, value: i32) {
        assert!(
            self.len() >= 4,
            "patch_leading_i32 requires at least 4 written bytes"
        );
        let first = if self.full.is_empty() {
            &mut self.current
        } else {
            &mut self.full[0]
        };
        first[..4].copy_from_slice(&value.to_le_bytes());
    }

    /// Snapshot the accumulated content and reset the sink to a single empty chunk.
    ///
    /// Returns the content as one contiguous, immutable byte sequence. After
    /// this call the sink is empty and ready for reuse; a pooled caller must
    /// not keep writing without reacquiring it.
    #[must_use]
    pub fn materialize_and_reset(&mut self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        for chunk in &self.full {
            out.extend_from_slice(chunk);
        }
        out.extend_from_slice(&self.current);
        self.reset();
        out
    }

    /// Discard all content, keeping a single empty chunk.
    pub(crate) fn reset(&mut self) {
        self.full.clear();
        self.current.clear();
    }

    /// Move the filled current chunk into the full list and start a fresh one.
    fn spill(&mut self) {
        debug_assert_eq!(self.current.len(), CHUNK_SIZE);
        let filled = std::mem::replace(&mut self.current, Vec::with_capacity(CHUNK_SIZE));
        self.full.push(filled);
    }
}

impl Default for ChunkedBlobSink {
    fn default() -> Self {
        Self::new()
    }
}

impl std::io::Write for ChunkedBlobSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.write_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
