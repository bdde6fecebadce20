//! Source-embedding encoder: canonical, optionally compressed, checksummed blobs.
//!
//! [`EmbeddingEncoder`] turns a document's raw encoded bytes into the exact
//! byte layout the debug container stores for embedded source: a little-endian
//! `int32` format indicator followed by either the verbatim bytes or a
//! raw-deflate stream (see [`crate::document::EmbeddedBlob`]). The checksum is
//! always computed over the raw bytes as given, never over the blob, so it is
//! identical whether or not compression was applied.
//!
//! # Compression Threshold
//!
//! Content shorter than [`COMPRESSION_THRESHOLD`] bytes is embedded verbatim.
//! Compressing such documents would cost more than the handful of bytes it
//! could save, so compression is not even attempted below the threshold.
//!
//! # Architecture
//!
//! Both encode paths write through a pooled [`crate::buffers::ChunkedBlobSink`]
//! acquired and released within the call; pooling is not observable by the
//! caller. The buffer path knows the content length up front and writes the
//! final prefix immediately. The streaming path consumes a source of
//! initially-unknown size: it writes a placeholder prefix, compresses as it
//! reads, and patches the leading 4 bytes in place once the raw byte count is
//! known.
//!
//! # Thread Safety
//!
//! [`EmbeddingEncoder`] is [`Send`] and [`Sync`]; concurrent encodes each
//! acquire their own sink from the shared pool. Encoding is CPU-bound
//! synchronous work with no suspension points.

use std::io::{Read, Write};

use flate2::write::DeflateEncoder;
use flate2::Compression;

use crate::buffers::SinkPool;
use crate::checksum::ChecksumAlgorithm;
use crate::document::{EmbeddedBlob, SourceDocument};
use crate::{Error, Result};

/// Minimum content length, in bytes, at which compression is attempted.
///
/// Content of exactly this length is compressed; anything shorter is embedded
/// verbatim with a `0` format indicator.
pub const COMPRESSION_THRESHOLD: usize = 200;

/// Read granularity for the streaming encode path.
const STREAM_BUFFER_SIZE: usize = 8 * 1024;

/// Encodes document content into checksummed, length-prefixed debug blobs.
///
/// One encoder serves a whole compilation; it owns the sink pool that backs
/// every encode operation and can be shared freely across worker threads.
///
/// # Examples
///
/// ```rust
/// use srcembed::{ChecksumAlgorithm, EmbeddingEncoder};
///
/// let encoder = EmbeddingEncoder::new();
/// let (checksum, blob) = encoder.encode_bytes(b"short source", ChecksumAlgorithm::Sha256)?;
///
/// assert_eq!(checksum, ChecksumAlgorithm::Sha256.digest(b"short source"));
/// assert_eq!(blob.format_indicator(), 0);
/// assert_eq!(blob.payload(), b"short source");
/// # Ok::<(), srcembed::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct EmbeddingEncoder {
    pool: SinkPool,
}

impl EmbeddingEncoder {
    /// Create an encoder with a default-sized sink pool.
    #[must_use]
    pub fn new() -> Self {
        EmbeddingEncoder {
            pool: SinkPool::new(),
        }
    }

    /// Encode a document's raw encoded bytes into its checksum and blob.
    ///
    /// The checksum is computed over `raw` exactly as given, including any
    /// encoding preamble. Content shorter than [`COMPRESSION_THRESHOLD`] is
    /// embedded verbatim (`N == 0`); zero-length content is valid and yields
    /// the 4-byte blob `{0,0,0,0}`. At or above the threshold the content is
    /// raw-deflate compressed and `N` is the pre-compression length, written
    /// up front since the length is known - it is never patched on this path.
    ///
    /// # Errors
    /// Returns [`Error::InputTooLarge`] when `raw` exceeds `i32::MAX` bytes;
    /// no partial blob is produced.
    pub fn encode_bytes(
        &self,
        raw: &[u8],
        algorithm: ChecksumAlgorithm,
    ) -> Result<(Vec<u8>, EmbeddedBlob)> {
        let Ok(raw_len) = i32::try_from(raw.len()) else {
            return Err(Error::InputTooLarge {
                size: raw.len() as u64,
            });
        };

        let checksum = algorithm.digest(raw);

        let mut sink = self.pool.acquire();
        if raw.len() < COMPRESSION_THRESHOLD {
            sink.write_i32_le(0);
            sink.write_bytes(raw);
        } else {
            sink.write_i32_le(raw_len);
            let mut deflate = DeflateEncoder::new(&mut *sink, Compression::default());
            deflate.write_all(raw)?;
            deflate.finish()?;
        }

        let blob = EmbeddedBlob::from_encoded(sink.materialize_and_reset());
        Ok((checksum, blob))
    }

    /// Encode a streaming source of initially-unknown size.
    ///
    /// Reads until the threshold decision can be made: sources that end below
    /// [`COMPRESSION_THRESHOLD`] are embedded verbatim, exactly as on the
    /// buffer path. Otherwise a 4-byte placeholder prefix is written, the
    /// content is hashed and deflate-compressed as it is read, and the prefix
    /// is patched in place with the raw byte count once the stream ends.
    ///
    /// # Errors
    /// Returns [`Error::InputTooLarge`] as soon as the raw byte count passes
    /// `i32::MAX` (no partial blob is produced), or [`Error::Io`] for read
    /// failures from `reader`.
    pub fn encode_stream<R: Read>(
        &self,
        mut reader: R,
        algorithm: ChecksumAlgorithm,
    ) -> Result<(Vec<u8>, EmbeddedBlob)> {
        let mut buf = [0u8; STREAM_BUFFER_SIZE];

        // Buffer the head of the stream until the threshold decision is known.
        let mut head = Vec::with_capacity(COMPRESSION_THRESHOLD);
        while head.len() < COMPRESSION_THRESHOLD {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }

        let mut hasher = algorithm.hasher();
        let mut sink = self.pool.acquire();

        if head.len() < COMPRESSION_THRESHOLD {
            // Stream ended below the threshold: same verbatim layout as the
            // buffer path, placeholder and patch never come into play.
            hasher.update(&head);
            sink.write_i32_le(0);
            sink.write_bytes(&head);
            let blob = EmbeddedBlob::from_encoded(sink.materialize_and_reset());
            return Ok((hasher.finalize(), blob));
        }

        sink.write_i32_le(0);
        let mut count = head.len() as u64;
        {
            let mut deflate = DeflateEncoder::new(&mut *sink, Compression::default());
            hasher.update(&head);
            deflate.write_all(&head)?;

            loop {
                let n = reader.read(&mut buf)?;
                if n == 0 {
                    break;
                }
                count += n as u64;
                if count > i32::MAX as u64 {
                    return Err(Error::InputTooLarge { size: count });
                }
                hasher.update(&buf[..n]);
                deflate.write_all(&buf[..n])?;
            }
            deflate.finish()?;
        }

        // Exact raw byte count is now known; rewrite the placeholder in place.
        #[allow(clippy::cast_possible_truncation)]
        sink.patch_leading_i32(count as i32);

        let blob = EmbeddedBlob::from_encoded(sink.materialize_and_reset());
        Ok((hasher.finalize(), blob))
    }

    /// Encode one compilation document, validating the embedding contract.
    ///
    /// # Errors
    /// Returns [`Error::EncodingRequired`] when the document has no
    /// determinable text encoding, and otherwise propagates
    /// [`Self::encode_bytes`] failures.
    pub fn encode_document(&self, document: &SourceDocument) -> Result<(Vec<u8>, EmbeddedBlob)> {
        if document.encoding.is_none() {
            return Err(Error::EncodingRequired {
                path: document.path.clone(),
            });
        }
        self.encode_bytes(&document.content, document.checksum_algorithm)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use flate2::read::DeflateDecoder;

    use super::*;
    use crate::document::TextEncoding;

    fn inflate(payload: &[u8]) -> Vec<u8> {
        let mut decoder = DeflateDecoder::new(payload);
        let mut out = Vec::new();
        decoder.read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn test_empty_input_yields_four_zero_bytes() {
        let encoder = EmbeddingEncoder::new();
        let (checksum, blob) = encoder
            .encode_bytes(b"", ChecksumAlgorithm::Sha256)
            .unwrap();

        assert_eq!(blob.as_bytes(), &[0, 0, 0, 0]);
        assert_eq!(checksum, ChecksumAlgorithm::Sha256.digest(b""));
    }

    #[test]
    fn test_below_threshold_is_verbatim() {
        let encoder = EmbeddingEncoder::new();
        let raw = vec![b'x'; COMPRESSION_THRESHOLD - 1];
        let (_, blob) = encoder.encode_bytes(&raw, ChecksumAlgorithm::Sha1).unwrap();

        assert_eq!(blob.format_indicator(), 0);
        assert_eq!(blob.payload(), raw.as_slice());
    }

    #[test]
    fn test_at_threshold_is_compressed() {
        let encoder = EmbeddingEncoder::new();
        let raw = vec![b'x'; COMPRESSION_THRESHOLD];
        let (_, blob) = encoder.encode_bytes(&raw, ChecksumAlgorithm::Sha1).unwrap();

        assert_eq!(blob.format_indicator(), COMPRESSION_THRESHOLD as i32);
        assert!(blob.is_compressed());
        assert_eq!(inflate(blob.payload()), raw);
    }

    #[test]
    fn test_compressed_roundtrip_with_bom() {
        let encoder = EmbeddingEncoder::new();
        let mut raw = vec![0xEF, 0xBB, 0xBF]; // UTF-8 BOM is part of the encoded bytes
        raw.extend_from_slice("// generated\n".repeat(100).as_bytes());

        let (checksum, blob) = encoder
            .encode_bytes(&raw, ChecksumAlgorithm::Sha256)
            .unwrap();

        assert_eq!(blob.format_indicator() as usize, raw.len());
        assert_eq!(inflate(blob.payload()), raw);
        assert_eq!(checksum, ChecksumAlgorithm::Sha256.digest(&raw));
    }

    #[test]
    fn test_checksum_independent_of_compression() {
        let encoder = EmbeddingEncoder::new();
        let short = b"tiny".to_vec();
        let long = vec![b'y'; COMPRESSION_THRESHOLD * 4];

        for raw in [&short, &long] {
            let (checksum, _) = encoder.encode_bytes(raw, ChecksumAlgorithm::Sha1).unwrap();
            assert_eq!(checksum, ChecksumAlgorithm::Sha1.digest(raw));
        }
    }

    #[test]
    fn test_checksum_repeatable() {
        let encoder = EmbeddingEncoder::new();
        let raw = b"repeatable".to_vec();
        let (first, _) = encoder.encode_bytes(&raw, ChecksumAlgorithm::Sha256).unwrap();
        let (second, _) = encoder.encode_bytes(&raw, ChecksumAlgorithm::Sha256).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_stream_path_patches_prefix() {
        let encoder = EmbeddingEncoder::new();
        let raw = "let x = 42;\n".repeat(500).into_bytes();

        let (checksum, blob) = encoder
            .encode_stream(raw.as_slice(), ChecksumAlgorithm::Sha256)
            .unwrap();

        assert_eq!(blob.format_indicator() as usize, raw.len());
        assert_eq!(inflate(blob.payload()), raw);
        assert_eq!(checksum, ChecksumAlgorithm::Sha256.digest(&raw));
    }

    #[test]
    fn test_stream_below_threshold_is_verbatim() {
        let encoder = EmbeddingEncoder::new();
        let raw = b"short stream".to_vec();

        let (checksum, blob) = encoder
            .encode_stream(raw.as_slice(), ChecksumAlgorithm::Sha1)
            .unwrap();

        assert_eq!(blob.format_indicator(), 0);
        assert_eq!(blob.payload(), raw.as_slice());
        assert_eq!(checksum, ChecksumAlgorithm::Sha1.digest(&raw));
    }

    #[test]
    fn test_stream_empty_input() {
        let encoder = EmbeddingEncoder::new();
        let (checksum, blob) = encoder
            .encode_stream(&b""[..], ChecksumAlgorithm::Sha256)
            .unwrap();

        assert_eq!(blob.as_bytes(), &[0, 0, 0, 0]);
        assert_eq!(checksum, ChecksumAlgorithm::Sha256.digest(b""));
    }

    #[test]
    fn test_stream_matches_buffer_encoding_exactly() {
        let encoder = EmbeddingEncoder::new();
        let raw = "public class C {}\n".repeat(200).into_bytes();

        let (buf_checksum, buf_blob) =
            encoder.encode_bytes(&raw, ChecksumAlgorithm::Sha256).unwrap();
        let (stream_checksum, stream_blob) = encoder
            .encode_stream(raw.as_slice(), ChecksumAlgorithm::Sha256)
            .unwrap();

        assert_eq!(buf_checksum, stream_checksum);
        assert_eq!(buf_blob.format_indicator(), stream_blob.format_indicator());
        assert_eq!(inflate(buf_blob.payload()), inflate(stream_blob.payload()));
    }

    #[test]
    fn test_encode_document_requires_encoding() {
        let encoder = EmbeddingEncoder::new();
        let document = SourceDocument::new(
            "/src/no_encoding.cs",
            b"content".to_vec(),
            None,
            ChecksumAlgorithm::Sha256,
        );

        let err = encoder.encode_document(&document).unwrap_err();
        assert!(
            matches!(err, Error::EncodingRequired { path } if path == "/src/no_encoding.cs")
        );
    }

    #[test]
    fn test_encode_document_with_encoding() {
        let encoder = EmbeddingEncoder::new();
        let document = SourceDocument::new(
            "/src/ok.cs",
            b"class C { }".to_vec(),
            Some(TextEncoding::Utf8),
            ChecksumAlgorithm::Sha1,
        );

        let (checksum, blob) = encoder.encode_document(&document).unwrap();
        assert_eq!(checksum, ChecksumAlgorithm::Sha1.digest(b"class C { }"));
        assert_eq!(blob.payload(), b"class C { }");
    }

    #[test]
    fn test_pool_reused_across_encodes() {
        let encoder = EmbeddingEncoder::new();
        for _ in 0..64 {
            let (_, blob) = encoder
                .encode_bytes(b"reuse me", ChecksumAlgorithm::Sha1)
                .unwrap();
            assert_eq!(blob.payload(), b"reuse me");
        }
        assert!(encoder.pool.available() >= 1);
    }
}
