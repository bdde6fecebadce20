//! Source documents and the per-document records handed to the symbol writer.
//!
//! A compilation's front end owns its [`SourceDocument`] set; this crate only
//! reads them. For every document the embedding phase produces one immutable
//! [`DebugSourceRecord`] bundling the document's identity, checksum, and
//! (when selected) its [`EmbeddedBlob`], decoupling the pipeline's internals
//! from the debug container format.
//!
//! # Key Components
//!
//! - [`SourceDocument`] - A source input with raw encoded bytes, encoding, and checksum algorithm
//! - [`TextEncoding`] - The text encodings a front end produces
//! - [`EmbeddedBlob`] - The length-prefixed, optionally compressed payload
//! - [`DebugSourceRecord`] - The transfer object consumed by the external symbol writer
//!
//! # Blob Layout
//!
//! ```text
//! offset 0..3  : int32 N (little-endian)
//! offset 4..   : payload
//!   N == 0 -> raw encoded document bytes, verbatim (including any BOM)
//!   N  > 0 -> raw-deflate stream; inflating it yields exactly N bytes equal
//!             to the raw encoded document bytes
//!   N  < 0 -> reserved; never produced
//! ```

use crate::checksum::ChecksumAlgorithm;

/// Text encoding of a source document's raw bytes.
///
/// The embedding contract only depends on an encoding being *known*: the
/// checksum and blob are computed over the encoded bytes exactly as given,
/// so a document whose encoding cannot be determined cannot be embedded
/// ([`crate::Error::EncodingRequired`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8 without a byte-order mark
    Utf8,
    /// UTF-8 with a leading byte-order mark (the BOM is part of the encoded bytes)
    Utf8WithBom,
    /// UTF-16 little-endian
    Utf16Le,
    /// UTF-16 big-endian
    Utf16Be,
}

/// A single source input tracked across the compilation.
///
/// Identity is the absolute file path as the user wrote it, which may be
/// non-normalized (it can contain `.` / `..` segments). The raw content is
/// the document's encoded byte sequence including any encoding preamble.
/// Owned by the external front end; the embedding core only reads it.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Absolute file path identifying the document, not necessarily normalized
    pub path: String,
    /// Raw encoded content bytes, including any byte-order mark
    pub content: Vec<u8>,
    /// Text encoding of `content`, when determinable
    pub encoding: Option<TextEncoding>,
    /// Checksum algorithm chosen by the front end for this document
    pub checksum_algorithm: ChecksumAlgorithm,
}

impl SourceDocument {
    /// Create a document from its parts.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        content: Vec<u8>,
        encoding: Option<TextEncoding>,
        checksum_algorithm: ChecksumAlgorithm,
    ) -> Self {
        SourceDocument {
            path: path.into(),
            content,
            encoding,
            checksum_algorithm,
        }
    }
}

/// The length-prefixed, optionally compressed byte payload embedded for a document.
///
/// Immutable once produced by the encoder. The leading 4 bytes are a
/// little-endian signed 32-bit format indicator `N`: `0` means the payload is
/// the raw encoded bytes verbatim, a positive value means the payload is a
/// raw-deflate stream inflating to exactly `N` bytes. Negative values are
/// reserved and never produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedBlob {
    bytes: Vec<u8>,
}

impl EmbeddedBlob {
    /// Wrap encoder output. Callers must have written a valid leading prefix.
    pub(crate) fn from_encoded(bytes: Vec<u8>) -> Self {
        debug_assert!(bytes.len() >= 4);
        EmbeddedBlob { bytes }
    }

    /// The complete blob bytes, prefix included, as stored in the container.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The leading little-endian format indicator `N`.
    #[must_use]
    pub fn format_indicator(&self) -> i32 {
        i32::from_le_bytes([self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3]])
    }

    /// The payload bytes following the 4-byte prefix.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.bytes[4..]
    }

    /// Whether the payload is a raw-deflate stream rather than verbatim bytes.
    #[must_use]
    pub fn is_compressed(&self) -> bool {
        self.format_indicator() > 0
    }
}

/// Immutable per-document result handed to the external symbol writer.
///
/// Bundles the document's identity, its checksum algorithm identifier GUID,
/// the checksum bytes, and the optional embedded blob. Created once per
/// checksummed document per compilation and consumed exactly once by the
/// writer; it carries no behavior beyond construction and access.
#[derive(Debug, Clone)]
pub struct DebugSourceRecord {
    path: String,
    checksum_algorithm: ChecksumAlgorithm,
    checksum: Vec<u8>,
    blob: Option<EmbeddedBlob>,
}

impl DebugSourceRecord {
    /// Assemble a record from a document's checksum and optional blob.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        checksum_algorithm: ChecksumAlgorithm,
        checksum: Vec<u8>,
        blob: Option<EmbeddedBlob>,
    ) -> Self {
        DebugSourceRecord {
            path: path.into(),
            checksum_algorithm,
            checksum,
            blob,
        }
    }

    /// The document's display path (normalized when a resolver was supplied).
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The checksum algorithm used for this document.
    #[must_use]
    pub fn checksum_algorithm(&self) -> ChecksumAlgorithm {
        self.checksum_algorithm
    }

    /// The algorithm identifier GUID stored alongside the checksum.
    #[must_use]
    pub fn checksum_algorithm_id(&self) -> [u8; 16] {
        self.checksum_algorithm.guid_bytes()
    }

    /// The checksum of the raw encoded document bytes.
    #[must_use]
    pub fn checksum(&self) -> &[u8] {
        &self.checksum
    }

    /// The embedded blob, present only for documents selected for embedding.
    #[must_use]
    pub fn blob(&self) -> Option<&EmbeddedBlob> {
        self.blob.as_ref()
    }
}
