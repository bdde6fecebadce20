use thiserror::Error;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all possible failure conditions that can occur while selecting documents
/// for source embedding and while encoding their content into debug blobs. Each variant maps
/// to one class of the embedding pipeline's error taxonomy.
///
/// # Error Categories
///
/// ## Configuration Errors
/// Contract violations by the front end, rejected before any encoding begins:
/// - [`Error::UnsupportedChecksumAlgorithm`] - Checksum algorithm name not recognized
/// - [`Error::EncodingRequired`] - Document selected for embedding has no determinable encoding
///
/// ## Resource Errors
/// Per-document failures that do not affect sibling documents:
/// - [`Error::InputTooLarge`] - Document content exceeds the addressable length limit
///
/// ## Selection Errors
/// Fatal for the whole compilation; abort the embedding phase before any work:
/// - [`Error::FileNotInCompilation`] - A requested embed path matches no document
///
/// ## Infrastructure Errors
/// - [`Error::Io`] - I/O failure from the compression stream or a streaming source
/// - [`Error::Cancelled`] - The enclosing compilation was cancelled between documents
///
/// # Examples
///
/// ```rust
/// use srcembed::{ChecksumAlgorithm, EmbeddingEncoder, Error};
///
/// let encoder = EmbeddingEncoder::new();
/// match encoder.encode_bytes(b"class C { }", ChecksumAlgorithm::Sha256) {
///     Ok((checksum, blob)) => {
///         println!("checksum: {} bytes, blob: {} bytes", checksum.len(), blob.as_bytes().len());
///     }
///     Err(Error::InputTooLarge { size }) => {
///         eprintln!("document too large to embed: {size} bytes");
///     }
///     Err(e) => eprintln!("embedding failed: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The requested checksum algorithm is not supported by the debug container.
    ///
    /// Every algorithm accepted for embedding must have a defined hash-algorithm
    /// identifier GUID. An unknown name is an error, never a silent fallback.
    #[error("Unsupported checksum algorithm - '{0}'")]
    UnsupportedChecksumAlgorithm(String),

    /// A document was selected for embedding but carries no determinable text encoding.
    ///
    /// The checksum and blob are computed over the document's encoded bytes, so a
    /// document without an encoding cannot be embedded. The front end is expected
    /// to validate this before handing documents to the encoder; the associated
    /// path names the offending document as the user wrote it.
    #[error("Document requires an explicit text encoding to be embedded - '{path}'")]
    EncodingRequired {
        /// Path of the document lacking an encoding, as written by the user
        path: String,
    },

    /// Document content exceeds the addressable length limit of the blob format.
    ///
    /// The blob's length prefix is a signed 32-bit integer, so content past
    /// `i32::MAX` bytes cannot be represented. No partial blob is produced.
    ///
    /// The embedding pipeline reports this per document, naming the offending
    /// path in its diagnostics; sibling documents proceed independently.
    #[error("Document content of {size} bytes exceeds the embeddable size limit")]
    InputTooLarge {
        /// Number of content bytes the encoder counted before aborting
        size: u64,
    },

    /// A path requested for embedding matches no document in the compilation.
    ///
    /// This is fatal for the whole run, not just the offending path: the user's
    /// request cannot be honored as given. The associated path is the resolved
    /// absolute path of the request.
    #[error("File to embed is not part of the compilation - '{path}'")]
    FileNotInCompilation {
        /// Resolved absolute path of the request that matched nothing
        path: String,
    },

    /// I/O error.
    ///
    /// Wraps failures from the deflate compression stream or from reading a
    /// streaming source during encoding.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The enclosing compilation was cancelled.
    ///
    /// Cancellation is observed at per-document granularity; an in-flight
    /// single-document encode runs to completion before this is surfaced.
    #[error("Embedding phase was cancelled")]
    Cancelled,
}
