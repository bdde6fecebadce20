//! Checksum algorithms accepted by the debug container for source documents.
//!
//! Every document in a compilation carries a checksum of its raw encoded bytes,
//! stored in the symbol container next to a stable hash-algorithm identifier
//! GUID so external debuggers and tools can verify the content independently.
//!
//! # Key Components
//!
//! - [`ChecksumAlgorithm`] - The supported hash functions with their identifier GUIDs
//! - [`algorithm_guids`] - The well-known GUID constants defined by the Portable PDB format
//!
//! # References
//!
//! - [Portable PDB Format - Document Table](https://github.com/dotnet/core/blob/main/Documentation/diagnostics/portable_pdb.md#document-table-0x30)

use std::str::FromStr;

use sha1::{Digest, Sha1};
use sha2::Sha256;
use strum::{Display, EnumIter, EnumString};
use uguid::Guid;

use crate::{Error, Result};

/// Well-known hash-algorithm identifier GUIDs for the Portable PDB Document table.
///
/// These GUIDs are defined by Microsoft for the Portable PDB specification and
/// are what an external reader uses to pick the verification hash function.
pub mod algorithm_guids {
    use uguid::{guid, Guid};

    /// SHA-1 algorithm GUID: ff1816ec-aa5e-4d10-87f7-6f4963833460
    pub const SHA1: Guid = guid!("ff1816ec-aa5e-4d10-87f7-6f4963833460");

    /// SHA-256 algorithm GUID: 8829d00f-11b8-4213-878b-770e8597ac16
    pub const SHA256: Guid = guid!("8829d00f-11b8-4213-878b-770e8597ac16");
}

/// Hash algorithm used to checksum a source document's raw encoded bytes.
///
/// Each variant maps 1:1 to a supported hash function and to a stable
/// identifier GUID stored in the debug container. An algorithm without a
/// defined identifier is rejected up front ([`Error::UnsupportedChecksumAlgorithm`]),
/// never silently substituted. "No checksum" is not representable here because
/// a document without a checksum algorithm cannot be embedded.
///
/// # Examples
///
/// ```rust
/// use srcembed::ChecksumAlgorithm;
///
/// let algorithm = ChecksumAlgorithm::from_name("sha256")?;
/// assert_eq!(algorithm, ChecksumAlgorithm::Sha256);
///
/// let checksum = algorithm.digest(b"class C { }");
/// assert_eq!(checksum.len(), 32);
/// # Ok::<(), srcembed::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ChecksumAlgorithm {
    /// SHA-1 (160-bit, legacy). Retained for compatibility with existing toolchains.
    #[strum(serialize = "SHA1")]
    Sha1,

    /// SHA-256 (256-bit). The default for new compilations.
    #[strum(serialize = "SHA256")]
    Sha256,
}

impl ChecksumAlgorithm {
    /// Parse an algorithm from its user-facing name, case-insensitively.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedChecksumAlgorithm`] for any name that does
    /// not denote a supported algorithm (including "none", which is invalid
    /// for embedding).
    pub fn from_name(name: &str) -> Result<Self> {
        ChecksumAlgorithm::from_str(name)
            .map_err(|_| Error::UnsupportedChecksumAlgorithm(name.to_string()))
    }

    /// The stable hash-algorithm identifier GUID stored in the debug container.
    #[must_use]
    pub fn guid(&self) -> Guid {
        match self {
            ChecksumAlgorithm::Sha1 => algorithm_guids::SHA1,
            ChecksumAlgorithm::Sha256 => algorithm_guids::SHA256,
        }
    }

    /// The identifier GUID in its 16-byte container representation.
    #[must_use]
    pub fn guid_bytes(&self) -> [u8; 16] {
        self.guid().to_bytes()
    }

    /// Size of this algorithm's checksum, in bytes.
    #[must_use]
    pub fn checksum_len(&self) -> usize {
        match self {
            ChecksumAlgorithm::Sha1 => 20,
            ChecksumAlgorithm::Sha256 => 32,
        }
    }

    /// Compute the checksum of `data`.
    ///
    /// The checksum is always computed over the raw encoded document bytes
    /// exactly as given (including any encoding preamble), independent of
    /// whether the embedded blob ends up compressed.
    #[must_use]
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            ChecksumAlgorithm::Sha1 => {
                let mut hasher = Sha1::new();
                hasher.update(data);
                hasher.finalize().to_vec()
            }
            ChecksumAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(data);
                hasher.finalize().to_vec()
            }
        }
    }

    /// Create an incremental hasher for streamed content.
    pub(crate) fn hasher(&self) -> IncrementalHasher {
        match self {
            ChecksumAlgorithm::Sha1 => IncrementalHasher::Sha1(Sha1::new()),
            ChecksumAlgorithm::Sha256 => IncrementalHasher::Sha256(Sha256::new()),
        }
    }
}

/// Incremental hashing state for the streaming encode path.
pub(crate) enum IncrementalHasher {
    Sha1(Sha1),
    Sha256(Sha256),
}

impl IncrementalHasher {
    pub(crate) fn update(&mut self, data: &[u8]) {
        match self {
            IncrementalHasher::Sha1(h) => h.update(data),
            IncrementalHasher::Sha256(h) => h.update(data),
        }
    }

    pub(crate) fn finalize(self) -> Vec<u8> {
        match self {
            IncrementalHasher::Sha1(h) => h.finalize().to_vec(),
            IncrementalHasher::Sha256(h) => h.finalize().to_vec(),
        }
    }
}
