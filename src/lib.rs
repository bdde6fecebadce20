// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # srcembed
//!
//! Source-embedding encoder and selection policy for Portable PDB debug information.
//!
//! `srcembed` is the piece of a compiler's debug-information pipeline that decides
//! which source documents get their literal text embedded inside the program's
//! symbol container, and produces the exact byte layout of that embedded payload.
//! The container's EmbeddedSource blob is a binary-format contract: any deviation
//! breaks the external debuggers and tools that parse it.
//!
//! ## Features
//!
//! - **Bit-exact blob encoding** - Little-endian length prefix plus verbatim or
//!   raw-deflate payload, per the Portable PDB EmbeddedSource format
//! - **Threshold-based compression** - Small documents are embedded verbatim;
//!   compression is only attempted where it pays
//! - **Pooled chunked buffers** - Thousands of documents reuse a bounded pool of
//!   32 KiB-chunked sinks instead of churning the heap
//! - **Document-level parallelism** - The per-document encode step runs across
//!   worker threads with per-document failure isolation
//! - **Selection policy** - The CLI's "embed all" / "embed these files" semantics
//!   with their conflict and validation rules
//!
//! ## Quick Start
//!
//! ```rust
//! use srcembed::prelude::*;
//!
//! let documents = vec![SourceDocument::new(
//!     "/src/main.cs",
//!     b"class Program { static void Main() { } }".to_vec(),
//!     Some(TextEncoding::Utf8),
//!     ChecksumAlgorithm::Sha256,
//! )];
//!
//! let pipeline = EmbeddingPipeline::new();
//! let outcome = pipeline.embed_documents(&documents, &EmbedSelectionSpec::all(), None, None)?;
//!
//! for record in &outcome.records {
//!     println!("{}: {} checksum bytes, embedded: {}",
//!         record.path(), record.checksum().len(), record.blob().is_some());
//! }
//! # Ok::<(), srcembed::Error>(())
//! ```
//!
//! ## Blob Layout
//!
//! The embedded payload for a document is bit-exact, little-endian:
//!
//! ```text
//! offset 0..3  : int32  N
//! offset 4..   : payload
//!   N == 0 -> payload = raw encoded document bytes (verbatim, including any BOM)
//!   N  > 0 -> payload = raw-deflate stream; inflate(payload) has length N and
//!             equals the raw encoded document bytes
//!   N  < 0 -> reserved; never produced
//! ```
//!
//! The checksum stored alongside is always computed over the raw encoded document
//! bytes using the document's declared algorithm, never over the blob.
//!
//! ## Architecture
//!
//! - [`buffers`] - Pooled, chunked byte sinks everything writes through
//! - [`checksum`] - Supported hash algorithms and their identifier GUIDs
//! - [`document`] - Documents, blobs, and the per-document transfer record
//! - [`encoder`] - The embedding encoder (buffer and streaming paths)
//! - [`paths`] - Bounded memoization of external path-normalization lookups
//! - [`selection`] - The user's embed selection and its resolution rules
//! - [`pipeline`] - The per-compilation embedding phase
//! - [`diagnostics`] - Non-fatal warnings and per-document errors
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Out of Scope
//!
//! This crate does not parse source into documents, does not serialize the debug
//! container itself (records are handed to an external symbol writer), does not
//! decode embedded blobs back, and does not implement path normalization (it only
//! caches a resolver's output behind the [`paths::SourceResolver`] seam).

pub(crate) mod error;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust
/// use srcembed::prelude::*;
///
/// let encoder = EmbeddingEncoder::new();
/// let (checksum, blob) = encoder.encode_bytes(b"class C { }", ChecksumAlgorithm::Sha1)?;
/// assert_eq!(blob.format_indicator(), 0);
/// # Ok::<(), srcembed::Error>(())
/// ```
pub mod prelude;

pub mod buffers;
pub mod checksum;
pub mod diagnostics;
pub mod document;
pub mod encoder;
pub mod paths;
pub mod pipeline;
pub mod selection;

/// `srcembed` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is
/// always [`Error`]. Used consistently throughout the crate for all fallible
/// operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `srcembed` Error type
///
/// The main error type for all operations in this crate, covering configuration,
/// resource, and selection failures of the embedding phase.
pub use error::Error;

pub use checksum::ChecksumAlgorithm;
pub use diagnostics::{Diagnostic, Severity};
pub use document::{DebugSourceRecord, EmbeddedBlob, SourceDocument, TextEncoding};
pub use encoder::{EmbeddingEncoder, COMPRESSION_THRESHOLD};
pub use pipeline::{EmbedOptions, EmbedOutcome, EmbeddingPipeline};
pub use selection::{EmbedSelectionSpec, SelectionKind, SelectionOutcome};
