//! # srcembed Prelude
//!
//! This module provides a convenient prelude for the most commonly used types
//! from the srcembed library. Import this module to get quick access to the
//! essential types of the source-embedding pipeline.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all srcembed operations
pub use crate::Error;

/// The result type used throughout srcembed
pub use crate::Result;

// ================================================================================================
// Documents and Records
// ================================================================================================

/// A source input tracked across the compilation
pub use crate::document::SourceDocument;

/// Text encodings a front end produces
pub use crate::document::TextEncoding;

/// The length-prefixed, optionally compressed embedded payload
pub use crate::document::EmbeddedBlob;

/// The per-document transfer object for the external symbol writer
pub use crate::document::DebugSourceRecord;

// ================================================================================================
// Encoding
// ================================================================================================

/// Supported checksum algorithms with their identifier GUIDs
pub use crate::checksum::ChecksumAlgorithm;

/// The source-embedding encoder
pub use crate::encoder::{EmbeddingEncoder, COMPRESSION_THRESHOLD};

/// Pooled, chunked buffer machinery
pub use crate::buffers::{ChunkedBlobSink, SinkPool};

// ================================================================================================
// Selection and Orchestration
// ================================================================================================

/// The user's embed selection and its resolution
pub use crate::selection::{EmbedSelectionSpec, SelectionKind, SelectionOptions, SelectionOutcome};

/// The per-compilation embedding phase
pub use crate::pipeline::{EmbedOptions, EmbedOutcome, EmbeddingPipeline};

/// Non-fatal diagnostics surfaced to the user
pub use crate::diagnostics::{Diagnostic, Severity};

/// External path-normalization seam and its bounded cache
pub use crate::paths::{PathNormalizationCache, SourceResolver};
