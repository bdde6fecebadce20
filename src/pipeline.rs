//! The embedding phase: selection, parallel encoding, record collection.
//!
//! Runs once per compilation. Selection is resolved first (fatal selection
//! errors abort before any encoding work), then every document is encoded in
//! parallel - the per-document step is embarrassingly parallel CPU-bound work
//! with no cross-document ordering requirement. Results are collected in
//! whatever order workers finish and re-associated with their documents by
//! index, so the output is deterministic.
//!
//! # Failure Isolation
//!
//! A failure encoding one document (for example [`crate::Error::InputTooLarge`])
//! is reported as that document's error diagnostic; sibling documents proceed
//! independently and neither the sink pool nor the normalization cache is
//! affected.
//!
//! # Cancellation
//!
//! The enclosing compilation may be cancelled between documents. The flag is
//! checked at per-document granularity: an in-flight single-document encode
//! runs to completion (it is short and has no externally observable side
//! effects until its result is collected), remaining documents are skipped,
//! and the phase returns [`crate::Error::Cancelled`].

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::diagnostics::Diagnostic;
use crate::document::{DebugSourceRecord, SourceDocument};
use crate::encoder::EmbeddingEncoder;
use crate::paths::{PathNormalizationCache, SourceResolver};
use crate::selection::{resolve_with, EmbedSelectionSpec, SelectionOptions};
use crate::{Error, Result};

/// Options for one run of the embedding phase.
#[derive(Debug, Clone, Default)]
pub struct EmbedOptions {
    /// Selection resolution knobs
    pub selection: SelectionOptions,
    /// Base path handed to the resolver when normalizing display paths
    pub base_path: Option<String>,
}

/// Everything the embedding phase hands back to the compilation.
///
/// `records` holds one [`DebugSourceRecord`] per document, in document order,
/// ready for the external symbol writer. `diagnostics` holds the selection
/// warnings and per-document encode errors, in a deterministic order; a
/// successful run has an empty set.
#[derive(Debug)]
pub struct EmbedOutcome {
    /// Per-document records for the symbol writer, in document order
    pub records: Vec<DebugSourceRecord>,
    /// Selection warnings and per-document encode errors
    pub diagnostics: Vec<Diagnostic>,
}

impl EmbedOutcome {
    /// Returns `true` if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity() == crate::diagnostics::Severity::Error)
    }
}

/// Orchestrates the per-compilation embedding phase.
///
/// Owns the encoder (and with it the sink pool) and the path-normalization
/// cache; both are created once and shared across all worker threads of the
/// phase.
///
/// # Examples
///
/// ```rust
/// use srcembed::{
///     ChecksumAlgorithm, EmbedSelectionSpec, EmbeddingPipeline, SourceDocument, TextEncoding,
/// };
///
/// let documents = vec![SourceDocument::new(
///     "/src/main.cs",
///     b"class Program { }".to_vec(),
///     Some(TextEncoding::Utf8),
///     ChecksumAlgorithm::Sha256,
/// )];
///
/// let pipeline = EmbeddingPipeline::new();
/// let outcome = pipeline.embed_documents(&documents, &EmbedSelectionSpec::all(), None, None)?;
///
/// assert_eq!(outcome.records.len(), 1);
/// assert!(outcome.records[0].blob().is_some());
/// # Ok::<(), srcembed::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct EmbeddingPipeline {
    encoder: EmbeddingEncoder,
    cache: PathNormalizationCache,
    options: EmbedOptions,
}

impl EmbeddingPipeline {
    /// Create a pipeline with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(EmbedOptions::default())
    }

    /// Create a pipeline with explicit options.
    #[must_use]
    pub fn with_options(options: EmbedOptions) -> Self {
        EmbeddingPipeline {
            encoder: EmbeddingEncoder::new(),
            cache: PathNormalizationCache::new(),
            options,
        }
    }

    /// Run the embedding phase over the compilation's documents.
    ///
    /// Resolves `spec`, then encodes every document in parallel: selected
    /// documents get a checksum and an embedded blob, the rest get a checksum
    /// only. Display paths are normalized through `resolver` when one is
    /// supplied, memoized in the pipeline's cache.
    ///
    /// # Errors
    /// Returns [`Error::FileNotInCompilation`] when selection names a file
    /// outside the compilation (fatal before any encoding), or
    /// [`Error::Cancelled`] when `cancel` was raised. Per-document encode
    /// failures do not fail the phase; they surface as error diagnostics in
    /// the outcome.
    pub fn embed_documents(
        &self,
        documents: &[SourceDocument],
        spec: &EmbedSelectionSpec,
        resolver: Option<&dyn SourceResolver>,
        cancel: Option<&AtomicBool>,
    ) -> Result<EmbedOutcome> {
        let selection = resolve_with(spec, documents, self.options.selection)?;
        let mut diagnostics = selection.diagnostics;

        let results: boxcar::Vec<(usize, Result<DebugSourceRecord>)> = boxcar::Vec::new();
        documents
            .par_iter()
            .enumerate()
            .for_each(|(index, document)| {
                if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                    return;
                }
                let embed = selection.decisions[index];
                results.push((index, self.encode_one(document, embed, resolver)));
            });

        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Err(Error::Cancelled);
        }

        // Workers finish in any order; re-associate with document order.
        let mut indexed: Vec<(usize, Result<DebugSourceRecord>)> = results.into_iter().collect();
        indexed.sort_by_key(|(index, _)| *index);

        let mut records = Vec::with_capacity(documents.len());
        for (index, result) in indexed {
            match result {
                Ok(record) => records.push(record),
                Err(error) => {
                    diagnostics.push(Diagnostic::error_for(
                        error.to_string(),
                        &documents[index].path,
                    ));
                }
            }
        }

        Ok(EmbedOutcome {
            records,
            diagnostics,
        })
    }

    /// Produce one document's record: checksum always, blob when selected.
    fn encode_one(
        &self,
        document: &SourceDocument,
        embed: bool,
        resolver: Option<&dyn SourceResolver>,
    ) -> Result<DebugSourceRecord> {
        let display_path = self.cache.normalize(
            resolver,
            &document.path,
            self.options.base_path.as_deref(),
        );

        if embed {
            let (checksum, blob) = self.encoder.encode_document(document)?;
            Ok(DebugSourceRecord::new(
                display_path,
                document.checksum_algorithm,
                checksum,
                Some(blob),
            ))
        } else {
            let checksum = document.checksum_algorithm.digest(&document.content);
            Ok(DebugSourceRecord::new(
                display_path,
                document.checksum_algorithm,
                checksum,
                None,
            ))
        }
    }
}
