//! Resolution of an embed selection against the compilation's document set.

use crate::diagnostics::Diagnostic;
use crate::document::SourceDocument;
use crate::selection::spec::{EmbedSelectionSpec, SelectionKind};
use crate::{Error, Result};

/// Knobs for selection resolution.
///
/// Exists for the one behavior the original toolchains do not pin down:
/// whether redundant specific-file requests under "embed all" warn once in
/// aggregate or once per file. The default is a single aggregate warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionOptions {
    /// Emit one redundancy warning per requested file instead of one in aggregate.
    pub warn_per_redundant_file: bool,
}

/// The per-document decisions and diagnostics of one resolution.
///
/// `decisions` is index-aligned with the document slice passed to
/// [`resolve`]; `true` means the document's source text is embedded. Every
/// document gets a checksum regardless of its decision.
#[derive(Debug, Clone)]
pub struct SelectionOutcome {
    /// Embed decision per document, aligned with the input slice
    pub decisions: Vec<bool>,
    /// Non-fatal diagnostics, in a deterministic order
    pub diagnostics: Vec<Diagnostic>,
}

impl SelectionOutcome {
    /// Number of documents marked for embedding.
    #[must_use]
    pub fn embed_count(&self) -> usize {
        self.decisions.iter().filter(|&&d| d).count()
    }
}

/// Resolve `spec` against the compilation's documents with default options.
///
/// # Errors
/// Returns [`Error::FileNotInCompilation`] when a requested path matches no
/// document; this is fatal for the whole embedding phase.
pub fn resolve(
    spec: &EmbedSelectionSpec,
    documents: &[SourceDocument],
) -> Result<SelectionOutcome> {
    resolve_with(spec, documents, SelectionOptions::default())
}

/// Resolve `spec` against the compilation's documents.
///
/// The result is deterministic: the same spec and document set always produce
/// the same decisions and the same diagnostic set, independent of document
/// iteration order.
///
/// - `EmbedNone`: nothing embedded, no diagnostics.
/// - `EmbedAll`: everything embedded; if specific files were also requested,
///   they are redundant and a non-fatal warning is emitted - the "all"
///   request always wins.
/// - `EmbedOnly`: each requested path is matched by path equality against the
///   document set. A path matching nothing is a fatal
///   [`Error::FileNotInCompilation`] naming the resolved absolute path; no
///   documents are embedded in that case.
///
/// # Errors
/// Returns [`Error::FileNotInCompilation`] for a request naming a file that
/// is not part of the compilation.
pub fn resolve_with(
    spec: &EmbedSelectionSpec,
    documents: &[SourceDocument],
    options: SelectionOptions,
) -> Result<SelectionOutcome> {
    match spec.kind() {
        SelectionKind::EmbedNone => Ok(SelectionOutcome {
            decisions: vec![false; documents.len()],
            diagnostics: Vec::new(),
        }),
        SelectionKind::EmbedAll => {
            let mut diagnostics = Vec::new();
            if !spec.requested_paths().is_empty() {
                if options.warn_per_redundant_file {
                    for path in spec.requested_paths() {
                        diagnostics.push(Diagnostic::warning_for(
                            "ignoring specific embed request because all files will be embedded",
                            path,
                        ));
                    }
                } else {
                    diagnostics.push(Diagnostic::warning(
                        "ignoring specific embed requests because all files will be embedded",
                    ));
                }
            }
            Ok(SelectionOutcome {
                decisions: vec![true; documents.len()],
                diagnostics,
            })
        }
        SelectionKind::EmbedOnly => {
            let mut decisions = vec![false; documents.len()];
            for requested in spec.requested_paths() {
                let mut matched = false;
                for (index, document) in documents.iter().enumerate() {
                    if document.path == *requested {
                        decisions[index] = true;
                        matched = true;
                    }
                }
                if !matched {
                    return Err(Error::FileNotInCompilation {
                        path: requested.clone(),
                    });
                }
            }
            Ok(SelectionOutcome {
                decisions,
                diagnostics: Vec::new(),
            })
        }
    }
}
