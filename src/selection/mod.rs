//! Embed selection: the user's request and its resolution against the compilation.
//!
//! The CLI surface produces an [`EmbedSelectionSpec`] from repeated flag
//! occurrences; [`resolve`] maps it onto the compilation's document set,
//! yielding one embed/don't-embed decision per document plus diagnostics.
//! Conflict rules live here: an "embed all" request always wins over
//! redundant specific files (non-fatal warning), while a specific file that
//! is not part of the compilation is fatal for the whole phase.
//!
//! # Key Components
//!
//! - [`EmbedSelectionSpec`] - Accumulated CLI selection, [`SelectionKind`] states
//! - [`resolve`] / [`resolve_with`] - Deterministic resolution with [`SelectionOptions`]
//! - [`SelectionOutcome`] - Index-aligned decisions plus diagnostics

mod policy;
mod spec;

pub use policy::{resolve, resolve_with, SelectionOptions, SelectionOutcome};
pub use spec::{EmbedSelectionSpec, SelectionKind};
