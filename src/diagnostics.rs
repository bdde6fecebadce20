//! User-facing diagnostics produced by the embedding phase.
//!
//! Non-fatal conditions (a redundant specific-file request under "embed all",
//! a single document that failed to encode) are reported as [`Diagnostic`]
//! values rather than errors, so the compilation can proceed and surface them
//! together. Fatal conditions use [`crate::Error`] instead and abort the phase.

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Non-fatal; the compilation proceeds
    Warning,
    /// A discrete failure, reported per document; siblings proceed
    Error,
}

/// One user-visible message from the embedding phase.
///
/// Diagnostics that concern a specific document carry its path exactly as the
/// user wrote it, for reproducibility of the request. A successful run
/// produces an empty diagnostic set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    message: String,
    path: Option<String>,
}

impl Diagnostic {
    /// Create a warning not tied to a specific document.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            message: message.into(),
            path: None,
        }
    }

    /// Create a warning naming a specific document.
    #[must_use]
    pub fn warning_for(message: impl Into<String>, path: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Create a per-document error naming the offending path.
    #[must_use]
    pub fn error_for(message: impl Into<String>, path: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Error,
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// The diagnostic's severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The document path this diagnostic concerns, if any, as the user wrote it.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        match &self.path {
            Some(path) => write!(f, "{severity}: {} - '{path}'", self.message),
            None => write!(f, "{severity}: {}", self.message),
        }
    }
}
