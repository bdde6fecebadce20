//! The user's embed selection, accumulated from repeated CLI occurrences.

/// Which documents the user asked to embed.
///
/// Built up from the CLI surface: a no-argument flag meaning "embed every
/// document" and a repeatable flag naming one file per occurrence. The spec
/// records both kinds of occurrence; how they combine (in particular, "embed
/// all" winning over redundant specifics) is resolved by
/// [`crate::selection::resolve`], which also owns the diagnostics.
///
/// # Examples
///
/// ```rust
/// use srcembed::selection::{EmbedSelectionSpec, SelectionKind};
///
/// // /embed:a.cs /embed /embed:b.cs
/// let mut spec = EmbedSelectionSpec::none();
/// spec.add_file("/src/a.cs");
/// spec.add_embed_all();
/// spec.add_file("/src/b.cs");
///
/// // "all" always wins over redundant specifics
/// assert_eq!(spec.kind(), SelectionKind::EmbedAll);
/// assert_eq!(spec.requested_paths().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbedSelectionSpec {
    embed_all: bool,
    requested: Vec<String>,
}

/// The observable selection state after collapsing repeated occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    /// No document is embedded
    EmbedNone,
    /// Every document is embedded
    EmbedAll,
    /// Only the requested paths are embedded
    EmbedOnly,
}

impl EmbedSelectionSpec {
    /// A spec with no embed request; no document is embedded.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// A spec requesting that every document be embedded.
    #[must_use]
    pub fn all() -> Self {
        EmbedSelectionSpec {
            embed_all: true,
            requested: Vec::new(),
        }
    }

    /// A spec requesting only the given paths.
    #[must_use]
    pub fn only<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EmbedSelectionSpec {
            embed_all: false,
            requested: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Record one occurrence of the no-argument "embed everything" flag.
    pub fn add_embed_all(&mut self) {
        self.embed_all = true;
    }

    /// Record one occurrence of the "embed this file" flag.
    ///
    /// Occurrences accumulate in the order given; order matters only for
    /// which diagnostic fires, never for the final decision.
    pub fn add_file(&mut self, path: impl Into<String>) {
        self.requested.push(path.into());
    }

    /// The collapsed selection state.
    ///
    /// "Embed all" combined with any specific requests collapses to
    /// [`SelectionKind::EmbedAll`]; the redundant specifics surface as a
    /// warning during resolution.
    #[must_use]
    pub fn kind(&self) -> SelectionKind {
        if self.embed_all {
            SelectionKind::EmbedAll
        } else if self.requested.is_empty() {
            SelectionKind::EmbedNone
        } else {
            SelectionKind::EmbedOnly
        }
    }

    /// The specific paths requested, in occurrence order.
    #[must_use]
    pub fn requested_paths(&self) -> &[String] {
        &self.requested
    }

    /// Whether the no-argument "embed everything" flag was given.
    #[must_use]
    pub fn embeds_all(&self) -> bool {
        self.embed_all
    }
}
