//! Documents and their identifiers.

use std::fmt;

/// Stable short identifier of a document, derived from its manifest position.
///
/// Formatted as `s` followed by the zero-padded index (`s000`, `s042`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DocumentId(String);

impl DocumentId {
    /// Identifier for the document at `index` in the manifest.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self(format!("s{index:03}"))
    }

    /// Identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A markdown document ready to be rendered.
#[derive(Clone, Debug)]
pub struct Document {
    /// Manifest-derived identifier, used to prefix heading anchors.
    pub id: DocumentId,
    /// Source path relative to the course root (e.g. `01-junior/00-setup.md`).
    pub path: String,
    /// Raw markdown text.
    pub text: String,
}

impl Document {
    /// Create a new document.
    #[must_use]
    pub fn new(id: DocumentId, path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            path: path.into(),
            text: text.into(),
        }
    }

    /// File name without directory and extension (`00-setup` for `01-junior/00-setup.md`).
    #[must_use]
    pub fn file_stem(&self) -> &str {
        file_stem(&self.path)
    }
}

/// File name of a `/`-separated path without its extension.
#[must_use]
pub fn file_stem(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    }
}
