//! Ordered list of lessons.

use std::io::ErrorKind;
use std::path::Path;

use tome_renderer::{Document, DocumentId};

use crate::error::BuildError;

/// One manifest position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Identifier derived from the position.
    pub id: DocumentId,
    /// Path relative to the course root.
    pub path: String,
}

/// The ordered lesson list.
///
/// Ids are assigned by position before any file is read, so a missing lesson
/// does not shift the ids (and anchors) of the lessons after it.
#[derive(Clone, Debug, Default)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

/// Documents read from disk plus the entries that were not found.
#[derive(Debug, Default)]
pub struct LoadedDocuments {
    /// Documents in manifest order.
    pub documents: Vec<Document>,
    /// Paths of entries whose file does not exist.
    pub skipped: Vec<String>,
}

impl Manifest {
    /// Build a manifest from ordered relative paths.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = paths
            .into_iter()
            .enumerate()
            .map(|(index, path)| ManifestEntry {
                id: DocumentId::from_index(index),
                path: path.into(),
            })
            .collect();
        Self { entries }
    }

    /// Entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.entries.iter()
    }

    /// Number of entries, missing files included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read every entry below `source_dir`.
    ///
    /// Missing files are skipped with a warning; any other read error fails.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Io`] if an existing file cannot be read as UTF-8.
    pub fn load(&self, source_dir: &Path) -> Result<LoadedDocuments, BuildError> {
        let mut loaded = LoadedDocuments::default();
        for entry in &self.entries {
            let file = source_dir.join(&entry.path);
            match std::fs::read_to_string(&file) {
                Ok(text) => loaded
                    .documents
                    .push(Document::new(entry.id.clone(), entry.path.clone(), text)),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::warn!(path = %entry.path, id = %entry.id, "Lesson not found, skipping");
                    loaded.skipped.push(entry.path.clone());
                }
                Err(e) => return Err(BuildError::io(file, e)),
            }
        }
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ids_follow_positions() {
        let manifest = Manifest::new(["a.md", "b/c.md"]);
        let ids: Vec<_> = manifest.iter().map(|e| e.id.as_str().to_owned()).collect();
        assert_eq!(ids, vec!["s000", "s001"]);
        assert_eq!(manifest.len(), 2);
    }

    #[test]
    fn test_missing_files_keep_ids_stable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.md"), "# A").unwrap();
        std::fs::write(dir.path().join("c.md"), "# C").unwrap();

        let manifest = Manifest::new(["a.md", "missing.md", "c.md"]);
        let loaded = manifest.load(dir.path()).unwrap();

        assert_eq!(loaded.skipped, vec!["missing.md"]);
        let ids: Vec<_> = loaded.documents.iter().map(|d| d.id.to_string()).collect();
        assert_eq!(ids, vec!["s000", "s002"]);
        assert_eq!(loaded.documents[1].text, "# C");
    }
}
