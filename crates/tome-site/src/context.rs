//! State threaded through one build.

use sha2::{Digest, Sha256};

use crate::builder::RenderedLesson;
use crate::navigation::TocEntry;

/// Accumulates the TOC and the content hash while lessons are assembled.
///
/// Lessons must be pushed in manifest order; the version depends on it.
#[derive(Clone, Debug, Default)]
pub struct BuildContext {
    toc: Vec<TocEntry>,
    hasher: Sha256,
}

impl BuildContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rendered lesson.
    pub fn push(&mut self, lesson: &RenderedLesson) {
        self.hasher.update(lesson.html.as_bytes());
        self.toc.push(lesson.toc_entry());
    }

    /// TOC entries in manifest order.
    #[must_use]
    pub fn toc(&self) -> &[TocEntry] {
        &self.toc
    }

    /// Cache-busting version marker: the first 12 hex characters of the
    /// SHA-256 of every lesson fragment.
    #[must_use]
    pub fn version(&self) -> String {
        let result = self.hasher.clone().finalize();
        hex::encode(&result[..6])
    }
}
