//! Course index and sidebar navigation.
//!
//! Lessons are grouped by the top-level directory of their path. Sections
//! keep first-seen order and lessons keep manifest order.

use std::fmt::Write;

use serde::Serialize;
use tome_renderer::{DocumentId, escape_attr, escape_html, file_stem};

/// One lesson in the index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Document identifier.
    pub id: DocumentId,
    /// Path relative to the course root.
    pub path: String,
    /// Link text.
    pub title: String,
    /// Link target without `#`.
    pub anchor: String,
}

impl TocEntry {
    /// Create an entry, falling back to the file stem for the title and to
    /// the lesson's section id for the anchor.
    #[must_use]
    pub fn new(
        id: DocumentId,
        path: impl Into<String>,
        title: Option<String>,
        anchor: Option<String>,
    ) -> Self {
        let path = path.into();
        let title = title.unwrap_or_else(|| file_stem(&path).to_owned());
        let anchor = anchor.unwrap_or_else(|| id.to_string());
        Self {
            id,
            path,
            title,
            anchor,
        }
    }

    /// Top-level directory of the path; empty for root-level files.
    #[must_use]
    pub fn segment(&self) -> &str {
        match self.path.split_once('/') {
            Some((segment, _)) => segment,
            None => "",
        }
    }
}

/// A group of lessons sharing a top-level directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavSection {
    /// Directory name (empty for root-level files).
    pub key: String,
    /// Display label.
    pub label: String,
    /// Lessons in manifest order.
    pub lessons: Vec<TocEntry>,
}

/// The whole course index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Sections in first-seen order.
    pub sections: Vec<NavSection>,
}

impl Navigation {
    /// Group entries by section. `label` maps a directory name to its
    /// display label.
    pub fn build<F>(entries: &[TocEntry], label: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        let mut sections: Vec<NavSection> = Vec::new();
        for entry in entries {
            let key = entry.segment();
            match sections.iter_mut().find(|s| s.key == key) {
                Some(section) => section.lessons.push(entry.clone()),
                None => sections.push(NavSection {
                    key: key.to_owned(),
                    label: label(key),
                    lessons: vec![entry.clone()],
                }),
            }
        }
        Self { sections }
    }

    /// Number of lessons across all sections.
    #[must_use]
    pub fn lesson_count(&self) -> usize {
        self.sections.iter().map(|s| s.lessons.len()).sum()
    }

    /// Render the sidebar fragment.
    #[must_use]
    pub fn render(&self) -> String {
        let mut html = String::with_capacity(256 + self.lesson_count() * 160);
        html.push_str("<nav class=\"course-nav\" aria-label=\"Course index\">\n");
        for section in &self.sections {
            writeln!(
                html,
                r#"<section class="nav-section" data-section="{}">"#,
                escape_attr(&section.key)
            )
            .unwrap();
            writeln!(
                html,
                r#"<h3 class="nav-section-title">{}</h3>"#,
                escape_html(&section.label)
            )
            .unwrap();
            html.push_str("<ul class=\"toc\">\n");
            for lesson in &section.lessons {
                writeln!(
                    html,
                    r##"  <li><a class="doc-nav-link" href="#{}" data-lesson-path="{}">{}</a></li>"##,
                    escape_attr(&lesson.anchor),
                    escape_attr(&lesson.path),
                    escape_html(&lesson.title)
                )
                .unwrap();
            }
            html.push_str("</ul>\n</section>\n");
        }
        html.push_str("</nav>\n");
        html
    }
}

/// Render a flat index without sections.
#[must_use]
pub fn render_toc(entries: &[TocEntry]) -> String {
    let mut html = String::from("<ul class=\"toc\">\n");
    for entry in entries {
        writeln!(
            html,
            r##"<li><a href="#{}">{}</a></li>"##,
            escape_attr(&entry.anchor),
            escape_html(&entry.title)
        )
        .unwrap();
    }
    html.push_str("</ul>\n");
    html
}
