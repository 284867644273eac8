//! Course builder: manifest in, one HTML page out.

use std::path::Path;

use rayon::prelude::*;
use tome_config::Config;
use tome_diagrams::MermaidProcessor;
use tome_renderer::{Document, DocumentId, DocumentRenderer};

use crate::context::BuildContext;
use crate::error::BuildError;
use crate::manifest::Manifest;
use crate::navigation::{Navigation, TocEntry};
use crate::template::{PageData, render_page};

/// File name of the TOC dump written next to the page.
const TOC_JSON: &str = "toc.json";

/// One rendered lesson.
#[derive(Clone, Debug)]
pub struct RenderedLesson {
    /// Document identifier.
    pub id: DocumentId,
    /// Path relative to the course root.
    pub path: String,
    /// Lesson fragment.
    pub html: String,
    /// Plain text of the first level-1 heading.
    pub title: Option<String>,
    /// Anchor of that heading.
    pub title_anchor: Option<String>,
    /// Processor warnings.
    pub warnings: Vec<String>,
}

impl RenderedLesson {
    /// Index entry for this lesson.
    #[must_use]
    pub fn toc_entry(&self) -> TocEntry {
        TocEntry::new(
            self.id.clone(),
            self.path.clone(),
            self.title.clone(),
            self.title_anchor.clone(),
        )
    }
}

/// Result of a build.
#[derive(Debug)]
pub struct BuildOutput {
    /// The complete page.
    pub html: String,
    /// Lessons in manifest order.
    pub lessons: Vec<RenderedLesson>,
    /// Manifest entries whose file was missing.
    pub skipped: Vec<String>,
    /// Cache-busting version marker.
    pub version: String,
    /// Course index.
    pub navigation: Navigation,
}

/// Builds the single-page course described by a [`Config`].
pub struct CourseBuilder<'a> {
    config: &'a Config,
}

impl<'a> CourseBuilder<'a> {
    /// Create a builder.
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Render one lesson with a fresh renderer.
    ///
    /// Rendering only depends on the document, so lessons can be rendered in
    /// any order or in parallel.
    pub fn render_lesson(&self, document: &Document) -> RenderedLesson {
        let mut renderer = DocumentRenderer::new()
            .with_images(self.config.render.images)
            .with_processor(MermaidProcessor::new());
        if let Some(languages) = &self.config.render.code_languages {
            renderer = renderer.with_code_languages(languages);
        }

        let result = renderer.render(document);
        tracing::debug!(
            path = %document.path,
            id = %document.id,
            headings = result.headings.len(),
            "Rendered lesson"
        );
        for warning in &result.warnings {
            tracing::warn!(path = %document.path, "{warning}");
        }

        RenderedLesson {
            id: document.id.clone(),
            path: document.path.clone(),
            title_anchor: result.title_anchor().map(str::to_owned),
            title: result.title,
            html: result.html,
            warnings: result.warnings,
        }
    }

    /// Read, render and assemble every lesson.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::EmptyCourse`] when no lesson could be read and
    /// [`BuildError::Io`] when an existing lesson cannot be read.
    pub fn build(&self) -> Result<BuildOutput, BuildError> {
        let manifest = Manifest::new(self.config.docs_resolved.manifest.iter().cloned());
        let loaded = manifest.load(&self.config.docs_resolved.source_dir)?;
        if loaded.documents.is_empty() {
            return Err(BuildError::EmptyCourse);
        }

        let lessons: Vec<RenderedLesson> = if self.config.render.parallel {
            loaded
                .documents
                .par_iter()
                .map(|doc| self.render_lesson(doc))
                .collect()
        } else {
            loaded
                .documents
                .iter()
                .map(|doc| self.render_lesson(doc))
                .collect()
        };

        let mut context = BuildContext::new();
        for lesson in &lessons {
            context.push(lesson);
        }
        let version = context.version();
        let navigation = Navigation::build(context.toc(), |segment| {
            self.config.section_label(segment).to_owned()
        });
        let navigation_html = navigation.render();

        let course = &self.config.course;
        let html = render_page(&PageData {
            title: &course.title,
            lang: &course.lang,
            course_id: &course.id,
            version: &version,
            navigation_html: &navigation_html,
            lessons: &lessons,
        });

        tracing::info!(
            lessons = lessons.len(),
            skipped = loaded.skipped.len(),
            sections = navigation.sections.len(),
            %version,
            "Built course"
        );

        Ok(BuildOutput {
            html,
            lessons,
            skipped: loaded.skipped,
            version,
            navigation,
        })
    }

    /// Build and write the page to `path`, plus `toc.json` next to it when
    /// `output.toc_json` is set. Parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns any [`build`](Self::build) error, or [`BuildError::Io`] if the
    /// output cannot be written.
    pub fn write(&self, path: &Path) -> Result<BuildOutput, BuildError> {
        let output = self.build()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
        }
        std::fs::write(path, &output.html).map_err(|e| BuildError::io(path, e))?;
        tracing::info!(path = %path.display(), bytes = output.html.len(), "Wrote course page");

        if self.config.output_resolved.toc_json {
            let toc_path = path.with_file_name(TOC_JSON);
            let json = serde_json::to_string_pretty(&output.navigation)?;
            std::fs::write(&toc_path, json).map_err(|e| BuildError::io(&toc_path, e))?;
            tracing::info!(path = %toc_path.display(), "Wrote TOC");
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LAYERED: &str = "```mermaid
flowchart TB
  subgraph UI
    View
    ViewModel
  end
  subgraph App
    CompositionRoot
    UseCase
    FeaturePort
  end
  subgraph Core
    Entity
    Policy
  end
  subgraph Infra
    APIClient
    PersistenceAdapter
  end
  View --> ViewModel
  ViewModel --> UseCase
  UseCase --> Entity
  UseCase --> Policy
  UseCase --> FeaturePort
  CompositionRoot -.-> ViewModel
  FeaturePort --o APIClient
  FeaturePort --o PersistenceAdapter
```
";

    fn course(files: &[(&str, &str)]) -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        for (path, content) in files {
            let file = dir.path().join(path);
            std::fs::create_dir_all(file.parent().unwrap()).unwrap();
            std::fs::write(file, content).unwrap();
        }
        let manifest = files
            .iter()
            .map(|(p, _)| format!("\"{p}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let toml = format!(
            "[course]\ntitle = \"Test Course\"\nid = \"test\"\n\n[docs]\nmanifest = [{manifest}, \"missing.md\"]\n\n[sections]\n\"01-junior\" = \"Junior\"\n\n[output]\ntoc_json = true\n"
        );
        let config_path = dir.path().join("tome.toml");
        std::fs::write(&config_path, toml).unwrap();
        let config = Config::load(Some(&config_path), None).unwrap();
        (dir, config)
    }

    #[test]
    fn test_build_assembles_lessons_and_navigation() {
        let (_dir, config) = course(&[
            ("00-intro.md", "# Welcome\n\nHello **there**"),
            ("01-junior/00-setup.md", "## No title here\n- [x] done"),
        ]);
        let output = CourseBuilder::new(&config).build().unwrap();

        assert_eq!(output.lessons.len(), 2);
        assert_eq!(output.skipped, vec!["missing.md"]);
        assert_eq!(output.version.len(), 12);

        let labels: Vec<_> = output.navigation.sections.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Introduction", "Junior"]);
        let setup = &output.navigation.sections[1].lessons[0];
        assert_eq!(setup.title, "00-setup");
        assert_eq!(setup.anchor, "s001");

        assert!(output.html.contains("<h1 id=\"s000-welcome\">Welcome</h1>"));
        assert!(output.html.contains("href=\"#s000-welcome\""));
        assert!(output.html.contains("<section class=\"lesson\" id=\"s001\""));
        assert!(output.html.contains("\u{2611} done"));
        assert!(output.html.contains("<title>Test Course</title>"));
    }

    #[test]
    fn test_parallel_build_matches_sequential() {
        let (_dir, mut config) = course(&[
            ("a.md", "# A\n```kotlin\nval a = 1\n```"),
            ("b/b.md", "# B\n| x |\n|---|\n| 1 |"),
            ("c/c.md", LAYERED),
        ]);
        let sequential = CourseBuilder::new(&config).build().unwrap();
        config.render.parallel = true;
        let parallel = CourseBuilder::new(&config).build().unwrap();

        assert_eq!(sequential.html, parallel.html);
        assert_eq!(sequential.version, parallel.version);
    }

    #[test]
    fn test_layered_diagram_rendered_as_svg() {
        let (_dir, config) = course(&[("arch.md", LAYERED)]);
        let output = CourseBuilder::new(&config).build().unwrap();
        assert!(output.html.contains("class=\"layered-architecture\""));
        assert!(output.html.contains("class=\"mermaid-legend\""));
    }

    #[test]
    fn test_empty_course_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("tome.toml");
        std::fs::write(&config_path, "[docs]\nmanifest = [\"gone.md\"]\n").unwrap();
        let config = Config::load(Some(&config_path), None).unwrap();
        let err = CourseBuilder::new(&config).build().unwrap_err();
        assert!(matches!(err, BuildError::EmptyCourse));
    }

    #[test]
    fn test_write_creates_page_and_toc_json() {
        let (dir, config) = course(&[("00-intro.md", "# Welcome")]);
        let out = dir.path().join("dist/nested/course.html");
        CourseBuilder::new(&config).write(&out).unwrap();

        let html = std::fs::read_to_string(&out).unwrap();
        assert!(html.contains("<h1 id=\"s000-welcome\">Welcome</h1>"));

        let toc = std::fs::read_to_string(dir.path().join("dist/nested/toc.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&toc).unwrap();
        assert_eq!(json["sections"][0]["lessons"][0]["title"], "Welcome");
    }
}
