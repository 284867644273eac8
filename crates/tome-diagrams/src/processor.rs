//! Code block processor for `mermaid` fences.

use std::fmt::Write;

use tome_renderer::{CodeBlockProcessor, ProcessResult, escape_html};

use crate::classify::{DiagramShape, classify, missing_markers};
use crate::layered::render_layered;
use crate::legend::{marker_id, needs_legend, render_legend};
use crate::normalize::normalize;

/// Subgraph markers that show an author meant to draw the layered diagram.
const LAYER_SUBGRAPHS: &[&str] = &["subgraphcore", "subgraphapp", "subgraphui", "subgraphinfra"];

/// Transform one Mermaid block into HTML.
///
/// The source is normalized first. The canonical layered architecture diagram
/// becomes a legend followed by a fixed SVG; anything else stays a
/// `<pre class="mermaid">` block for the browser, preceded by a legend when it
/// looks like an architecture diagram.
///
/// # Examples
///
/// ```
/// use tome_diagrams::render_diagram;
///
/// let html = render_diagram("sequenceDiagram\nA->>B: hi", "01-junior/00-intro.md");
/// assert_eq!(html, "<pre class=\"mermaid\">sequenceDiagram\nA-&gt;&gt;B: hi</pre>\n");
/// ```
#[must_use]
pub fn render_diagram(raw: &str, origin: &str) -> String {
    let source = normalize(raw);
    match classify(&source) {
        DiagramShape::LayeredArchitecture => {
            let id = marker_id(&source);
            let mut out = render_legend(&id);
            out.push_str(&render_layered(&source, origin, &id));
            out
        }
        DiagramShape::Generic => {
            let mut out = String::new();
            if needs_legend(origin, &source) {
                out.push_str(&render_legend(&marker_id(&source)));
            }
            writeln!(out, r#"<pre class="mermaid">{}</pre>"#, escape_html(&source)).unwrap();
            out
        }
    }
}

/// Renders `mermaid` fences with [`render_diagram`].
///
/// Other languages pass through. Diagrams that declare all four layer
/// subgraphs but miss part of the canonical shape are rendered generically
/// and reported as warnings.
#[derive(Debug, Default)]
pub struct MermaidProcessor {
    warnings: Vec<String>,
}

impl MermaidProcessor {
    /// Create a new processor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn check_shape(&mut self, source: &str, origin: &str) {
        if source.trim().is_empty() {
            self.warnings
                .push(format!("{origin}: empty mermaid block"));
            return;
        }
        let missing = missing_markers(source);
        if missing.is_empty() || missing.iter().any(|m| LAYER_SUBGRAPHS.contains(m)) {
            return;
        }
        self.warnings.push(format!(
            "{origin}: layered diagram is missing {}; rendered as plain mermaid",
            missing.join(", ")
        ));
    }
}

impl CodeBlockProcessor for MermaidProcessor {
    fn process(&mut self, language: &str, source: &str, origin: &str) -> ProcessResult {
        if !language.eq_ignore_ascii_case("mermaid") {
            return ProcessResult::PassThrough;
        }

        self.check_shape(&normalize(source), origin);
        tracing::debug!(origin, "Rendering mermaid diagram");
        ProcessResult::Html(render_diagram(source, origin))
    }

    fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::LAYERED_SAMPLE;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_architecture_flowchart_gets_one_legend() {
        let html = render_diagram(
            "flowchart LR\n    Feature ..> Port : implements",
            "02-mid/03-feature-modules.md",
        );
        assert_eq!(html.matches("class=\"mermaid-legend\"").count(), 1);
        assert!(html.ends_with(
            "<pre class=\"mermaid\">flowchart LR\n    Feature -.-&gt;|implements| Port</pre>\n"
        ));
        assert!(html.find("mermaid-legend").unwrap() < html.find("<pre").unwrap());
    }

    #[test]
    fn test_no_legend_without_keyword_or_arrow() {
        assert_eq!(
            render_diagram("flowchart LR\nA --> B", "x.md"),
            "<pre class=\"mermaid\">flowchart LR\nA --&gt; B</pre>\n"
        );
        assert_eq!(
            render_diagram("flowchart LR\nRepository", "x.md"),
            "<pre class=\"mermaid\">flowchart LR\nRepository</pre>\n"
        );
    }

    #[test]
    fn test_layered_diagram_becomes_svg() {
        let html = render_diagram(LAYERED_SAMPLE, "02-mid/01-arch.md");
        assert!(html.starts_with("<div class=\"mermaid-legend\""));
        assert!(html.contains("<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 1280 780\""));
        assert!(!html.contains("<pre class=\"mermaid\">"));
        assert_eq!(html.matches("class=\"mermaid-legend\"").count(), 1);
    }

    #[test]
    fn test_processor_passes_other_languages() {
        let mut processor = MermaidProcessor::new();
        assert_eq!(
            processor.process("kotlin", "val x = 1", "a.md"),
            ProcessResult::PassThrough
        );
        assert!(processor.warnings().is_empty());
    }

    #[test]
    fn test_processor_accepts_any_case() {
        let mut processor = MermaidProcessor::new();
        let result = processor.process("Mermaid", "graph TD\nA --> B", "a.md");
        assert_eq!(
            result,
            ProcessResult::Html("<pre class=\"mermaid\">graph TD\nA --&gt; B</pre>\n".to_owned())
        );
        assert!(processor.warnings().is_empty());
    }

    #[test]
    fn test_processor_warns_on_incomplete_layered_diagram() {
        let mut processor = MermaidProcessor::new();
        let broken = LAYERED_SAMPLE.replace("UseCase --> Entity\n", "");
        processor.process("mermaid", &broken, "02-mid/01-arch.md");
        assert_eq!(
            processor.warnings(),
            [
                "02-mid/01-arch.md: layered diagram is missing usecase-->entity; rendered as plain mermaid"
                    .to_owned()
            ]
        );
    }

    #[test]
    fn test_processor_warns_on_empty_block() {
        let mut processor = MermaidProcessor::new();
        processor.process("mermaid", "  \n", "a.md");
        assert_eq!(processor.warnings(), ["a.md: empty mermaid block".to_owned()]);
    }
}
