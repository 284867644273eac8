//! Arrow legend for architecture diagrams.
//!
//! The legend explains four arrow semantics. It owns the SVG `<marker>`
//! definitions; a layered diagram that follows it references the same ids.

use std::fmt::Write;

use sha2::{Digest, Sha256};

/// Words that suggest an architecture diagram (matched on the lowercased
/// origin path plus source).
const KEYWORDS: &[&str] = &[
    "module",
    "feature",
    "context",
    "dependency",
    "protocol",
    "interface",
    "inherit",
    "router",
    "coordinator",
    "view-model",
    "repository",
    "adapter",
    "domain",
    "application",
    "infrastructure",
    "wiring",
    "use-case",
    "actor",
    "aggregate",
    "service",
];

/// Relation arrows: solid, dotted, thick, circle-open, inheritance (both
/// directions), dependency.
const ARROWS: &[&str] = &["-->", "-.->", "==>", "--o", "<|--", "--|>", "..>"];

/// Arrow semantics shown in the legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKind {
    /// Solid line, closed head.
    Direct,
    /// Dashed line, closed head.
    Wiring,
    /// Dashed line, open head.
    Contract,
    /// Solid line, open head.
    Output,
}

impl ArrowKind {
    /// All kinds in legend order.
    pub const ALL: [Self; 4] = [Self::Direct, Self::Wiring, Self::Contract, Self::Output];

    /// CSS class suffix, also used in marker ids.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Wiring => "wiring",
            Self::Contract => "contract",
            Self::Output => "open",
        }
    }

    /// Legend caption.
    #[must_use]
    pub fn caption(self) -> &'static str {
        match self {
            Self::Direct => "Direct runtime dependency",
            Self::Wiring => "Wiring / configuration",
            Self::Contract => "Contract / abstraction",
            Self::Output => "Output / propagation",
        }
    }

    /// Theme variable holding the stroke color.
    #[must_use]
    pub fn color_var(self) -> &'static str {
        match self {
            Self::Direct => "--mermaid-legend-direct",
            Self::Wiring => "--mermaid-legend-dashed-closed",
            Self::Contract => "--mermaid-legend-dashed-open",
            Self::Output => "--mermaid-legend-solid-open",
        }
    }

    /// Whether the line is dashed.
    #[must_use]
    pub fn dashed(self) -> bool {
        matches!(self, Self::Wiring | Self::Contract)
    }

    /// Whether the arrow head is filled.
    #[must_use]
    pub fn closed_head(self) -> bool {
        matches!(self, Self::Direct | Self::Wiring)
    }

    /// Inline style for a stroke of this kind.
    pub(crate) fn stroke_style(self) -> String {
        let mut style = format!("stroke: var({}); fill: none;", self.color_var());
        if self.dashed() {
            style.push_str(" stroke-dasharray: 7 5;");
        }
        style
    }
}

/// Whether a generic diagram deserves a legend.
///
/// Needs both an architecture keyword and a relation arrow somewhere in the
/// origin path or the source.
#[must_use]
pub fn needs_legend(origin: &str, source: &str) -> bool {
    let haystack = format!("{origin}\n{source}").to_lowercase();
    KEYWORDS.iter().any(|k| haystack.contains(k)) && ARROWS.iter().any(|a| haystack.contains(a))
}

/// Marker id prefix derived from the diagram source.
#[must_use]
pub fn marker_id(source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    let result = hasher.finalize();
    format!("mlg-{}", hex::encode(&result[..6]))
}

/// Id of the arrow head marker for `kind`.
pub(crate) fn marker_ref(marker_id: &str, kind: ArrowKind) -> String {
    format!("{marker_id}-{}", kind.class())
}

/// Render the legend fragment.
#[must_use]
pub fn render_legend(marker_id: &str) -> String {
    let mut out = String::with_capacity(2048);
    out.push_str(
        "<div class=\"mermaid-legend\" role=\"note\" aria-label=\"Arrow legend\">\n\
         <svg class=\"mermaid-legend-defs\" width=\"0\" height=\"0\" aria-hidden=\"true\" focusable=\"false\">\n<defs>\n",
    );
    for kind in ArrowKind::ALL {
        let head = if kind.closed_head() {
            format!(
                r#"<path d="M0,0 L10,5 L0,10 z" style="fill: var({});"/>"#,
                kind.color_var()
            )
        } else {
            format!(
                r#"<path d="M0,0 L10,5 L0,10" style="fill: none; stroke: var({}); stroke-width: 1.5;"/>"#,
                kind.color_var()
            )
        };
        writeln!(
            out,
            r#"  <marker id="{}" viewBox="0 0 10 10" refX="9" refY="5" markerWidth="8" markerHeight="8" orient="auto">{head}</marker>"#,
            marker_ref(marker_id, kind)
        )
        .unwrap();
    }
    out.push_str("</defs>\n</svg>\n<ul class=\"mermaid-legend-items\">\n");
    for kind in ArrowKind::ALL {
        writeln!(
            out,
            r#"  <li class="mermaid-legend-item legend-{class}"><svg width="56" height="14" aria-hidden="true" focusable="false"><line x1="2" y1="7" x2="48" y2="7" style="{style} stroke-width: 2;" marker-end="url(#{marker})"/></svg><span>{caption}</span></li>"#,
            class = kind.class(),
            style = kind.stroke_style(),
            marker = marker_ref(marker_id, kind),
            caption = kind.caption(),
        )
        .unwrap();
    }
    out.push_str("</ul>\n</div>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_and_arrow_needed() {
        assert!(needs_legend("docs/a.md", "flowchart LR\nRepository --> Api"));
        assert!(!needs_legend("docs/a.md", "flowchart LR\nRepository"));
        assert!(!needs_legend("docs/a.md", "flowchart LR\nA --> B"));
    }

    #[test]
    fn test_origin_path_counts_as_keyword_source() {
        assert!(needs_legend("02-mid/03-feature-modules.md", "graph TD\nA --> B"));
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        assert!(needs_legend("x.md", "classDiagram\nDOMAIN <|-- Impl"));
    }

    #[test]
    fn test_marker_id_is_stable_and_source_dependent() {
        let a = marker_id("flowchart LR\nA --> B");
        assert_eq!(a, marker_id("flowchart LR\nA --> B"));
        assert_ne!(a, marker_id("flowchart LR\nA --> C"));
        assert!(a.starts_with("mlg-"));
        assert_eq!(a.len(), "mlg-".len() + 12);
    }

    #[test]
    fn test_legend_lists_four_semantics_with_markers() {
        let legend = render_legend("mlg-abc");
        for kind in ArrowKind::ALL {
            assert!(legend.contains(kind.caption()));
            assert!(legend.contains(&format!("id=\"mlg-abc-{}\"", kind.class())));
            assert!(legend.contains(&format!("url(#mlg-abc-{})", kind.class())));
        }
        assert_eq!(legend.matches("<li ").count(), 4);
        assert!(legend.contains("var(--mermaid-legend-dashed-closed)"));
    }
}
