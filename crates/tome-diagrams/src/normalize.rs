//! Dialect normalization for Mermaid sources.
//!
//! Lessons were partly written with PlantUML habits. The rewrites here turn
//! those arrows into syntax Mermaid accepts. Every rewrite removes the token it
//! matches, so normalizing twice is the same as normalizing once.

use std::sync::LazyLock;

use regex::Regex;

/// `A ..> B : label` on its own line.
static LABELLED_DOTTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([ \t]*)(\S+?)[ \t]*\.\.>[ \t]*(\S+)[ \t]*:[ \t]*(.+?)[ \t\r]*$").unwrap()
});

/// Diagram family, keyed on the first non-blank line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `flowchart` or `graph`.
    Flowchart,
    /// `stateDiagram` or `stateDiagram-v2`.
    State,
    /// Anything else; left untouched.
    Other,
}

impl Dialect {
    /// Detect the dialect of a diagram source.
    #[must_use]
    pub fn detect(source: &str) -> Self {
        let header = source
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_default();
        let keyword = header.split_whitespace().next().unwrap_or_default();

        if keyword == "flowchart" || keyword == "graph" {
            Self::Flowchart
        } else if keyword.starts_with("stateDiagram") {
            Self::State
        } else {
            Self::Other
        }
    }
}

/// Rewrite non-Mermaid arrow shorthands into Mermaid syntax.
///
/// # Examples
///
/// ```
/// use tome_diagrams::normalize;
///
/// assert_eq!(
///     normalize("flowchart LR\n  A ..> B : uses"),
///     "flowchart LR\n  A -.->|uses| B"
/// );
/// assert_eq!(normalize("stateDiagram-v2\n  A -.-> B"), "stateDiagram-v2\n  A --> B");
/// ```
#[must_use]
pub fn normalize(source: &str) -> String {
    match Dialect::detect(source) {
        Dialect::Flowchart => {
            let labelled = LABELLED_DOTTED.replace_all(source, "${1}${2} -.->|${4}| ${3}");
            labelled.replace("..>", "-.->").replace("-.-o", "-.->")
        }
        Dialect::State => source.replace("-.->", "-->").replace("..>", "-->"),
        Dialect::Other => source.to_owned(),
    }
}
