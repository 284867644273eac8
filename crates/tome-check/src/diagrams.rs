//! Mermaid arrow coverage across the course.

use std::path::Path;

use tome_renderer::{Block, parse_blocks};

use crate::error::CheckError;
use crate::report::{CheckKind, Violation};
use crate::walk::{markdown_files, relative};

/// Arrow semantics the course must use at least once: direct, wiring,
/// thick, and contract.
pub const REQUIRED_ARROWS: &[&str] = &["-->", "-.->", "==>", "--o"];

/// Coverage is a property of the whole course, not of one file.
const COURSE_LOCATION: &str = ".";

/// Bodies of the `mermaid` fences in a document.
pub fn mermaid_blocks(content: &str) -> Vec<String> {
    parse_blocks(content.lines())
        .into_iter()
        .filter_map(|block| match block {
            Block::Code { language, source } if language.eq_ignore_ascii_case("mermaid") => {
                Some(source)
            }
            _ => None,
        })
        .collect()
}

/// Number of blocks using each required arrow, in [`REQUIRED_ARROWS`] order.
pub fn arrow_coverage<S: AsRef<str>>(blocks: &[S]) -> Vec<(&'static str, usize)> {
    REQUIRED_ARROWS
        .iter()
        .map(|&arrow| {
            let count = blocks.iter().filter(|b| b.as_ref().contains(arrow)).count();
            (arrow, count)
        })
        .collect()
}

/// Check arrow coverage over every markdown file below `source_dir`.
pub fn check_diagrams(
    source_dir: &Path,
    ignore_dirs: &[String],
) -> Result<Vec<Violation>, CheckError> {
    let mut blocks = Vec::new();
    for path in markdown_files(source_dir, ignore_dirs)? {
        let content = std::fs::read_to_string(&path).map_err(|e| CheckError::io(&path, e))?;
        let found = mermaid_blocks(&content);
        if !found.is_empty() {
            tracing::debug!(
                path = %relative(source_dir, &path),
                blocks = found.len(),
                "Found mermaid blocks"
            );
        }
        blocks.extend(found);
    }

    if blocks.is_empty() {
        return Ok(vec![Violation::new(
            CheckKind::Diagrams,
            COURSE_LOCATION,
            "no mermaid blocks found",
        )]);
    }

    tracing::info!(blocks = blocks.len(), "Checking arrow coverage");
    Ok(arrow_coverage(&blocks)
        .into_iter()
        .filter(|(_, count)| *count == 0)
        .map(|(arrow, _)| {
            Violation::new(
                CheckKind::Diagrams,
                COURSE_LOCATION,
                format!("no mermaid block uses '{arrow}'"),
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mermaid_blocks() {
        let content = "# T\n```mermaid\ngraph TD\nA --> B\n```\n```kotlin\nval a = b --> c\n```\n```Mermaid\nA ==> B\n```";
        assert_eq!(mermaid_blocks(content), vec!["graph TD\nA --> B", "A ==> B"]);
    }

    #[test]
    fn test_arrow_coverage() {
        let blocks = ["A --> B\nB -.-> C", "A --> B"];
        assert_eq!(
            arrow_coverage(&blocks),
            vec![("-->", 2), ("-.->", 1), ("==>", 0), ("--o", 0)]
        );
    }

    #[test]
    fn test_no_blocks_is_a_violation() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.md"), "# No diagrams").unwrap();
        let violations = check_diagrams(dir.path(), &[]).unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "no mermaid blocks found");
    }

    #[test]
    fn test_missing_arrows_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("a.md"),
            "```mermaid\nflowchart LR\nA --> B\nB -.-> C\n```\n",
        )
        .unwrap();
        std::fs::create_dir(dir.path().join("dist")).unwrap();
        std::fs::write(dir.path().join("dist/b.md"), "```mermaid\nA ==> B\n```\n").unwrap();

        let messages: Vec<_> = check_diagrams(dir.path(), &["dist".to_owned()])
            .unwrap()
            .into_iter()
            .map(|v| v.message)
            .collect();
        assert_eq!(
            messages,
            vec!["no mermaid block uses '==>'", "no mermaid block uses '--o'"]
        );
    }
}
