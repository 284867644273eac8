//! Relative link and image targets must resolve.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::CheckError;
use crate::report::{CheckKind, Violation};
use crate::walk::{markdown_files, relative};

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!?)\[([^\]]*)\]\(([^)]+)\)").unwrap());

/// Targets that are never checked on disk.
const EXTERNAL_PREFIXES: &[&str] = &["http://", "https://", "mailto:", "tel:", "#"];

/// Broken targets in one file.
///
/// `file` is the location used in reports, `file_dir` the directory relative
/// targets resolve against and `root` the directory `/`-rooted targets resolve
/// against. Lines inside fenced code blocks are not scanned.
pub fn find_broken_links(
    file: &str,
    file_dir: &Path,
    root: &Path,
    content: &str,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut in_fence = false;

    for (index, line) in content.lines().enumerate() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        for caps in LINK.captures_iter(line) {
            let is_image = !caps[1].is_empty();
            let raw = caps[3].trim();
            let target = raw.split_whitespace().next().unwrap_or(raw);
            if EXTERNAL_PREFIXES.iter().any(|p| target.starts_with(p)) {
                continue;
            }
            let path = target.split(['#', '?']).next().unwrap_or_default();
            if path.is_empty() {
                continue;
            }

            let resolved = match path.strip_prefix('/') {
                Some(rooted) => root.join(rooted),
                None => file_dir.join(path),
            };
            if !resolved.exists() {
                let kind = if is_image { "missing image" } else { "broken link" };
                violations.push(Violation::new(
                    CheckKind::Links,
                    format!("{file}:{}", index + 1),
                    format!("{kind}: {target}"),
                ));
            }
        }
    }

    violations
}

/// Scan every markdown file below `source_dir`.
pub fn check_links(
    source_dir: &Path,
    ignore_dirs: &[String],
) -> Result<Vec<Violation>, CheckError> {
    let files = markdown_files(source_dir, ignore_dirs)?;
    tracing::info!(files = files.len(), "Checking links");

    let mut violations = Vec::new();
    for path in &files {
        let content = std::fs::read_to_string(path).map_err(|e| CheckError::io(path, e))?;
        let dir = path.parent().unwrap_or(source_dir);
        let file = relative(source_dir, path);
        violations.extend(find_broken_links(&file, dir, source_dir, &content));
    }
    Ok(violations)
}
