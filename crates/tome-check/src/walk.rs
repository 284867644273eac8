//! Markdown discovery.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::error::CheckError;

/// Every `.md` file below `root`, sorted, skipping hidden entries and any
/// directory whose name is in `ignore_dirs`.
pub(crate) fn markdown_files(
    root: &Path,
    ignore_dirs: &[String],
) -> Result<Vec<PathBuf>, CheckError> {
    let ignored = ignore_dirs.to_vec();
    let mut builder = WalkBuilder::new(root);
    builder.hidden(true).filter_entry(move |entry| {
        let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
        !(is_dir
            && entry.depth() > 0
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| ignored.iter().any(|i| i == name)))
    });

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        let is_file = entry.file_type().is_some_and(|t| t.is_file());
        if is_file && entry.path().extension().is_some_and(|e| e == "md") {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// `path` relative to `root` with `/` separators.
pub(crate) fn relative(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
