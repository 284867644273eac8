//! Manifest entries must exist.

use std::path::Path;

use crate::report::{CheckKind, Violation};

/// One violation per manifest entry that is not a file below `source_dir`.
pub fn check_file_order(source_dir: &Path, manifest: &[String]) -> Vec<Violation> {
    manifest
        .iter()
        .filter(|entry| !source_dir.join(entry).is_file())
        .map(|entry| {
            Violation::new(
                CheckKind::Order,
                entry.as_str(),
                "listed in the manifest but not found",
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_entries_reported_in_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.md"), "").unwrap();
        std::fs::create_dir(dir.path().join("dir.md")).unwrap();

        let manifest = vec!["z.md".to_owned(), "a.md".to_owned(), "dir.md".to_owned()];
        let locations: Vec<_> = check_file_order(dir.path(), &manifest)
            .into_iter()
            .map(|v| v.location)
            .collect();
        assert_eq!(locations, vec!["z.md", "dir.md"]);
    }
}
