//! Course consistency checks.
//!
//! Each check scans the course source and returns every [`Violation`] it
//! finds instead of stopping at the first one. [`Checker`] runs a selection of
//! checks against a loaded [`Config`] and collects the results into a
//! [`CheckReport`].
//!
//! ```ignore
//! let checker = Checker::new(&config);
//! let report = checker.run(&CheckKind::ALL)?;
//! for violation in &report.violations {
//!     eprintln!("{violation}");
//! }
//! ```

mod diagrams;
mod error;
mod links;
mod order;
mod report;
mod structure;
mod walk;

pub use diagrams::{REQUIRED_ARROWS, arrow_coverage, check_diagrams, mermaid_blocks};
pub use error::CheckError;
pub use links::{check_links, find_broken_links};
pub use order::check_file_order;
pub use report::{CheckKind, CheckReport, Violation};
pub use structure::check_structure;

use tome_config::Config;

/// Runs checks against one course configuration.
pub struct Checker<'a> {
    config: &'a Config,
}

impl<'a> Checker<'a> {
    /// Create a checker for the given configuration.
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Run `checks` in order and collect every violation.
    ///
    /// # Errors
    ///
    /// Returns an error if the source directory cannot be walked or a file
    /// cannot be read.
    pub fn run(&self, checks: &[CheckKind]) -> Result<CheckReport, CheckError> {
        let source_dir = &self.config.docs_resolved.source_dir;
        let ignore_dirs = &self.config.check.ignore_dirs;
        let mut report = CheckReport::default();

        for &check in checks {
            let violations = match check {
                CheckKind::Order => {
                    check_file_order(source_dir, &self.config.docs_resolved.manifest)
                }
                CheckKind::Structure => check_structure(source_dir, &self.config.check)?,
                CheckKind::Links => check_links(source_dir, ignore_dirs)?,
                CheckKind::Diagrams => check_diagrams(source_dir, ignore_dirs)?,
            };
            if violations.is_empty() {
                tracing::info!(check = %check, "Check passed");
            } else {
                tracing::warn!(check = %check, violations = violations.len(), "Check failed");
            }
            report.extend(check, violations);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CONFIG: &str = r#"
[course]
title = "T"
id = "t"

[docs]
source_dir = "docs"
manifest = ["01-intro.md", "02-next.md"]
"#;

    #[test]
    fn test_run_selected_checks() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir(root.join("docs")).unwrap();
        let intro = root.join("docs/01-intro.md");
        std::fs::write(intro, "# Intro\n\n[next](02-next.md)\n").unwrap();
        std::fs::write(root.join("tome.toml"), CONFIG).unwrap();

        let config = Config::load(Some(&root.join("tome.toml")), None).unwrap();
        let report = Checker::new(&config)
            .run(&[CheckKind::Order, CheckKind::Links])
            .unwrap();

        assert!(!report.is_ok());
        assert_eq!(report.checks, vec![CheckKind::Order, CheckKind::Links]);
        let lines: Vec<_> = report.violations.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "[order] 02-next.md: listed in the manifest but not found",
                "[links] 01-intro.md:3: broken link: 02-next.md",
            ]
        );
    }
}
