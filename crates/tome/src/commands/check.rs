//! `tome check` command implementation.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tome_check::{CheckKind, CheckReport, Checker};
use tome_config::Config;

use crate::error::CliError;
use crate::output::Output;

/// Which checks to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum CheckTarget {
    /// Manifest entries exist.
    Order,
    /// Required directories, files and headings exist.
    Structure,
    /// Relative links and images resolve.
    Links,
    /// Mermaid blocks cover every arrow semantic.
    Diagrams,
    /// Every check.
    All,
}

impl CheckTarget {
    fn kinds(self) -> Vec<CheckKind> {
        match self {
            Self::Order => vec![CheckKind::Order],
            Self::Structure => vec![CheckKind::Structure],
            Self::Links => vec![CheckKind::Links],
            Self::Diagrams => vec![CheckKind::Diagrams],
            Self::All => CheckKind::ALL.to_vec(),
        }
    }
}

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Check to run.
    #[arg(value_enum, default_value_t = CheckTarget::All)]
    target: CheckTarget,

    /// Path to configuration file (default: auto-discover tome.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl CheckArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let report = self.run()?;

        for &check in &report.checks {
            let violations: Vec<_> = report.by_check(check).collect();
            output.check_result(check, &violations);
        }

        if report.is_ok() {
            Ok(())
        } else {
            Err(CliError::Violations {
                count: report.violations.len(),
            })
        }
    }

    fn run(&self) -> Result<CheckReport, CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        Ok(Checker::new(&config).run(&self.target.kinds())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_all_expands_to_every_check() {
        assert_eq!(CheckTarget::All.kinds(), CheckKind::ALL.to_vec());
        assert_eq!(CheckTarget::Links.kinds(), vec![CheckKind::Links]);
    }

    const CONFIG: &str = r#"
[course]
title = "T"
id = "t"

[docs]
source_dir = "docs"
manifest = ["00-intro.md", "01-gone.md"]
"#;

    fn args(root: &std::path::Path, target: CheckTarget) -> CheckArgs {
        std::fs::create_dir_all(root.join("docs")).unwrap();
        std::fs::write(root.join("docs/00-intro.md"), "# Intro\n\n[setup](00-setup.md)\n").unwrap();
        std::fs::write(root.join("tome.toml"), CONFIG).unwrap();
        CheckArgs {
            target,
            config: Some(root.join("tome.toml")),
            verbose: false,
        }
    }

    #[test]
    fn test_failing_check_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = args(dir.path(), CheckTarget::Order).execute().unwrap_err();
        assert!(matches!(err, CliError::Violations { count: 1 }));
        assert_eq!(err.to_string(), "1 violation(s) found");
    }

    #[test]
    fn test_all_runs_every_check() {
        let dir = tempfile::tempdir().unwrap();
        let report = args(dir.path(), CheckTarget::All).run().unwrap();
        assert_eq!(report.checks, CheckKind::ALL.to_vec());
        let messages: Vec<_> = report.violations.iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec![
                "[order] 01-gone.md: listed in the manifest but not found",
                "[links] 00-intro.md:3: broken link: 00-setup.md",
                "[diagrams] .: no mermaid blocks found",
            ]
        );
    }

    #[test]
    fn test_passing_check_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs/00-setup.md"), "# Setup\n").unwrap();
        args(dir.path(), CheckTarget::Links).execute().unwrap();
    }
}
