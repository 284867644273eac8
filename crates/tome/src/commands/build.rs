//! `tome build` command implementation.

use std::path::PathBuf;

use clap::Args;
use tome_config::{CliSettings, Config};
use tome_site::{BuildOutput, CourseBuilder};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover tome.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output HTML file (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render lessons in parallel.
    #[arg(long)]
    parallel: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let built = self.run(&output)?;

        let warnings: usize = built.lessons.iter().map(|l| l.warnings.len()).sum();
        let problems = built.skipped.len() + warnings;
        if problems > 0 {
            output.warning(&format!(
                "{} lesson(s) skipped, {warnings} render warning(s); rerun with --verbose for details",
                built.skipped.len()
            ));
        }
        Ok(())
    }

    /// Load the config, build the course and write it.
    ///
    /// Skipped lessons and render warnings are logged by the builder.
    fn run(self, output: &Output) -> Result<BuildOutput, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_file: self.output,
            parallel: self.parallel.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let target = &config.output_resolved.file;

        output.info(&format!(
            "Source: {}",
            config.docs_resolved.source_dir.display()
        ));

        let built = CourseBuilder::new(&config).write(target)?;

        output.success(&format!(
            "Built {} lesson(s) to {} (version {})",
            built.lessons.len(),
            target.display(),
            built.version
        ));
        Ok(built)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    const CONFIG: &str = r#"
[course]
title = "Android Architecture"
id = "android-arch"

[docs]
source_dir = "docs"
manifest = ["00-intro.md", "01-junior/00-setup.md", "01-junior/09-missing.md"]

[output]
file = "site/index.html"
toc_json = true
"#;

    fn course(root: &Path) -> PathBuf {
        std::fs::create_dir_all(root.join("docs/01-junior")).unwrap();
        std::fs::write(root.join("docs/00-intro.md"), "# Welcome\n\nStart here.\n").unwrap();
        std::fs::write(root.join("docs/01-junior/00-setup.md"), "# Setup\n\n- [ ] JDK\n").unwrap();
        let config = root.join("tome.toml");
        std::fs::write(&config, CONFIG).unwrap();
        config
    }

    fn args(config: PathBuf) -> BuildArgs {
        BuildArgs {
            config: Some(config),
            source_dir: None,
            output: None,
            parallel: false,
            verbose: false,
        }
    }

    #[test]
    fn test_build_writes_page_and_toc() {
        let dir = tempfile::tempdir().unwrap();
        let config = course(dir.path());

        let built = args(config).run(&Output::new()).unwrap();

        assert_eq!(built.lessons.len(), 2);
        assert_eq!(built.skipped, vec!["01-junior/09-missing.md"]);
        let page = std::fs::read_to_string(dir.path().join("site/index.html")).unwrap();
        assert!(page.contains("<title>Android Architecture</title>"));
        assert!(page.contains(r#"id="s000-welcome""#));
        let toc = std::fs::read_to_string(dir.path().join("site/toc.json")).unwrap();
        assert!(toc.contains("\"Setup\""));
    }

    #[test]
    fn test_output_override() {
        let dir = tempfile::tempdir().unwrap();
        let config = course(dir.path());
        let target = dir.path().join("out/other.html");

        let build = BuildArgs {
            output: Some(target.clone()),
            ..args(config)
        };
        build.execute().unwrap();

        assert!(target.is_file());
        assert!(!dir.path().join("site/index.html").exists());
    }

    #[test]
    fn test_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = args(dir.path().join("nope.toml")).execute().unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
