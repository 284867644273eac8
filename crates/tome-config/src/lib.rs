//! Configuration management for tome.
//!
//! Parses `tome.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `course.title`
//! - `output.file`

mod expand;

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override course source directory.
    pub source_dir: Option<PathBuf>,
    /// Override output HTML file.
    pub output_file: Option<PathBuf>,
    /// Override parallel rendering flag.
    pub parallel: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "tome.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Course metadata.
    pub course: CourseConfig,
    /// Source configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Output configuration (paths are relative strings from TOML).
    output: OutputConfigRaw,
    /// Rendering options.
    pub render: RenderConfig,
    /// Top-level directory name to navigation section label.
    pub sections: BTreeMap<String, String>,
    /// Checker configuration.
    pub check: CheckConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Course metadata.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CourseConfig {
    /// Page title.
    pub title: String,
    /// Value of the `course-id` meta tag.
    pub id: String,
    /// Value of the `lang` attribute.
    pub lang: String,
    /// Navigation label for files at the root of the source directory.
    pub root_label: String,
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            title: "Course".to_owned(),
            id: "course".to_owned(),
            lang: "en".to_owned(),
            root_label: "Introduction".to_owned(),
        }
    }
}

/// Raw docs configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    manifest: Option<Vec<String>>,
    manifest_file: Option<String>,
}

/// Resolved source configuration.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Course root directory.
    pub source_dir: PathBuf,
    /// Ordered lesson paths relative to `source_dir`.
    pub manifest: Vec<String>,
}

/// Raw output configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    file: Option<String>,
    toc_json: Option<bool>,
}

/// Resolved output configuration.
#[derive(Debug, Default)]
pub struct OutputConfig {
    /// The single HTML page to write.
    pub file: PathBuf,
    /// Also write `toc.json` next to the page.
    pub toc_json: bool,
}

/// Rendering options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Render `![alt](src)` as images.
    pub images: bool,
    /// Render documents on the rayon thread pool.
    pub parallel: bool,
    /// Fence languages that get a `language-*` class. `None` keeps the
    /// renderer's built-in list.
    pub code_languages: Option<Vec<String>>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            images: true,
            parallel: false,
            code_languages: None,
        }
    }
}

/// Checker configuration. Paths are relative to the source directory.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Directories that must exist.
    pub required_dirs: Vec<String>,
    /// Files that must exist.
    pub required_files: Vec<String>,
    /// Directory names skipped when scanning for markdown.
    pub ignore_dirs: Vec<String>,
    /// File to heading lines it must contain (e.g. `"## Objectives"`).
    pub required_headings: BTreeMap<String, Vec<String>>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            required_dirs: Vec::new(),
            required_files: Vec::new(),
            ignore_dirs: vec![
                "dist".to_owned(),
                "node_modules".to_owned(),
                "target".to_owned(),
            ],
            required_headings: BTreeMap::new(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`course.title`").
        field: String,
        /// Error message (e.g., "${`COURSE_TITLE`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a manifest entry to be a relative `.md` path that stays inside the
/// source directory.
fn require_lesson_path(entry: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(entry, field)?;
    let path = Path::new(entry);
    if path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return Err(ConfigError::Validation(format!(
            "{field} must be a relative path inside the source directory: {entry}"
        )));
    }
    if path.extension().and_then(|e| e.to_str()) != Some("md") {
        return Err(ConfigError::Validation(format!(
            "{field} must be a .md file: {entry}"
        )));
    }
    Ok(())
}

/// Parse a manifest file: one path per line, `#` comments and blank lines
/// ignored.
#[must_use]
pub fn parse_manifest(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect()
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `tome.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_file) = &settings.output_file {
            self.output_resolved.file.clone_from(output_file);
        }
        if let Some(parallel) = settings.parallel {
            self.render.parallel = parallel;
        }
    }

    /// Label for a top-level directory in the navigation.
    ///
    /// Root-level files (empty segment) use `course.root_label`; unknown
    /// segments fall back to the segment itself.
    #[must_use]
    pub fn section_label<'a>(&'a self, segment: &'a str) -> &'a str {
        if segment.is_empty() {
            return &self.course.root_label;
        }
        self.sections.get(segment).map_or(segment, String::as_str)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            course: CourseConfig::default(),
            docs: DocsConfigRaw::default(),
            output: OutputConfigRaw::default(),
            render: RenderConfig::default(),
            sections: BTreeMap::new(),
            check: CheckConfig::default(),
            docs_resolved: DocsConfig {
                source_dir: base.to_path_buf(),
                manifest: Vec::new(),
            },
            output_resolved: OutputConfig {
                file: base.join("dist").join("course.html"),
                toc_json: false,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.course.title, "course.title")?;
        require_non_empty(&self.course.id, "course.id")?;
        require_non_empty(&self.course.lang, "course.lang")?;
        for (index, entry) in self.docs_resolved.manifest.iter().enumerate() {
            require_lesson_path(entry, &format!("docs.manifest[{index}]"))?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.course.title = expand::expand_env(&self.course.title, "course.title")?;
        if let Some(ref file) = self.output.file {
            self.output.file = Some(expand::expand_env(file, "output.file")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory and read the
    /// manifest file if one is configured.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        let manifest = match (&self.docs.manifest, &self.docs.manifest_file) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::Validation(
                    "docs.manifest and docs.manifest_file are mutually exclusive".to_owned(),
                ));
            }
            (Some(list), None) => list.iter().map(|e| e.trim().to_owned()).collect(),
            (None, Some(file)) => parse_manifest(&std::fs::read_to_string(config_dir.join(file))?),
            (None, None) => Vec::new(),
        };

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "."),
            manifest,
        };
        self.output_resolved = OutputConfig {
            file: resolve(self.output.file.as_deref(), "dist/course.html"),
            toc_json: self.output.toc_json.unwrap_or(false),
        };

        Ok(())
    }
}
