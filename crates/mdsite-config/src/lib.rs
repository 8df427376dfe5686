//! Configuration management for mdsite.
//!
//! Parses `mdsite.toml` configuration files with serde and provides
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
//! - `site.base_path`
//! - `paths.*`

mod expand;

use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site base path.
    pub base_path: Option<String>,
    /// Override markdown content directory.
    pub content_dir: Option<PathBuf>,
    /// Override static assets directory.
    pub static_dir: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override page template file.
    pub template: Option<PathBuf>,
    /// Override clean flag.
    pub clean: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdsite.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site configuration.
    pub site: SiteConfig,
    /// Path configuration (relative strings from TOML).
    #[serde(default)]
    paths: PathsConfigRaw,
    /// Build configuration.
    pub build: BuildConfig,

    /// Resolved path configuration (set after loading).
    #[serde(skip)]
    pub paths_resolved: PathsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Prefix for root-relative `href` and `src` URLs, e.g. `/blog/`.
    pub base_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_path: "/".to_owned(),
        }
    }
}

/// Raw path configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PathsConfigRaw {
    content_dir: Option<String>,
    static_dir: Option<String>,
    output_dir: Option<String>,
    template: Option<String>,
}

/// Resolved path configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PathsConfig {
    /// Markdown sources.
    pub content_dir: PathBuf,
    /// Files copied verbatim into the output.
    pub static_dir: PathBuf,
    /// Generated site.
    pub output_dir: PathBuf,
    /// Page template with `{{ Title }}` and `{{ Content }}` placeholders.
    pub template: PathBuf,
}

impl PathsConfig {
    /// Default layout relative to `base`.
    fn with_base(base: &Path) -> Self {
        Self {
            content_dir: normalize(&base.join("content")),
            static_dir: normalize(&base.join("static")),
            output_dir: normalize(&base.join("docs")),
            template: normalize(&base.join("template.html")),
        }
    }
}

/// Build configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Delete the output directory before building.
    pub clean: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self { clean: true }
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
        /// Config field path (e.g., "`site.base_path`").
        field: String,
        /// Error message (e.g., "${`BASE_PATH`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Make `path` absolute against the current directory and fold away `.` and
/// `..` components. Symlinks are not resolved.
fn normalize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Require the output directory to stay clear of a source directory.
///
/// Cleaning an output directory that contains a source would delete it.
/// Paths are compared after normalization, and again after symlink
/// resolution when both exist.
fn require_disjoint(output: &Path, source: &Path, field: &str) -> Result<(), ConfigError> {
    let contains = normalize(source).starts_with(normalize(output))
        || matches!(
            (output.canonicalize(), source.canonicalize()),
            (Ok(output), Ok(source)) if source.starts_with(&output)
        );
    if contains {
        return Err(ConfigError::Validation(format!(
            "paths.output_dir cannot contain {field} ({})",
            source.display()
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdsite.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The merged
    /// configuration is validated last.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the merged configuration is invalid.
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

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    ///
    /// Relative paths resolve against the current directory.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_path) = &settings.base_path {
            self.site.base_path.clone_from(base_path);
        }
        if let Some(content_dir) = &settings.content_dir {
            self.paths_resolved.content_dir = normalize(content_dir);
        }
        if let Some(static_dir) = &settings.static_dir {
            self.paths_resolved.static_dir = normalize(static_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.paths_resolved.output_dir = normalize(output_dir);
        }
        if let Some(template) = &settings.template {
            self.paths_resolved.template = normalize(template);
        }
        if let Some(clean) = settings.clean {
            self.build.clean = clean;
        }
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
            site: SiteConfig::default(),
            paths: PathsConfigRaw::default(),
            build: BuildConfig::default(),
            paths_resolved: PathsConfig::with_base(base),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically at the end of [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_paths()?;
        Ok(())
    }

    /// Validate site configuration.
    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.base_path, "site.base_path")?;
        if !self.site.base_path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "site.base_path must start with / (got {:?})",
                self.site.base_path
            )));
        }
        Ok(())
    }

    /// Validate path configuration.
    fn validate_paths(&self) -> Result<(), ConfigError> {
        let paths = &self.paths_resolved;
        require_disjoint(&paths.output_dir, &paths.content_dir, "paths.content_dir")?;
        require_disjoint(&paths.output_dir, &paths.static_dir, "paths.static_dir")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.base_path = expand::expand_env(&self.site.base_path, "site.base_path")?;

        let paths = &mut self.paths;
        for (value, field) in [
            (&mut paths.content_dir, "paths.content_dir"),
            (&mut paths.static_dir, "paths.static_dir"),
            (&mut paths.output_dir, "paths.output_dir"),
            (&mut paths.template, "paths.template"),
        ] {
            if let Some(raw) = value.as_deref() {
                *value = Some(expand::expand_env(raw, field)?);
            }
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve =
            |path: Option<&str>, default: &str| normalize(&config_dir.join(path.unwrap_or(default)));

        self.paths_resolved = PathsConfig {
            content_dir: resolve(self.paths.content_dir.as_deref(), "content"),
            static_dir: resolve(self.paths.static_dir.as_deref(), "static"),
            output_dir: resolve(self.paths.output_dir.as_deref(), "docs"),
            template: resolve(self.paths.template.as_deref(), "template.html"),
        };
    }
}
