//! Configuration for the numark renderer.
//!
//! Parses `numark.toml` with serde and provides auto-discovery of the file
//! in parent directories. The `[render]` section maps onto renderer
//! [`Options`]:
//!
//! ```toml
//! [render]
//! dialect = "numl"
//! lang_prefix = "language-"
//! xhtml_out = false
//! link_target = "_blank"
//! breaks = false
//! ```
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `render.lang_prefix`
//! - `render.link_target`

mod expand;

use std::path::{Path, PathBuf};

use numark_renderer::{Dialect, Options};
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "numark.toml";

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override output dialect.
    pub dialect: Option<Dialect>,
    /// Override fence class prefix.
    pub lang_prefix: Option<String>,
    /// Override XHTML void element output.
    pub xhtml_out: Option<bool>,
    /// Override link target.
    pub link_target: Option<String>,
    /// Override soft break handling.
    pub breaks: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Render settings.
    pub render: RenderConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[render]` section.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Output dialect (`numl` or `html`).
    pub dialect: Dialect,
    /// Class prefix for labelled fenced blocks.
    pub lang_prefix: String,
    /// Emit XHTML-style void elements.
    pub xhtml_out: bool,
    /// Target for rendered links.
    pub link_target: Option<String>,
    /// Render soft breaks as hard breaks.
    pub breaks: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let options = Options::default();
        Self {
            dialect: options.dialect,
            lang_prefix: options.lang_prefix,
            xhtml_out: options.xhtml_out,
            link_target: options.link_target,
            breaks: options.breaks,
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
        /// Config field path (e.g., "`render.link_target`").
        field: String,
        /// Error message (e.g., "${`LINK_TARGET`} is not set").
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

/// Require a string field to contain no whitespace.
fn require_single_token(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "{field} cannot contain whitespace"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `numark.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
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
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_from(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        let render = &mut self.render;
        if let Some(dialect) = settings.dialect {
            render.dialect = dialect;
        }
        if let Some(lang_prefix) = &settings.lang_prefix {
            render.lang_prefix.clone_from(lang_prefix);
        }
        if let Some(xhtml_out) = settings.xhtml_out {
            render.xhtml_out = xhtml_out;
        }
        if let Some(link_target) = &settings.link_target {
            render.link_target = Some(link_target.clone());
        }
        if let Some(breaks) = settings.breaks {
            render.breaks = breaks;
        }
    }

    /// Search for the config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
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

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_single_token(&self.render.lang_prefix, "render.lang_prefix")?;
        if let Some(target) = &self.render.link_target {
            require_non_empty(target, "render.link_target")?;
            require_single_token(target, "render.link_target")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let render = &mut self.render;
        expand::expand_in_place(&mut render.lang_prefix, "render.lang_prefix")?;
        if let Some(target) = &mut render.link_target {
            expand::expand_in_place(target, "render.link_target")?;
        }
        Ok(())
    }

    /// Renderer options for this configuration.
    ///
    /// The highlighter is not configurable from TOML; set it on the returned
    /// value with [`Options::with_highlight`].
    #[must_use]
    pub fn options(&self) -> Options {
        let render = &self.render;
        Options {
            lang_prefix: render.lang_prefix.clone(),
            xhtml_out: render.xhtml_out,
            link_target: render.link_target.clone(),
            breaks: render.breaks,
            dialect: render.dialect,
            ..Options::default()
        }
    }
}
