//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orgchart/orgchart.toml`
//! 3. Explicit config file passed on the command line
//! 4. Environment variables: `ORGCHART_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::{RenderOptions, RenderStyle, MAX_INDENT};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("config error: {message}")]
    Config { message: String },

    #[error("config file not found: {0}")]
    NotFound(PathBuf),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Raw render settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRenderSettings {
    pub indent: Option<usize>,
    pub marker: Option<String>,
    pub style: Option<RenderStyle>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub ceo: Option<String>,
    pub render: RawRenderSettings,
}

/// Unified configuration for orgchart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Name of the CEO in the sample chart (default: "CEO")
    pub ceo: Option<String>,
    /// Output rendering
    pub render: RenderOptions,
}

/// Get the XDG config directory for orgchart.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orgchart").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("orgchart.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> SettingsResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| SettingsError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| SettingsError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn parse_style(value: &str) -> SettingsResult<RenderStyle> {
    match value.trim().to_ascii_lowercase().as_str() {
        "indent" => Ok(RenderStyle::Indent),
        "tree" => Ok(RenderStyle::Tree),
        other => Err(SettingsError::Config {
            message: format!("unknown render style: {other} (expected indent or tree)"),
        }),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value, otherwise keep self.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            ceo: overlay.ceo.clone().or_else(|| self.ceo.clone()),
            render: RenderOptions {
                indent: overlay.render.indent.unwrap_or(self.render.indent),
                marker: overlay
                    .render
                    .marker
                    .clone()
                    .unwrap_or_else(|| self.render.marker.clone()),
                style: overlay.render.style.unwrap_or(self.render.style),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional file layered over the global config; must exist if given
    pub fn load(config_file: Option<&Path>) -> SettingsResult<Self> {
        Self::load_layers(global_config_path().as_deref(), config_file)
    }

    /// Load settings from an explicit global path instead of the XDG location.
    ///
    /// A missing global file is skipped; a missing `config_file` is an error.
    #[instrument(level = "debug")]
    pub fn load_layers(global: Option<&Path>, config_file: Option<&Path>) -> SettingsResult<Self> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config, if present
        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            if !path.exists() {
                return Err(SettingsError::NotFound(path.to_path_buf()));
            }
            debug!("loading config file: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables (explicit override)
        let settings = Self::apply_env_overrides(current)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the renderer cannot honour.
    pub fn validate(&self) -> SettingsResult<()> {
        if self.render.indent > MAX_INDENT {
            return Err(SettingsError::Config {
                message: format!(
                    "render.indent = {} is too large (max {MAX_INDENT})",
                    self.render.indent
                ),
            });
        }
        Ok(())
    }

    /// Apply ORGCHART_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> SettingsResult<Self> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ORGCHART")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("ceo") {
            settings.ceo = Some(val);
        }
        if let Ok(val) = config.get_string("render.indent") {
            settings.render.indent = val.trim().parse().map_err(|e| SettingsError::Config {
                message: format!("ORGCHART_RENDER__INDENT: {e}"),
            })?;
        }
        if let Ok(val) = config.get_string("render.marker") {
            settings.render.marker = val;
        }
        if let Ok(val) = config.get_string("render.style") {
            settings.render.style = parse_style(&val)?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> SettingsResult<String> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# orgchart configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/orgchart/orgchart.toml
#   File:   orgchart --config <FILE>
#   Env:    ORGCHART_* environment variables, e.g. ORGCHART_RENDER__STYLE=tree

# Name of the CEO at the root of the sample chart
# ceo = "CEO"

[render]
# Spaces per level of depth
# indent = 1

# Written between the indentation and the name
# marker = "- "

# "indent" for an outline, "tree" for box drawing
# style = "indent"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> SettingsError {
    SettingsError::Config {
        message: e.to_string(),
    }
}
