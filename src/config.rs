//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treedo/treedo.toml`
//! 3. Environment variables: `TREEDO_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Unified configuration for treedo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Board file edited when `--file` is not given
    pub document: PathBuf,
    /// Show each node's address in `show` output
    pub show_addresses: bool,
    /// Color applied to nodes created without an explicit `--color`
    pub default_color: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            document: default_document_path(),
            show_addresses: true,
            default_color: None,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → field not specified,
/// inherit from the layer below).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub document: Option<PathBuf>,
    pub show_addresses: Option<bool>,
    pub default_color: Option<String>,
}

/// Get the default board path (~/.treedo/board.json).
fn default_document_path() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".treedo").join("board.json"))
        .unwrap_or_else(|| PathBuf::from("~/.treedo/board.json"))
}

/// Get the XDG config directory for treedo.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treedo").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treedo.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~`, `$VAR`, and `${VAR}` in a path string.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Merge overlay config onto self: overlay wins where specified,
    /// base is kept otherwise.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            document: overlay
                .document
                .clone()
                .unwrap_or_else(|| self.document.clone()),
            show_addresses: overlay.show_addresses.unwrap_or(self.show_addresses),
            default_color: overlay
                .default_color
                .clone()
                .or_else(|| self.default_color.clone()),
        }
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.document.to_string_lossy().as_ref());
        self.document = PathBuf::from(expanded);
    }

    /// Load settings with layered precedence.
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/treedo/treedo.toml`
    /// 3. Environment variables: `TREEDO_*` prefix (explicit override)
    pub fn load() -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply TREEDO_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder =
            Config::builder().add_source(Environment::with_prefix("TREEDO").separator("__"));
        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("document") {
            settings.document = PathBuf::from(val);
        }
        if let Ok(val) = config.get_bool("show_addresses") {
            settings.show_addresses = val;
        }
        if let Ok(val) = config.get_string("default_color") {
            settings.default_color = Some(val);
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# treedo configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/treedo/treedo.toml
#   Env:    TREEDO_* environment variables (explicit overrides)

# Board file edited when --file is not given
# document = "~/.treedo/board.json"

# Show each node's address in `show` output
# show_addresses = true

# Color applied to nodes created without an explicit --color
# default_color = "cyan"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
