//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/anemia/anemia.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `ANEMIA_*` prefix
//!
//! Command-line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, Mode};
use crate::domain::expand_env_vars;

/// Unified configuration for anemia.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Mode used by `run` and by a bare invocation
    pub mode: Mode,
    /// Icon path attached to every item
    pub icon: String,
    /// Launcher keyword shown in usage hints
    pub keyword: String,
    /// Pretty-print the JSON document
    pub pretty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::Flow,
            icon: "icon.png".into(),
            keyword: "anemia".into(),
            pretty: false,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub mode: Option<Mode>,
    pub icon: Option<String>,
    pub keyword: Option<String>,
    pub pretty: Option<bool>,
}

/// Get the XDG config directory for anemia.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "anemia").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("anemia.toml"))
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

impl Settings {
    /// Overlay wins where it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            mode: overlay.mode.unwrap_or(self.mode),
            icon: overlay.icon.clone().unwrap_or_else(|| self.icon.clone()),
            keyword: overlay
                .keyword
                .clone()
                .unwrap_or_else(|| self.keyword.clone()),
            pretty: overlay.pretty.unwrap_or(self.pretty),
        }
    }

    /// Expand `~`, `$VAR` and `${VAR}` in the icon path.
    fn expand_paths(&mut self) {
        self.icon = expand_env_vars(&self.icon);
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file layered over the global one; must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = explicit {
            debug!("load: explicit config {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply ANEMIA_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("ANEMIA"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("mode") {
            settings.mode = Mode::from_str(&val, true).map_err(|e| ApplicationError::Config {
                message: format!("ANEMIA_MODE: {}", e),
            })?;
        }
        if let Ok(val) = config.get_string("icon") {
            settings.icon = val;
        }
        if let Ok(val) = config.get_string("keyword") {
            settings.keyword = val;
        }
        if let Ok(val) = config.get_bool("pretty") {
            settings.pretty = val;
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
        r#"# anemia configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/anemia/anemia.toml
#   Explicit: anemia --config <file>
#   Env:      ANEMIA_* environment variables (ANEMIA_MODE, ANEMIA_ICON, ...)

# Mode for `anemia run` and bare invocations: "flow", "labs" or "screen"
# mode = "flow"

# Icon attached to every item (~ and $VAR are expanded)
# icon = "icon.png"

# Launcher keyword shown in usage hints
# keyword = "anemia"

# Pretty-print the JSON document
# pretty = false
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
