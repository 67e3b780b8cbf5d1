//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/sitetree/sitetree.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `SITETREE_*` prefix, `__` between section and key
//!    (e.g. `SITETREE_DEFAULTS__ROOM_WIDTH_MM=3000`)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::services::NodeDefaults;
use crate::application::ApplicationError;
use crate::domain::{DEFAULT_FLOOR_HEIGHT_MM, DEFAULT_ROOM_LENGTH_MM, DEFAULT_ROOM_WIDTH_MM};

/// Starting values for newly created rooms and floors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Width of a new room in mm (1000 - 5000)
    pub room_width_mm: u32,
    /// Length of a new room in mm (1000 - 5000)
    pub room_length_mm: u32,
    /// Height of a new floor in mm (2000 - 4000)
    pub floor_height_mm: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            room_width_mm: DEFAULT_ROOM_WIDTH_MM,
            room_length_mm: DEFAULT_ROOM_LENGTH_MM,
            floor_height_mm: DEFAULT_FLOOR_HEIGHT_MM,
        }
    }
}

/// Terminal output options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    /// Line printed between editor steps
    pub separator: String,
    /// Colored output (NO_COLOR still wins)
    pub color: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            separator: "-".repeat(47),
            color: true,
        }
    }
}

/// Raw config for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDefaultsConfig {
    pub room_width_mm: Option<u32>,
    pub room_length_mm: Option<u32>,
    pub floor_height_mm: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawUiConfig {
    pub separator: Option<String>,
    pub color: Option<bool>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub area_id: Option<u32>,
    pub defaults: RawDefaultsConfig,
    pub ui: RawUiConfig,
}

/// Unified configuration for sitetree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Id of the root area
    pub area_id: u32,
    /// Starting values for new nodes
    pub defaults: DefaultsConfig,
    /// Output options
    pub ui: UiConfig,
}

/// Get the XDG config directory for sitetree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sitetree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("sitetree.toml"))
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

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Merge overlay config onto self: overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            area_id: overlay.area_id.unwrap_or(self.area_id),
            defaults: DefaultsConfig {
                room_width_mm: overlay
                    .defaults
                    .room_width_mm
                    .unwrap_or(self.defaults.room_width_mm),
                room_length_mm: overlay
                    .defaults
                    .room_length_mm
                    .unwrap_or(self.defaults.room_length_mm),
                floor_height_mm: overlay
                    .defaults
                    .floor_height_mm
                    .unwrap_or(self.defaults.floor_height_mm),
            },
            ui: UiConfig {
                separator: overlay
                    .ui
                    .separator
                    .clone()
                    .unwrap_or_else(|| self.ui.separator.clone()),
                color: overlay.ui.color.unwrap_or(self.ui.color),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist if given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = config_file {
            debug!("loading config: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        Ok(current)
    }

    /// Apply SITETREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("SITETREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get::<u32>("area_id") {
            settings.area_id = val;
        }
        if let Ok(val) = config.get::<u32>("defaults.room_width_mm") {
            settings.defaults.room_width_mm = val;
        }
        if let Ok(val) = config.get::<u32>("defaults.room_length_mm") {
            settings.defaults.room_length_mm = val;
        }
        if let Ok(val) = config.get::<u32>("defaults.floor_height_mm") {
            settings.defaults.floor_height_mm = val;
        }
        if let Ok(val) = config.get_string("ui.separator") {
            settings.ui.separator = val;
        }
        if let Ok(val) = config.get_bool("ui.color") {
            settings.ui.color = val;
        }

        Ok(settings)
    }

    /// Defaults for new nodes must lie within the domain ranges.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        self.node_defaults()
            .validate()
            .map_err(|e| ApplicationError::Config {
                message: format!("invalid defaults: {}", e),
            })
    }

    pub fn node_defaults(&self) -> NodeDefaults {
        NodeDefaults {
            room_width_mm: self.defaults.room_width_mm,
            room_length_mm: self.defaults.room_length_mm,
            floor_height_mm: self.defaults.floor_height_mm,
        }
    }

    /// Serialize to TOML (for `config show` and `config init`).
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

/// Commented template written by `config init`.
pub fn config_template() -> String {
    let defaults = Settings::default();
    format!(
        r#"# sitetree configuration
# Environment variables override this file: SITETREE_DEFAULTS__ROOM_WIDTH_MM=3000

# Id of the root area
area_id = {area_id}

[defaults]
# Starting dimensions of new nodes in mm
room_width_mm = {width}
room_length_mm = {length}
floor_height_mm = {height}

[ui]
# Line printed between editor steps
separator = "{separator}"
# Colored output (NO_COLOR still wins)
color = {color}
"#,
        area_id = defaults.area_id,
        width = defaults.defaults.room_width_mm,
        length = defaults.defaults.room_length_mm,
        height = defaults.defaults.floor_height_mm,
        separator = defaults.ui.separator,
        color = defaults.ui.color,
    )
}
