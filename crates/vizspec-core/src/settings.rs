//! Session settings - persisted preferences for the focus panel.
//!
//! Settings are stored as TOML. Missing keys fall back to defaults so older
//! files keep loading.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;
use vizspec_model::Aggregate;

use crate::error::{CoreError, Result};

// =============================================================================
// ROOT SETTINGS
// =============================================================================

/// Settings for one composition session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// What the panel shows around the chart.
    pub display: DisplaySettings,

    /// Default spec derivation.
    pub derive: DeriveSettings,

    /// Collection (favorites) persistence.
    pub collection: CollectionSettings,
}

impl SessionSettings {
    /// Load settings from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| CoreError::SettingsFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings, falling back to defaults when the file is missing or bad.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(error) => {
                warn!(%error, "using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| CoreError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| CoreError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get the default config file path.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "vizspec", "vizspec")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }
}

// =============================================================================
// SECTIONS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Show the floating preview of the pinned view.
    pub show_mini_float_view: bool,
    /// Show generated narrative next to the chart.
    pub narrative: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_mini_float_view: true,
            narrative: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeriveSettings {
    /// Aggregate for grouped measures without an explicit encode.
    pub default_aggregate: Aggregate,
    /// Force a mark instead of choosing one from the field mix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionSettings {
    /// JSON file backing the collection store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}
