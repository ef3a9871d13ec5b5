//! Import/export settings
//!
//! Settings live in a single JSON file. A missing file means defaults, and
//! so does a file that no longer parses (with a warning), so a stale or
//! hand-edited settings file never blocks a load.

use crate::error::StoreResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use style_model::FontFamily;

/// Main settings container
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StyleSettings {
    /// styles.xml output settings
    pub writer: WriterSettings,
    /// Registry loading settings
    pub loader: LoaderSettings,
}

/// styles.xml output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WriterSettings {
    /// Emit a `w:docDefaults` block before the styles
    pub include_doc_defaults: bool,
    /// Run fonts written into `w:docDefaults`
    pub default_fonts: FontFamily,
    /// Run font size written into `w:docDefaults`, in half-points
    pub default_font_size: u32,
    /// Write styles ordered by identifier instead of registry order
    pub sort_by_id: bool,
}

impl Default for WriterSettings {
    fn default() -> Self {
        Self {
            include_doc_defaults: true,
            default_fonts: FontFamily::new("Calibri", "宋体", "Calibri", "Times New Roman"),
            default_font_size: 21,
            sort_by_id: true,
        }
    }
}

/// Registry loading settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoaderSettings {
    /// Re-seed Normal and Heading1..Heading9 after loading a document that
    /// lacks them
    pub required_styles_check: bool,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            required_styles_check: true,
        }
    }
}

/// Settings manager for loading and saving settings
pub struct SettingsManager {
    /// Path to the settings file
    settings_path: PathBuf,
    /// Current settings (cached)
    current: StyleSettings,
}

impl SettingsManager {
    /// Create a settings manager backed by the given JSON file
    pub fn new(settings_path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: settings_path.into(),
            current: StyleSettings::default(),
        }
    }

    /// Get the path to the settings file
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Load settings from disk, or return defaults if file doesn't exist
    pub fn load(&mut self) -> StoreResult<&StyleSettings> {
        if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            match serde_json::from_str::<StyleSettings>(&content) {
                Ok(settings) => {
                    self.current = settings;
                }
                Err(e) => {
                    tracing::warn!(
                        path = %self.settings_path.display(),
                        "Failed to parse settings file, using defaults: {}",
                        e
                    );
                    self.current = StyleSettings::default();
                }
            }
        } else {
            self.current = StyleSettings::default();
        }
        Ok(&self.current)
    }

    /// Save current settings to disk
    pub fn save(&self) -> StoreResult<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }
}
