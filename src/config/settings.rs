//! Configuration settings for lrcsync.

use crate::source::DEFAULT_MARKER;
use crate::sync::SyncOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub playback: PlaybackSettings,
    pub document: DocumentSettings,
}

/// General application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Highlight behavior while following playback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Scroll the highlighted line to the center of the view.
    pub auto_scroll: bool,
    /// Pause at every line boundary until playback is resumed.
    pub sentence_mode: bool,
    /// Interval between player time updates, in milliseconds.
    pub tick_interval_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            auto_scroll: true,
            sentence_mode: false,
            tick_interval_ms: 250,
        }
    }
}

/// How transcripts are found inside notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSettings {
    /// Fence line opening a transcript block.
    pub block_marker: String,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            block_marker: DEFAULT_MARKER.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&Path>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => Self::expand_path(&p.to_string_lossy()),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            settings.validate()?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::LrcsyncError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lrcsync")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Mode flags for a new synchronizer.
    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            auto_scroll: self.playback.auto_scroll,
            sentence_mode: self.playback.sentence_mode,
        }
    }

    pub(crate) fn validate(&self) -> crate::error::Result<()> {
        if self.playback.tick_interval_ms == 0 {
            return Err(crate::error::LrcsyncError::Config(
                "playback.tick_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.document.block_marker.trim().is_empty() {
            return Err(crate::error::LrcsyncError::Config(
                "document.block_marker must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
