//! Configuration management for the workout system
//!
//! Loads configuration from TOML files with sensible defaults.

use crate::navigator::SessionOptions;
use crate::timer::{AdvanceMode, TimerOptions};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub cues: CuesConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory for storing data files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("reps"))
        .unwrap_or_else(|| PathBuf::from(".reps"))
}

/// Timer behavior configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Countdown before the first set, in seconds; 0 disables it
    #[serde(default = "default_countdown_seconds")]
    pub countdown_seconds: u32,
    /// Record sets automatically when they reach their target
    #[serde(default = "default_true")]
    pub auto_advance: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            countdown_seconds: default_countdown_seconds(),
            auto_advance: true,
        }
    }
}

fn default_countdown_seconds() -> u32 {
    5
}

/// Cue emission configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CuesConfig {
    /// Master switch for audio cues
    #[serde(default = "default_true")]
    pub audio: bool,
    /// Master switch for visual cues
    #[serde(default = "default_true")]
    pub visual: bool,
    /// Short beep on every counted rep below the target
    #[serde(default = "default_true")]
    pub sub_target_reps: bool,
    /// Reminder beeps while holding an isometric set
    #[serde(default = "default_true")]
    pub hold_reminders: bool,
}

impl Default for CuesConfig {
    fn default() -> Self {
        Self {
            audio: true,
            visual: true,
            sub_target_reps: true,
            hold_reminders: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from the default location, falling back to
    /// defaults when no config file exists.
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from a specific TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Default config file location (platform config dir).
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("reps").join("config.toml"))
    }

    /// Write this configuration to a TOML file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Session options derived from the timer and cue sections.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            advance_mode: if self.timer.auto_advance {
                AdvanceMode::Auto
            } else {
                AdvanceMode::Manual
            },
            timer: TimerOptions {
                countdown_seconds: self.timer.countdown_seconds,
                sub_target_rep_cues: self.cues.sub_target_reps,
                hold_reminder_cues: self.cues.hold_reminders,
            },
            audio_cues: self.cues.audio,
            visual_cues: self.cues.visual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.timer.countdown_seconds, 5);
        assert!(config.timer.auto_advance);
        assert!(config.cues.audio);
        assert!(config.cues.visual);
    }

    #[test]
    fn test_load_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[timer]
countdown_seconds = 10
auto_advance = false

[cues]
audio = false
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.timer.countdown_seconds, 10);
        assert!(!config.timer.auto_advance);
        assert!(!config.cues.audio);
        // untouched sections keep defaults
        assert!(config.cues.visual);
        assert!(config.cues.sub_target_reps);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.timer.countdown_seconds = 3;
        config.cues.hold_reminders = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.timer.countdown_seconds, 3);
        assert!(!loaded.cues.hold_reminders);
    }

    #[test]
    fn test_invalid_toml_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timer = \"not a table\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_session_options_mapping() {
        let mut config = Config::default();
        config.timer.auto_advance = false;
        config.timer.countdown_seconds = 7;
        config.cues.sub_target_reps = false;

        let options = config.session_options();
        assert_eq!(options.advance_mode, AdvanceMode::Manual);
        assert_eq!(options.timer.countdown_seconds, 7);
        assert!(!options.timer.sub_target_rep_cues);
        assert!(options.audio_cues);
    }
}
