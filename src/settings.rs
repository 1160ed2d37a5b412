//! Game settings with persistence
//!
//! Settings are saved to `~/.config/stomp/settings.toml`

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use stomp_audio::CueDurations;
use stomp_game::PlayerConfig;
use tracing::{info, warn};

/// All game settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub player: PlayerConfig,
    pub audio: CueDurations,
    pub demo: DemoSettings,
}

impl GameSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("stomp"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Parse settings and validate the player tuning
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.player.validate()?;
        Ok(settings)
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to load settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        let path = dir.join("settings.toml");

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Headless demo settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Simulated time to run for, in seconds
    pub seconds: f32,
    /// Pace frames against the wall clock instead of running flat out
    pub realtime: bool,
    /// Visible screen size in pixels
    pub screen_width: i32,
    pub screen_height: i32,
    /// Time limit of every stage
    pub time_limit_ms: u64,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            seconds: 60.0,
            realtime: false,
            screen_width: 256,
            screen_height: 240,
            time_limit_ms: 300_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings() {
        let settings = GameSettings::from_toml_str(
            r#"
            [demo]
            seconds = 5.0

            [player]
            bullet_limit = 3
            "#,
        )
        .unwrap();

        assert_eq!(settings.demo.seconds, 5.0);
        assert_eq!(settings.demo.screen_height, 240);
        assert_eq!(settings.player.bullet_limit, 3);
        assert_eq!(settings.audio.die_ms, 3_000);
    }

    #[test]
    fn test_invalid_player_tuning_is_rejected() {
        assert!(GameSettings::from_toml_str("[player]\njump_power = -1.0").is_err());
    }

    #[test]
    fn test_defaults_survive_a_round_trip() {
        let content = toml::to_string_pretty(&GameSettings::default()).unwrap();
        let settings = GameSettings::from_toml_str(&content).unwrap();
        assert_eq!(settings.player, PlayerConfig::default());
    }
}
