use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Frame timing and presentation settings for the game loop.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Target frames per second.
    pub frame_rate: u32,
    /// Frames to ignore clicks for after a successful move.
    pub move_cooldown_frames: u32,
    /// Falling animation speed, in board cells per frame.
    pub fall_speed: f32,
    /// Frames the victory banner takes to fade out.
    pub banner_frames: u32,
    /// Clear the board as soon as a game ends.
    pub auto_reset_on_win: bool,
    /// Preview the current player's piece over the hovered column.
    pub show_ghost: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            frame_rate: 60,
            move_cooldown_frames: 20,
            fall_speed: 0.11,
            banner_frames: 255,
            auto_reset_on_win: true,
            show_ghost: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file path. Logging is disabled when unset since the terminal
    /// belongs to the UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            file: None,
            level: "info".to_string(),
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.frame_rate == 0 {
            return Err(ConfigError::Validation(
                "display.frame_rate must be > 0".into(),
            ));
        }
        if self.display.frame_rate > 1000 {
            return Err(ConfigError::Validation(
                "display.frame_rate must be <= 1000".into(),
            ));
        }
        if !(self.display.fall_speed > 0.0) {
            return Err(ConfigError::Validation(
                "display.fall_speed must be > 0".into(),
            ));
        }
        if self.display.banner_frames == 0 {
            return Err(ConfigError::Validation(
                "display.banner_frames must be > 0".into(),
            ));
        }

        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
