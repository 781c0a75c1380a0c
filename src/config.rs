//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SH_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use stagehand_core::{Clock, HOURS_PER_DAY, MINUTES_PER_HOUR};
use stagehand_input::AxisMap;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// In-game clock configuration
    #[serde(default)]
    pub clock: ClockConfig,
    /// Input axis configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Frame loop configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Scene configuration
    #[serde(default)]
    pub scene: SceneConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`SH_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // SH_CLOCK__START_HOUR=9 -> clock.start_hour = 9
        figment = figment.merge(Env::prefixed("SH_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the runtime cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clock.start_hour >= HOURS_PER_DAY {
            return Err(ConfigError::invalid(format!(
                "clock.start_hour must be below {}, got {}",
                HOURS_PER_DAY, self.clock.start_hour
            )));
        }
        if self.clock.start_minute >= MINUTES_PER_HOUR {
            return Err(ConfigError::invalid(format!(
                "clock.start_minute must be below {}, got {}",
                MINUTES_PER_HOUR, self.clock.start_minute
            )));
        }
        if !(self.clock.minute_duration > 0.0 && self.clock.minute_duration.is_finite()) {
            return Err(ConfigError::invalid(format!(
                "clock.minute_duration must be positive and finite, got {}",
                self.clock.minute_duration
            )));
        }
        if self.simulation.max_dt <= 0.0 {
            return Err(ConfigError::invalid(format!(
                "simulation.max_dt must be positive, got {}",
                self.simulation.max_dt
            )));
        }
        Ok(())
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Stagehand".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
        }
    }
}

/// In-game clock configuration
///
/// Used when the scene file does not set its own clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Starting hour (0-23)
    pub start_hour: u32,
    /// Starting minute (0-59)
    pub start_minute: u32,
    /// Real seconds per game minute
    pub minute_duration: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            start_hour: 10,
            start_minute: 0,
            minute_duration: 0.5,
        }
    }
}

impl ClockConfig {
    pub fn to_clock(&self) -> Clock {
        Clock::new(self.start_hour, self.start_minute, self.minute_duration)
    }
}

/// Input configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    /// Named axes (`[[input.axes]]` tables)
    pub axes: AxisMap,
}

/// Frame loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Longest frame step in seconds; longer gaps are clamped
    pub max_dt: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { max_dt: 0.25 }
    }
}

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// RON scene file; the built-in lab scene is used if it cannot be loaded
    pub path: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: "assets/scenes/labs.ron".to_string(),
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn invalid(message: String) -> Self {
        ConfigError { message }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.clock.start_hour, 10);
        assert_eq!(config.simulation.max_dt, 0.25);
        assert!(config.input.axes.contains("Vertical1"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("minute_duration"));
        assert!(toml.contains("Vertical2"));
    }

    #[test]
    fn test_validate_rejects_bad_clock() {
        let mut config = AppConfig::default();
        config.clock.minute_duration = 0.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.clock.start_hour = 24;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("start_hour"));

        let mut config = AppConfig::default();
        config.clock.start_minute = 60;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_max_dt() {
        let mut config = AppConfig::default();
        config.simulation.max_dt = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_clock_from_config() {
        let clock = ClockConfig { start_hour: 10, start_minute: 9, minute_duration: 2.0 }.to_clock();
        assert!(clock.reads(10, 9));
        assert_eq!(clock.minute_duration(), 2.0);
    }
}
