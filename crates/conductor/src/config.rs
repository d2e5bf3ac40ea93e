//! Configuration loading for the conductor.
//!
//! All installation settings are loaded from a TOML configuration file.
//! Every section has defaults, so a partial (or missing) file still yields
//! a runnable installation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete installation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallationConfig {
    /// Simulation settings
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Weather retrieval settings
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Sonification and projection settings
    #[serde(default)]
    pub sonifier: SonifierConfig,
    /// Filesystem paths
    #[serde(default)]
    pub paths: PathsConfig,
}

impl InstallationConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::TomlError)
    }

    /// Returns the configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, TomlSerializeError> {
        toml::to_string_pretty(self).map_err(TomlSerializeError)
    }
}

/// Simulation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of double pendulums
    pub pendulum_count: usize,
    /// Integration step, seconds
    pub dt: f64,
    /// Target frame rate
    pub fps: u64,
    /// Random seed for body sampling
    pub seed: u64,
    /// Initial angle offset range around π/2, radians
    pub angle_range: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            pendulum_count: 20,
            dt: 0.01,
            fps: 60,
            seed: 42,
            angle_range: 0.1,
        }
    }
}

/// Weather retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// City to fetch weather for
    pub location: String,
    /// Seconds between weather refreshes
    pub refresh_interval_secs: u64,
    /// Temperature assumed when no fetch has succeeded yet
    pub fallback_temperature: f64,
    /// Condition assumed when no fetch has succeeded yet
    pub fallback_condition: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            location: "Barcelona".to_string(),
            refresh_interval_secs: 300,
            fallback_temperature: 15.0,
            fallback_condition: "Clear".to_string(),
        }
    }
}

/// Sonification and projection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SonifierConfig {
    /// Suspension point, plane coordinates
    pub origin: (f64, f64),
    /// Unit arm length in plane units
    pub scale: f64,
    /// Crossing hysteresis distance, plane units
    pub crossing_threshold: f64,
    /// Output volume for the audio-model path, 0.0 to 1.0
    pub volume: f64,
}

impl Default for SonifierConfig {
    fn default() -> Self {
        Self {
            origin: (650.0, 200.0),
            scale: 150.0,
            crossing_threshold: 5.0,
            volume: 0.5,
        }
    }
}

/// Filesystem paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Weather-to-music mapping file; the builtin table is used when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub music_mapping: Option<PathBuf>,
    /// Directory watched for control files
    pub control_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            music_mapping: None,
            control_dir: PathBuf::from("control"),
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file
    IoError(std::io::Error),
    /// Error parsing TOML config
    TomlError(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::TomlError(e) => write!(f, "TOML parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::TomlError(e) => Some(e),
        }
    }
}

/// Error that can occur during TOML serialization.
#[derive(Debug)]
pub struct TomlSerializeError(pub toml::ser::Error);

impl std::fmt::Display for TomlSerializeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TOML serialize error: {}", self.0)
    }
}

impl std::error::Error for TomlSerializeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Installation Configuration

[simulation]
pendulum_count = 20
dt = 0.01
fps = 60
seed = 42
angle_range = 0.1

[weather]
location = "Barcelona"
refresh_interval_secs = 300
fallback_temperature = 15.0
fallback_condition = "Clear"

[sonifier]
origin = [650.0, 200.0]
scale = 150.0
crossing_threshold = 5.0
volume = 0.5

[paths]
control_dir = "control"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = InstallationConfig::default();

        assert_eq!(config.simulation.pendulum_count, 20);
        assert_eq!(config.simulation.dt, 0.01);
        assert_eq!(config.simulation.fps, 60);
        assert_eq!(config.weather.location, "Barcelona");
        assert_eq!(config.sonifier.crossing_threshold, 5.0);
        assert!(config.paths.music_mapping.is_none());
    }

    #[test]
    fn test_parse_config_from_toml() {
        let toml = r#"
            [simulation]
            pendulum_count = 8
            seed = 7

            [weather]
            location = "Helsinki"
            refresh_interval_secs = 60

            [sonifier]
            origin = [400.0, 100.0]
        "#;

        let config = InstallationConfig::from_str(toml).unwrap();

        assert_eq!(config.simulation.pendulum_count, 8);
        assert_eq!(config.simulation.seed, 7);
        assert_eq!(config.weather.location, "Helsinki");
        assert_eq!(config.weather.refresh_interval_secs, 60);
        assert_eq!(config.sonifier.origin, (400.0, 100.0));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
            [simulation]
            pendulum_count = 5
        "#;

        let config = InstallationConfig::from_str(toml).unwrap();

        // Specified value
        assert_eq!(config.simulation.pendulum_count, 5);
        // Default values
        assert_eq!(config.simulation.dt, 0.01);
        assert_eq!(config.weather.location, "Barcelona");
        assert_eq!(config.sonifier.scale, 150.0);
    }

    #[test]
    fn test_empty_config_parses() {
        let config = InstallationConfig::from_str("").unwrap();
        assert_eq!(config.simulation.fps, 60);
    }

    #[test]
    fn test_default_config_toml_parses() {
        let toml = default_config_toml();
        let config = InstallationConfig::from_str(&toml).unwrap();

        assert_eq!(config.simulation.pendulum_count, 20);
        assert_eq!(config.sonifier.origin, (650.0, 200.0));
        assert_eq!(config.paths.control_dir, PathBuf::from("control"));
    }

    #[test]
    fn test_config_to_toml_round_trips() {
        let mut config = InstallationConfig::default();
        config.weather.location = "Reykjavik".to_string();
        config.paths.music_mapping = Some(PathBuf::from("mapping.json"));

        let toml = config.to_toml().unwrap();
        let parsed = InstallationConfig::from_str(&toml).unwrap();

        assert_eq!(parsed.weather.location, "Reykjavik");
        assert_eq!(parsed.paths.music_mapping, Some(PathBuf::from("mapping.json")));
    }
}
