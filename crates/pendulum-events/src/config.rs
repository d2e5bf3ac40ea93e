//! Shared Configuration Record
//!
//! The process-wide environmental and musical parameter set. This is pure
//! data; the conductor owns the single instance and mutates it only inside
//! event handlers. Everything else reads it by cloned snapshot.

use serde::{Deserialize, Serialize};

use crate::music::{Key, Mode, Scale};

/// Current key/scale/mode the sonifier should play in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicSettings {
    pub key: Key,
    pub scale: Scale,
    pub mode: Mode,
}

impl Default for MusicSettings {
    fn default() -> Self {
        Self {
            key: Key::C,
            scale: Scale::Major,
            mode: Mode::Ionian,
        }
    }
}

/// Shared environmental and musical parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedConfig {
    /// City the weather is fetched for.
    pub location: String,
    /// Last fetched temperature, degrees Celsius.
    pub temperature: f64,
    /// Last fetched weather condition text.
    pub weather_condition: String,
    /// Reduced-gravity ("moon") mode.
    pub moon_mode: bool,
    /// Number of double pendulums in the ensemble.
    pub pendulum_count: usize,
    /// Mass variation range around 1.0.
    pub mass_range: f64,
    /// Length variation range around 1.0.
    pub length_range: f64,
    /// Current musical settings.
    pub music: MusicSettings,
    /// Output volume for the audio-model path, 0.0 to 1.0.
    pub volume: f64,
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self {
            location: "Barcelona".to_string(),
            temperature: 15.0,
            weather_condition: "Clear".to_string(),
            moon_mode: false,
            pendulum_count: 20,
            mass_range: 0.0,
            length_range: 0.0,
            music: MusicSettings::default(),
            volume: 0.5,
        }
    }
}
