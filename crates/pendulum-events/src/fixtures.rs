//! Sample data fixtures for testing.
//!
//! Ready-made events and configuration for other crates' tests. Enable the
//! `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // pendulum-events = { path = "../pendulum-events", features = ["test-fixtures"] }
//!
//! use pendulum_events::fixtures;
//!
//! let events = fixtures::sample_events();
//! let config = fixtures::sample_config();
//! ```

use crate::config::SharedConfig;
use crate::event::{Event, WeatherFetchFailure, WeatherUpdate};
use crate::music::{Key, Mode, Scale};

/// A representative event of every kind, in a plausible session order.
pub fn sample_events() -> Vec<Event> {
    vec![
        Event::LocationChanged("Helsinki".to_string()),
        Event::WeatherUpdated(WeatherUpdate {
            condition: "Light snow".to_string(),
            temperature: -3.0,
        }),
        Event::MusicSettingsChanged,
        Event::PendulumCountChanged(12),
        Event::MassRangeChanged(0.25),
        Event::LengthRangeChanged(0.15),
        Event::MoonModeChanged(true),
        Event::WeatherFetchError(WeatherFetchFailure {
            error_message: "timed out".to_string(),
            location: "Helsinki".to_string(),
        }),
    ]
}

/// A shared configuration mid-session: cold location, music derived from
/// snowy weather.
pub fn sample_config() -> SharedConfig {
    let mut config = SharedConfig::default();
    config.location = "Helsinki".to_string();
    config.temperature = -3.0;
    config.weather_condition = "Light snow".to_string();
    config.pendulum_count = 12;
    config.music.key = Key::D;
    config.music.scale = Scale::Minor;
    config.music.mode = Mode::Aeolian;
    config
}
