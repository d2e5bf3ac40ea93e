//! Display Support
//!
//! Pure helpers for whatever front end renders the installation: the
//! temperature-to-color background palette and the status line texts.
//! Nothing here touches simulation state.

use pendulum_events::SharedConfig;
use pendulum_core::{EARTH_GRAVITY, MOON_GRAVITY};

/// Background color for the current conditions. Moon mode is black; on
/// Earth the palette walks cold blue through cyan, green, and orange to
/// red as the temperature climbs.
pub fn background_color(temperature: f64, moon_mode: bool) -> (u8, u8, u8) {
    if moon_mode {
        return (0, 0, 0);
    }

    if temperature <= 0.0 {
        (0, 0, 180)
    } else if temperature <= 10.0 {
        (0, 0, 255 - (temperature * 5.0) as u8)
    } else if temperature <= 20.0 {
        (
            0,
            ((temperature - 10.0) * 20.0) as u8,
            200 - ((temperature - 10.0) * 20.0) as u8,
        )
    } else if temperature <= 30.0 {
        (
            ((temperature - 20.0) * 20.0) as u8,
            200 - ((temperature - 20.0) * 10.0) as u8,
            0,
        )
    } else {
        (200 + (((temperature - 30.0) * 5.0) as u8).min(55), 50, 0)
    }
}

/// "Location: condition, temperature" line; just "Moon" in moon mode.
pub fn location_weather_text(config: &SharedConfig) -> String {
    if config.moon_mode {
        "Moon".to_string()
    } else {
        format!(
            "{}: {}, {}°C",
            config.location, config.weather_condition, config.temperature
        )
    }
}

pub fn gravity_text(config: &SharedConfig) -> String {
    let gravity = if config.moon_mode {
        MOON_GRAVITY
    } else {
        EARTH_GRAVITY
    };
    format!("Gravity: {} m/s²", gravity)
}

/// "Playing: ..." line with the key spelled using accidental symbols.
pub fn music_text(config: &SharedConfig) -> String {
    format!(
        "Playing: {} {} {}",
        config.music.key, config.music.scale, config.music.mode
    )
}
