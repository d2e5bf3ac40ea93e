//! Event Types
//!
//! The closed set of events that flow through the installation. Every
//! configuration change — weather refresh, parameter edit, gravity toggle —
//! is expressed as one of these variants; there is no open-ended string
//! dispatch.

use serde::{Deserialize, Serialize};

/// Discriminant for an [`Event`], used as the subscription key on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    LocationChanged,
    WeatherUpdated,
    MoonModeChanged,
    PendulumCountChanged,
    MassRangeChanged,
    LengthRangeChanged,
    MusicSettingsChanged,
    WeatherFetchError,
}

impl EventKind {
    /// Returns all event kind variants.
    pub fn all() -> &'static [EventKind] {
        &[
            EventKind::LocationChanged,
            EventKind::WeatherUpdated,
            EventKind::MoonModeChanged,
            EventKind::PendulumCountChanged,
            EventKind::MassRangeChanged,
            EventKind::LengthRangeChanged,
            EventKind::MusicSettingsChanged,
            EventKind::WeatherFetchError,
        ]
    }
}

/// Payload of a [`Event::WeatherUpdated`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherUpdate {
    /// Condition text as reported by the weather source (e.g. "Clear").
    pub condition: String,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
}

/// Payload of a [`Event::WeatherFetchError`].
///
/// Emitted when the external weather collaborator fails; handlers must leave
/// the shared configuration untouched when they see this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherFetchFailure {
    pub error_message: String,
    pub location: String,
}

/// A published event with its kind-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Event {
    /// The installation moved to a new location (city name).
    LocationChanged(String),
    /// A weather fetch succeeded.
    WeatherUpdated(WeatherUpdate),
    /// Reduced-gravity mode toggled.
    MoonModeChanged(bool),
    /// Desired number of double pendulums changed (>= 1).
    PendulumCountChanged(usize),
    /// Mass variation range changed (>= 0).
    MassRangeChanged(f64),
    /// Length variation range changed (>= 0).
    LengthRangeChanged(f64),
    /// Key/scale/mode were re-derived; carries no payload.
    MusicSettingsChanged,
    /// A weather fetch failed.
    WeatherFetchError(WeatherFetchFailure),
}

impl Event {
    /// Returns the kind discriminant for this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::LocationChanged(_) => EventKind::LocationChanged,
            Event::WeatherUpdated(_) => EventKind::WeatherUpdated,
            Event::MoonModeChanged(_) => EventKind::MoonModeChanged,
            Event::PendulumCountChanged(_) => EventKind::PendulumCountChanged,
            Event::MassRangeChanged(_) => EventKind::MassRangeChanged,
            Event::LengthRangeChanged(_) => EventKind::LengthRangeChanged,
            Event::MusicSettingsChanged => EventKind::MusicSettingsChanged,
            Event::WeatherFetchError(_) => EventKind::WeatherFetchError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&EventKind::WeatherUpdated).unwrap(),
            r#""weather_updated""#
        );
        assert_eq!(
            serde_json::to_string(&EventKind::MoonModeChanged).unwrap(),
            r#""moon_mode_changed""#
        );
        assert_eq!(
            serde_json::to_string(&EventKind::WeatherFetchError).unwrap(),
            r#""weather_fetch_error""#
        );
    }

    #[test]
    fn test_event_kind_all_variants() {
        let all = EventKind::all();
        assert_eq!(all.len(), 8);
        assert!(all.contains(&EventKind::LocationChanged));
        assert!(all.contains(&EventKind::MusicSettingsChanged));
    }

    #[test]
    fn test_event_kind_matches_payload() {
        let event = Event::WeatherUpdated(WeatherUpdate {
            condition: "Light rain".to_string(),
            temperature: 12.5,
        });
        assert_eq!(event.kind(), EventKind::WeatherUpdated);

        assert_eq!(
            Event::MusicSettingsChanged.kind(),
            EventKind::MusicSettingsChanged
        );
        assert_eq!(
            Event::PendulumCountChanged(5).kind(),
            EventKind::PendulumCountChanged
        );
    }

    #[test]
    fn test_event_serialization_roundtrip() {
        let event = Event::WeatherFetchError(WeatherFetchFailure {
            error_message: "connection refused".to_string(),
            location: "Helsinki".to_string(),
        });

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("weather_fetch_error"));
        assert!(json.contains("Helsinki"));

        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_unit_variant_serialization() {
        let json = serde_json::to_string(&Event::MusicSettingsChanged).unwrap();
        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Event::MusicSettingsChanged);
    }
}
