//! Weather Retrieval
//!
//! The installation only needs a condition text and a temperature; where
//! they come from is behind [`WeatherProvider`]. The shipped provider
//! serves canned reports for offline runs and tests; an HTTP provider
//! lives outside this repository.

use std::collections::HashMap;

use thiserror::Error;

/// One fetched weather observation.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    /// Condition text, e.g. "Sunny" or "Light snow".
    pub condition: String,
    /// Temperature, degrees Celsius.
    pub temperature: f64,
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("no weather data for location {0:?}")]
    UnknownLocation(String),
    #[error("weather service unavailable: {0}")]
    Unavailable(String),
}

pub trait WeatherProvider {
    fn fetch(&mut self, location: &str) -> Result<WeatherReport, WeatherError>;
}

/// Canned reports keyed by location, for offline runs and tests.
#[derive(Debug, Default)]
pub struct FixtureProvider {
    reports: HashMap<String, WeatherReport>,
    /// When set, every fetch fails with this message.
    outage: Option<String>,
}

impl FixtureProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider preloaded with a handful of cities.
    pub fn with_defaults() -> Self {
        let mut provider = Self::new();
        provider.insert("Barcelona", "Sunny", 24.0);
        provider.insert("Helsinki", "Light snow", -3.0);
        provider.insert("London", "Overcast", 11.0);
        provider.insert("Reykjavik", "Heavy rain", 4.0);
        provider
    }

    pub fn insert(&mut self, location: &str, condition: &str, temperature: f64) {
        self.reports.insert(
            location.to_string(),
            WeatherReport {
                condition: condition.to_string(),
                temperature,
            },
        );
    }

    pub fn set_outage(&mut self, message: Option<&str>) {
        self.outage = message.map(str::to_string);
    }
}

impl WeatherProvider for FixtureProvider {
    fn fetch(&mut self, location: &str) -> Result<WeatherReport, WeatherError> {
        if let Some(message) = &self.outage {
            return Err(WeatherError::Unavailable(message.clone()));
        }
        self.reports
            .get(location)
            .cloned()
            .ok_or_else(|| WeatherError::UnknownLocation(location.to_string()))
    }
}
