//! Weather-to-Music Mapping
//!
//! A JSON table keyed by weather condition text, giving the key, scale, and
//! mode the installation should play under that sky, plus an optional
//! reference to an audio-model weights file for external synthesis engines.
//! Conditions not in the table fall back to C major Ionian.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pendulum_events::{Key, Mode, MusicSettings, Scale};

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("failed to read mapping file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse mapping file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One condition's entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub key: Key,
    pub scale: Scale,
    pub mode: Mode,
    /// Audio-model weights file for this condition, consumed by external
    /// synthesis engines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<String>,
}

impl MappingEntry {
    pub fn settings(&self) -> MusicSettings {
        MusicSettings {
            key: self.key,
            scale: self.scale,
            mode: self.mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherMusicMap {
    entries: HashMap<String, MappingEntry>,
}

impl WeatherMusicMap {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_file(path: &Path) -> Result<Self, MappingError> {
        let json = fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }

    /// The mapping the installation ships with, covering the condition
    /// texts the weather service commonly reports.
    pub fn builtin() -> Self {
        let entry = |key, scale, mode| MappingEntry {
            key,
            scale,
            mode,
            weights: None,
        };

        let mut entries = HashMap::new();
        entries.insert("Sunny".to_owned(), entry(Key::C, Scale::Major, Mode::Ionian));
        entries.insert("Clear".to_owned(), entry(Key::G, Scale::Major, Mode::Lydian));
        entries.insert(
            "Partly cloudy".to_owned(),
            entry(Key::D, Scale::Major, Mode::Mixolydian),
        );
        entries.insert(
            "Cloudy".to_owned(),
            entry(Key::A, Scale::Minor, Mode::Dorian),
        );
        entries.insert(
            "Overcast".to_owned(),
            entry(Key::E, Scale::Minor, Mode::Aeolian),
        );
        entries.insert("Mist".to_owned(), entry(Key::F, Scale::Major, Mode::Lydian));
        entries.insert(
            "Fog".to_owned(),
            entry(Key::BFlat, Scale::Minor, Mode::Phrygian),
        );
        entries.insert(
            "Light rain".to_owned(),
            entry(Key::D, Scale::Minor, Mode::Aeolian),
        );
        entries.insert(
            "Moderate rain".to_owned(),
            entry(Key::G, Scale::Minor, Mode::Dorian),
        );
        entries.insert(
            "Heavy rain".to_owned(),
            entry(Key::C, Scale::Minor, Mode::Phrygian),
        );
        entries.insert(
            "Thundery outbreaks possible".to_owned(),
            entry(Key::FSharp, Scale::Minor, Mode::Locrian),
        );
        entries.insert(
            "Light snow".to_owned(),
            entry(Key::EFlat, Scale::Major, Mode::Ionian),
        );
        entries.insert(
            "Moderate snow".to_owned(),
            entry(Key::AFlat, Scale::Major, Mode::Lydian),
        );
        entries.insert(
            "Heavy snow".to_owned(),
            entry(Key::B, Scale::Minor, Mode::Aeolian),
        );
        Self { entries }
    }

    pub fn entry(&self, condition: &str) -> Option<&MappingEntry> {
        self.entries.get(condition)
    }

    /// Music settings for a condition; unknown conditions get the fallback.
    pub fn settings_for(&self, condition: &str) -> MusicSettings {
        match self.entry(condition) {
            Some(entry) => entry.settings(),
            None => {
                tracing::debug!(condition, "no mapping entry, using fallback");
                MusicSettings::default()
            }
        }
    }

    pub fn weights_for(&self, condition: &str) -> Option<&str> {
        self.entry(condition)?.weights.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for WeatherMusicMap {
    fn default() -> Self {
        Self::builtin()
    }
}
