//! Musical Types
//!
//! Key, scale, and mode vocabulary shared between the weather-to-music
//! mapping and the sonifier. Serialized forms match the mapping table
//! (`"C_SHARP"`, `"MAJOR"`, `"IONIAN"`); display forms are human-readable
//! (`"C#"`, `"Major"`, `"Ionian"`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Musical key, including enharmonic spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Key {
    C,
    CSharp,
    DFlat,
    D,
    DSharp,
    EFlat,
    E,
    F,
    FSharp,
    GFlat,
    G,
    AFlat,
    A,
    BFlat,
    B,
}

impl Key {
    /// Human-readable label with `#`/`b` accidentals.
    pub fn label(self) -> &'static str {
        match self {
            Key::C => "C",
            Key::CSharp => "C#",
            Key::DFlat => "Db",
            Key::D => "D",
            Key::DSharp => "D#",
            Key::EFlat => "Eb",
            Key::E => "E",
            Key::F => "F",
            Key::FSharp => "F#",
            Key::GFlat => "Gb",
            Key::G => "G",
            Key::AFlat => "Ab",
            Key::A => "A",
            Key::BFlat => "Bb",
            Key::B => "B",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Key {
    type Err = ParseMusicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "C" => Ok(Key::C),
            "C_SHARP" => Ok(Key::CSharp),
            "D_FLAT" => Ok(Key::DFlat),
            "D" => Ok(Key::D),
            "D_SHARP" => Ok(Key::DSharp),
            "E_FLAT" => Ok(Key::EFlat),
            "E" => Ok(Key::E),
            "F" => Ok(Key::F),
            "F_SHARP" => Ok(Key::FSharp),
            "G_FLAT" => Ok(Key::GFlat),
            "G" => Ok(Key::G),
            "A_FLAT" => Ok(Key::AFlat),
            "A" => Ok(Key::A),
            "B_FLAT" => Ok(Key::BFlat),
            "B" => Ok(Key::B),
            _ => Err(ParseMusicError::UnknownKey(s.to_string())),
        }
    }
}

/// Major or minor scale family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scale {
    Major,
    Minor,
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scale::Major => write!(f, "Major"),
            Scale::Minor => write!(f, "Minor"),
        }
    }
}

impl FromStr for Scale {
    type Err = ParseMusicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MAJOR" => Ok(Scale::Major),
            "MINOR" => Ok(Scale::Minor),
            _ => Err(ParseMusicError::UnknownScale(s.to_string())),
        }
    }
}

/// Church mode applied on top of the scale family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Ionian => "Ionian",
            Mode::Dorian => "Dorian",
            Mode::Phrygian => "Phrygian",
            Mode::Lydian => "Lydian",
            Mode::Mixolydian => "Mixolydian",
            Mode::Aeolian => "Aeolian",
            Mode::Locrian => "Locrian",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Mode {
    type Err = ParseMusicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IONIAN" => Ok(Mode::Ionian),
            "DORIAN" => Ok(Mode::Dorian),
            "PHRYGIAN" => Ok(Mode::Phrygian),
            "LYDIAN" => Ok(Mode::Lydian),
            "MIXOLYDIAN" => Ok(Mode::Mixolydian),
            "AEOLIAN" => Ok(Mode::Aeolian),
            "LOCRIAN" => Ok(Mode::Locrian),
            _ => Err(ParseMusicError::UnknownMode(s.to_string())),
        }
    }
}

/// Error parsing a musical type from its serialized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseMusicError {
    UnknownKey(String),
    UnknownScale(String),
    UnknownMode(String),
}

impl fmt::Display for ParseMusicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMusicError::UnknownKey(s) => write!(f, "unknown key: {}", s),
            ParseMusicError::UnknownScale(s) => write!(f, "unknown scale: {}", s),
            ParseMusicError::UnknownMode(s) => write!(f, "unknown mode: {}", s),
        }
    }
}

impl std::error::Error for ParseMusicError {}
