//! Scale Tables
//!
//! Interval tables per (scale, mode), base MIDI notes per key, and the
//! allowed-note palette derived from them. The palette splits the MIDI
//! range in half: inner arms draw from the lower half in descending order,
//! outer arms from the upper half ascending.

use pendulum_events::{Key, Mode, MusicSettings, Scale};

/// Scale degrees as semitone offsets from the key's base note, one octave
/// plus the repeated root.
pub fn intervals(scale: Scale, mode: Mode) -> [u8; 8] {
    match (scale, mode) {
        (Scale::Major, Mode::Ionian) => [0, 2, 4, 5, 7, 9, 11, 12],
        (_, Mode::Dorian) => [0, 2, 3, 5, 7, 9, 10, 12],
        (_, Mode::Phrygian) => [0, 1, 3, 5, 7, 8, 10, 12],
        (_, Mode::Lydian) => [0, 2, 4, 6, 7, 9, 11, 12],
        (_, Mode::Mixolydian) => [0, 2, 4, 5, 7, 9, 10, 12],
        (_, Mode::Locrian) => [0, 1, 3, 5, 6, 8, 10, 12],
        // Minor Ionian and either-scale Aeolian are the natural minor.
        (Scale::Minor, Mode::Ionian) | (_, Mode::Aeolian) => [0, 2, 3, 5, 7, 8, 10, 12],
    }
}

/// Base MIDI note per key, middle C = 60. Enharmonic pairs share a note.
pub fn base_note(key: Key) -> u8 {
    match key {
        Key::C => 60,
        Key::CSharp | Key::DFlat => 61,
        Key::D => 62,
        Key::DSharp | Key::EFlat => 63,
        Key::E => 64,
        Key::F => 65,
        Key::FSharp | Key::GFlat => 66,
        Key::G => 67,
        Key::AFlat => 68,
        Key::A => 69,
        Key::BFlat => 70,
        Key::B => 71,
    }
}

/// The playable notes for one key/scale/mode, split into the two per-arm
/// pools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePalette {
    lower_reversed: Vec<u8>,
    upper: Vec<u8>,
}

impl NotePalette {
    pub fn from_settings(settings: &MusicSettings) -> Self {
        let base = base_note(settings.key);
        let offsets = intervals(settings.scale, settings.mode);

        let allowed = |note: u8| {
            offsets
                .iter()
                .any(|offset| (base + offset) % 12 == note % 12)
        };

        let lower: Vec<u8> = (0..64).filter(|&note| allowed(note)).collect();
        let upper: Vec<u8> = (64..128).filter(|&note| allowed(note)).collect();

        Self {
            // Inner arms descend from the top of the lower half.
            lower_reversed: lower.into_iter().rev().collect(),
            upper,
        }
    }

    /// The pitch assigned to one body. Even body indices (inner arms) draw
    /// from the reversed lower pool, odd ones from the upper pool; the
    /// simulator index wraps around the pool.
    pub fn pitch(&self, simulator: usize, body: usize) -> u8 {
        let pool = if body % 2 == 0 {
            &self.lower_reversed
        } else {
            &self.upper
        };
        pool[simulator % pool.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_ionian_intervals() {
        assert_eq!(
            intervals(Scale::Major, Mode::Ionian),
            [0, 2, 4, 5, 7, 9, 11, 12]
        );
    }

    #[test]
    fn test_minor_ionian_is_natural_minor() {
        assert_eq!(
            intervals(Scale::Minor, Mode::Ionian),
            intervals(Scale::Major, Mode::Aeolian)
        );
    }

    #[test]
    fn test_enharmonic_keys_share_base() {
        assert_eq!(base_note(Key::CSharp), base_note(Key::DFlat));
        assert_eq!(base_note(Key::FSharp), base_note(Key::GFlat));
        assert_eq!(base_note(Key::DSharp), base_note(Key::EFlat));
    }

    #[test]
    fn test_c_major_palette() {
        let palette = NotePalette::from_settings(&MusicSettings::default());

        // Simulator 0, inner arm: highest in-scale note below 64 is 62 (D).
        assert_eq!(palette.pitch(0, 0), 62);
        // Simulator 0, outer arm: lowest in-scale note at or above 64 is 64 (E).
        assert_eq!(palette.pitch(0, 1), 64);
        // Next simulators walk down / up the pools.
        assert_eq!(palette.pitch(1, 0), 60);
        assert_eq!(palette.pitch(1, 1), 65);
    }

    #[test]
    fn test_every_palette_note_is_in_scale() {
        let settings = MusicSettings {
            key: Key::AFlat,
            scale: Scale::Minor,
            mode: Mode::Phrygian,
        };
        let palette = NotePalette::from_settings(&settings);
        let base = base_note(settings.key);
        let offsets = intervals(settings.scale, settings.mode);

        for simulator in 0..40 {
            for body in 0..2 {
                let pitch = palette.pitch(simulator, body);
                assert!(
                    offsets.iter().any(|o| (base + o) % 12 == pitch % 12),
                    "pitch {pitch} not in scale"
                );
            }
        }
    }

    #[test]
    fn test_simulator_index_wraps_pool() {
        let palette = NotePalette::from_settings(&MusicSettings::default());
        // C major has 37 allowed notes in 0..64.
        assert_eq!(palette.pitch(0, 0), palette.pitch(37, 0));
    }
}
