//! Sonification for the pendulum installation.
//!
//! Crossing signals become notes: each body that swings across the center
//! line triggers a pitch drawn from the current key/scale/mode, with
//! velocity following its angular speed. Weather conditions select the
//! music settings through a JSON mapping table. Transport (MIDI port,
//! synthesis engine) stays outside this crate, behind [`NoteSink`].

pub mod notes;
pub mod scale;
pub mod weather_map;

pub use notes::{NoteEvent, NotePlanner, NoteSink, RecordingSink};
pub use scale::{base_note, intervals, NotePalette};
pub use weather_map::{MappingEntry, MappingError, WeatherMusicMap};
