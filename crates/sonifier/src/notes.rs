//! Note Planning
//!
//! Turns per-frame crossing signals and body kinematics into note-on /
//! note-off events. The planner owns the held-note bookkeeping so every
//! note-on is eventually paired with a note-off; the actual transport is
//! behind [`NoteSink`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use pendulum_core::{CrossingTracker, EARTH_GRAVITY};
use pendulum_events::{KinematicFrame, MusicSettings};

use crate::scale::NotePalette;

const MIN_VELOCITY: i64 = 30;
const MAX_VELOCITY: i64 = 127;
const VELOCITY_SCALE: f64 = 20.0;

/// One planned note event. Channel is the body index, so inner and outer
/// arms land on separate instrument channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NoteEvent {
    On { channel: u8, pitch: u8, velocity: u8 },
    Off { channel: u8, pitch: u8 },
}

/// Where planned notes go. Implementations wrap a MIDI port, an audio
/// engine, or a test recorder.
pub trait NoteSink {
    fn send(&mut self, event: NoteEvent);
}

/// Records everything it receives, for tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<NoteEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NoteSink for RecordingSink {
    fn send(&mut self, event: NoteEvent) {
        self.events.push(event);
    }
}

/// Plans notes from crossing activity.
///
/// Velocity follows angular speed, normalized by gravity so moon mode does
/// not mute the installation: `clamp(|ω| · (9.81 / g) · 20, 30, 127)`.
#[derive(Debug)]
pub struct NotePlanner {
    palette: NotePalette,
    held: HashMap<(usize, usize), u8>,
}

impl NotePlanner {
    pub fn new(settings: &MusicSettings) -> Self {
        Self {
            palette: NotePalette::from_settings(settings),
            held: HashMap::new(),
        }
    }

    /// Rebuilds the palette for new music settings. Held notes keep their
    /// old pitches until their slots release, so they still get a matching
    /// note-off.
    pub fn set_music(&mut self, settings: &MusicSettings) {
        self.palette = NotePalette::from_settings(settings);
    }

    /// Plans one frame. For each body whose crossing signal is active, a
    /// note-on is sent; bodies whose signal went quiet release their held
    /// note.
    pub fn update(
        &mut self,
        tracker: &CrossingTracker,
        frame: &KinematicFrame,
        sink: &mut dyn NoteSink,
    ) {
        for (simulator, pendulum) in frame.pendulums.iter().enumerate() {
            if simulator >= tracker.len() {
                break;
            }
            for (body, kinematics) in pendulum.bodies.iter().enumerate().take(2) {
                let slot = (simulator, body);
                let channel = body as u8;

                if tracker.signal(simulator, body).active {
                    // A re-fire while a note is still held replaces it.
                    if let Some(pitch) = self.held.remove(&slot) {
                        sink.send(NoteEvent::Off { channel, pitch });
                    }

                    let pitch = self.palette.pitch(simulator, body);
                    let velocity = velocity_for(kinematics.angular_velocity, pendulum.gravity);
                    sink.send(NoteEvent::On {
                        channel,
                        pitch,
                        velocity,
                    });
                    self.held.insert(slot, pitch);
                } else if let Some(pitch) = self.held.remove(&slot) {
                    sink.send(NoteEvent::Off { channel, pitch });
                }
            }
        }
    }

    pub fn held_count(&self) -> usize {
        self.held.len()
    }
}

fn velocity_for(angular_velocity: f64, gravity: f64) -> u8 {
    let scaled = angular_velocity.abs() * (EARTH_GRAVITY / gravity);
    let velocity = (scaled * VELOCITY_SCALE) as i64;
    velocity.clamp(MIN_VELOCITY, MAX_VELOCITY) as u8
}
