//! Core pendulum physics: bodies, coupled simulators, the ensemble, and
//! crossing detection.
//!
//! The simulation is a population of independent double pendulums whose
//! dynamics are modulated by live environmental parameters (temperature,
//! reduced gravity, mass/length variation). Continuous motion is turned into
//! discrete trigger signals by the crossing detector; per-frame kinematics
//! are handed to the audio path through the frame buffer.

pub mod body;
pub mod crossing;
pub mod double;
pub mod ensemble;
pub mod framebuf;
pub mod projection;

pub use body::PendulumBody;
pub use crossing::{CrossingDetector, CrossingSignal, CrossingTracker};
pub use double::{
    temperature_factor, DoublePendulum, DAMPING_FACTOR, EARTH_GRAVITY, MAX_ANGULAR_VELOCITY,
    MOON_GRAVITY,
};
pub use ensemble::{Ensemble, EnsembleError, EnsembleParams};
pub use framebuf::FrameBuffer;
pub use projection::project_bodies;

use thiserror::Error;

/// Construction and validation errors for bodies and simulators.
#[derive(Debug, Error, PartialEq)]
pub enum PhysicsError {
    #[error("pendulum length must be positive, got {0}")]
    NonPositiveLength(f64),
    #[error("pendulum mass must be positive, got {0}")]
    NonPositiveMass(f64),
    #[error("a double pendulum must have exactly 2 bodies, got {0}")]
    WrongBodyCount(usize),
}
