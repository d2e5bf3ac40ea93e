//! Pendulum Body
//!
//! One articulated arm's physical state.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

use crate::PhysicsError;

/// A single arm of a double pendulum.
///
/// Mutated every simulation step; replaced wholesale when the ensemble
/// regenerates masses or lengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendulumBody {
    /// Arm length, in unit lengths (scaled to plane coordinates on
    /// projection). Always positive.
    pub length: f64,
    /// Bob mass. Always positive.
    pub mass: f64,
    /// Angle from vertical, radians.
    pub angle: f64,
    /// Angular velocity, rad/s.
    pub angular_velocity: f64,
}

impl PendulumBody {
    /// Creates a body, rejecting non-positive length or mass.
    pub fn new(
        length: f64,
        mass: f64,
        angle: f64,
        angular_velocity: f64,
    ) -> Result<Self, PhysicsError> {
        if !(length > 0.0) {
            return Err(PhysicsError::NonPositiveLength(length));
        }
        if !(mass > 0.0) {
            return Err(PhysicsError::NonPositiveMass(mass));
        }
        Ok(Self {
            length,
            mass,
            angle,
            angular_velocity,
        })
    }

    /// A unit body hanging at rest at π/2, the installation's canonical
    /// starting pose.
    pub fn upright() -> Self {
        Self {
            length: 1.0,
            mass: 1.0,
            angle: FRAC_PI_2,
            angular_velocity: 0.0,
        }
    }
}
