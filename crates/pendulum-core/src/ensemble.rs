//! Simulation Ensemble
//!
//! A resizable population of independent double pendulums sharing
//! population-level parameters. Live parameter edits are applied
//! retroactively: a gravity or temperature change reaches every running
//! simulator, and a mass/length range change regenerates every body. The
//! ensemble owns a seeded RNG so a run is reproducible from its seed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::FRAC_PI_2;
use thiserror::Error;

use pendulum_events::{BodyKinematics, KinematicFrame, PendulumKinematics};

use crate::double::{DoublePendulum, EARTH_GRAVITY, MOON_GRAVITY};
use crate::projection::project_bodies;
use crate::{PendulumBody, PhysicsError};

// Random mass/length samples are floored here so a wide variation range can
// never produce a non-positive body.
const MIN_SAMPLE: f64 = 0.01;

/// Ensemble-level validation errors.
#[derive(Debug, Error, PartialEq)]
pub enum EnsembleError {
    #[error("ensemble must hold at least 1 simulator, got {0}")]
    InvalidCount(usize),
    #[error("variation range must be non-negative, got {0}")]
    NegativeRange(f64),
    #[error(transparent)]
    Physics(#[from] PhysicsError),
}

/// Shared parameters used to construct any newly created simulator.
#[derive(Debug, Clone)]
pub struct EnsembleParams {
    /// Gravity applied to every simulator.
    pub g: f64,
    /// Temperature in Celsius driving the acceleration factor.
    pub temperature: f64,
    /// Mass variation range around 1.0.
    pub mass_range: f64,
    /// Length variation range around 1.0.
    pub length_range: f64,
    /// Initial angle offset range around π/2, radians.
    pub angle_range: (f64, f64),
    /// Reduced-gravity mode.
    pub reduced_gravity: bool,
}

impl Default for EnsembleParams {
    fn default() -> Self {
        Self {
            g: EARTH_GRAVITY,
            temperature: 15.0,
            mass_range: 0.0,
            length_range: 0.0,
            angle_range: (-0.1, 0.1),
            reduced_gravity: false,
        }
    }
}

/// An ordered, index-addressable population of double pendulums.
#[derive(Debug)]
pub struct Ensemble {
    simulators: Vec<DoublePendulum>,
    params: EnsembleParams,
    rng: SmallRng,
}

impl Ensemble {
    /// Creates an ensemble of `n` freshly sampled simulators.
    ///
    /// `n < 1` is a domain error. The seed makes body sampling reproducible.
    pub fn new(n: usize, params: EnsembleParams, seed: u64) -> Result<Self, EnsembleError> {
        if n < 1 {
            return Err(EnsembleError::InvalidCount(n));
        }
        let mut ensemble = Self {
            simulators: Vec::with_capacity(n),
            params,
            rng: SmallRng::seed_from_u64(seed),
        };
        for _ in 0..n {
            let simulator = ensemble.spawn_simulator()?;
            ensemble.simulators.push(simulator);
        }
        Ok(ensemble)
    }

    fn sample_body(&mut self) -> Result<PendulumBody, PhysicsError> {
        let EnsembleParams {
            mass_range,
            length_range,
            angle_range,
            ..
        } = self.params;

        let mass = self
            .rng
            .gen_range(1.0 - mass_range..=1.0 + mass_range)
            .max(MIN_SAMPLE);
        let length = self
            .rng
            .gen_range(1.0 - length_range..=1.0 + length_range)
            .max(MIN_SAMPLE);
        let angle = FRAC_PI_2 + self.rng.gen_range(angle_range.0..=angle_range.1);

        PendulumBody::new(length, mass, angle, 0.0)
    }

    fn spawn_simulator(&mut self) -> Result<DoublePendulum, PhysicsError> {
        let bodies = vec![self.sample_body()?, self.sample_body()?];
        DoublePendulum::new(
            bodies,
            self.params.g,
            Some(self.params.temperature),
            self.params.reduced_gravity,
        )
    }

    pub fn len(&self) -> usize {
        self.simulators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simulators.is_empty()
    }

    pub fn simulators(&self) -> &[DoublePendulum] {
        &self.simulators
    }

    pub fn gravity(&self) -> f64 {
        self.params.g
    }

    pub fn params(&self) -> &EnsembleParams {
        &self.params
    }

    /// Advances every simulator independently by `dt`.
    pub fn step(&mut self, dt: f64) {
        for simulator in &mut self.simulators {
            simulator.step(dt);
        }
    }

    /// Grows or shrinks the population to `n` simulators.
    ///
    /// Shrinking truncates; growing constructs new simulators from the
    /// current shared parameters, leaving existing state untouched.
    pub fn resize(&mut self, n: usize) -> Result<(), EnsembleError> {
        if n < 1 {
            return Err(EnsembleError::InvalidCount(n));
        }
        if n < self.simulators.len() {
            self.simulators.truncate(n);
        } else {
            while self.simulators.len() < n {
                let simulator = self.spawn_simulator()?;
                self.simulators.push(simulator);
            }
        }
        tracing::debug!(count = n, "ensemble resized");
        Ok(())
    }

    /// Regenerates every body's mass by fresh sampling within `1 ± range`
    /// and stores the range as the new default. Running dynamics jump.
    pub fn set_mass_range(&mut self, range: f64) -> Result<(), EnsembleError> {
        if !(range >= 0.0) {
            return Err(EnsembleError::NegativeRange(range));
        }
        self.params.mass_range = range;
        for i in 0..self.simulators.len() {
            for j in 0..2 {
                let mass = self
                    .rng
                    .gen_range(1.0 - range..=1.0 + range)
                    .max(MIN_SAMPLE);
                self.simulators[i].bodies_mut()[j].mass = mass;
            }
        }
        Ok(())
    }

    /// Regenerates every body's length, same contract as
    /// [`set_mass_range`].
    ///
    /// [`set_mass_range`]: Ensemble::set_mass_range
    pub fn set_length_range(&mut self, range: f64) -> Result<(), EnsembleError> {
        if !(range >= 0.0) {
            return Err(EnsembleError::NegativeRange(range));
        }
        self.params.length_range = range;
        for i in 0..self.simulators.len() {
            for j in 0..2 {
                let length = self
                    .rng
                    .gen_range(1.0 - range..=1.0 + range)
                    .max(MIN_SAMPLE);
                self.simulators[i].bodies_mut()[j].length = length;
            }
        }
        Ok(())
    }

    /// Applies a new gravity to every simulator (velocity-rescaled) and
    /// stores it as the default for future growth.
    pub fn set_gravity(&mut self, g: f64) {
        for simulator in &mut self.simulators {
            simulator.update_gravity(g);
        }
        self.params.g = g;
    }

    /// Applies a new temperature to every simulator (factor-rescaled) and
    /// stores it as the default.
    pub fn set_temperature(&mut self, celsius: f64) {
        for simulator in &mut self.simulators {
            simulator.update_temperature(celsius, self.params.reduced_gravity);
        }
        self.params.temperature = celsius;
    }

    /// Toggles reduced-gravity mode: switches effective gravity through the
    /// rescaling path and refreshes every temperature factor.
    pub fn set_reduced_gravity(&mut self, reduced: bool) {
        self.params.reduced_gravity = reduced;
        let g = if reduced { MOON_GRAVITY } else { EARTH_GRAVITY };
        self.set_gravity(g);
        self.set_temperature(self.params.temperature);
        tracing::info!(reduced, gravity = g, "reduced-gravity mode changed");
    }

    /// Builds an immutable kinematic snapshot of the whole population,
    /// projecting every body to plane coordinates.
    pub fn snapshot(&self, frame: u64, origin: (f64, f64), scale: f64) -> KinematicFrame {
        let pendulums = self
            .simulators
            .iter()
            .map(|simulator| {
                let coords = project_bodies(origin, scale, simulator);
                let bodies = simulator
                    .bodies()
                    .iter()
                    .zip(coords.iter())
                    .map(|(body, &(x, y))| BodyKinematics {
                        angle: body.angle,
                        angular_velocity: body.angular_velocity,
                        x,
                        y,
                    })
                    .collect();
                PendulumKinematics {
                    gravity: simulator.gravity(),
                    bodies,
                }
            })
            .collect();

        KinematicFrame { frame, pendulums }
    }
}
