//! Double Pendulum Simulator
//!
//! Couples exactly two bodies and advances them with the closed-form
//! double-pendulum angular accelerations under explicit Euler integration.
//! Environmental modulation enters in two places: the temperature factor
//! scales each step's angular acceleration (the rate of energy injection,
//! not the accumulated velocity, so it does not compound across frames),
//! and gravity changes rescale angular velocity so the motion's character
//! survives the switch.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::body::PendulumBody;
use crate::PhysicsError;

/// Symmetric angular velocity bound, rad/s.
pub const MAX_ANGULAR_VELOCITY: f64 = 10.0;

/// Velocity attenuation applied when the first arm completes a revolution.
pub const DAMPING_FACTOR: f64 = 0.90;

/// Standard gravity, m/s².
pub const EARTH_GRAVITY: f64 = 9.81;

/// Lunar surface gravity, m/s².
pub const MOON_GRAVITY: f64 = 1.62;

const MIN_TEMPERATURE_FACTOR: f64 = 0.25;
const MAX_TEMPERATURE_FACTOR: f64 = 2.0;
const MAX_TEMPERATURE: f64 = 35.0;

// Floor for the shared acceleration denominator mass term. The term is
// 2·m1 + m2 − m2·cos(2Δ) and stays positive for sane masses, but a
// vanishingly small inner mass can drive it toward zero and inject NaN/∞.
const DENOMINATOR_EPSILON: f64 = 1e-9;

const TWO_PI: f64 = 2.0 * PI;

/// Maps temperature to the acceleration scaling factor.
///
/// Clamped to 0.25 below 0 °C and 2.0 at or above 35 °C, linear in between.
/// Under reduced gravity the factor is neutral regardless of temperature.
pub fn temperature_factor(celsius: f64, reduced_gravity: bool) -> f64 {
    if reduced_gravity {
        return 1.0;
    }
    if celsius <= 0.0 {
        MIN_TEMPERATURE_FACTOR
    } else if celsius >= MAX_TEMPERATURE {
        MAX_TEMPERATURE_FACTOR
    } else {
        MIN_TEMPERATURE_FACTOR
            + (celsius / MAX_TEMPERATURE) * (MAX_TEMPERATURE_FACTOR - MIN_TEMPERATURE_FACTOR)
    }
}

/// A two-body coupled pendulum.
///
/// Owns its bodies exclusively; all mutation goes through [`step`] and the
/// parameter update methods.
///
/// [`step`]: DoublePendulum::step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoublePendulum {
    bodies: [PendulumBody; 2],
    g: f64,
    temperature_factor: f64,
    #[serde(skip)]
    warned_singular: bool,
}

impl DoublePendulum {
    /// Creates a simulator from exactly two bodies.
    ///
    /// Any other body count is a domain error. When `temperature` is absent
    /// the factor starts neutral.
    pub fn new(
        bodies: Vec<PendulumBody>,
        g: f64,
        temperature: Option<f64>,
        reduced_gravity: bool,
    ) -> Result<Self, PhysicsError> {
        let count = bodies.len();
        let bodies: [PendulumBody; 2] = bodies
            .try_into()
            .map_err(|_| PhysicsError::WrongBodyCount(count))?;

        let factor = match temperature {
            Some(t) => temperature_factor(t, reduced_gravity),
            None => 1.0,
        };

        Ok(Self {
            bodies,
            g,
            temperature_factor: factor,
            warned_singular: false,
        })
    }

    pub fn bodies(&self) -> &[PendulumBody; 2] {
        &self.bodies
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [PendulumBody; 2] {
        &mut self.bodies
    }

    pub fn gravity(&self) -> f64 {
        self.g
    }

    pub fn temperature_factor(&self) -> f64 {
        self.temperature_factor
    }

    /// Advances the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        let [p1, p2] = &self.bodies;
        let (m1, m2) = (p1.mass, p2.mass);
        let (l1, l2) = (p1.length, p2.length);
        let (a1, a2) = (p1.angle, p2.angle);
        let (w1, w2) = (p1.angular_velocity, p2.angular_velocity);
        let g = self.g;

        let delta = a1 - a2;
        let sin_delta = delta.sin();
        let cos_delta = delta.cos();
        let cos_2delta = (2.0 * delta).cos();
        let common_mass = 2.0 * m1 + m2;

        let mut mass_term = common_mass - m2 * cos_2delta;
        if mass_term.abs() < DENOMINATOR_EPSILON {
            mass_term = DENOMINATOR_EPSILON.copysign(if mass_term == 0.0 { 1.0 } else { mass_term });
            if !self.warned_singular {
                tracing::warn!(
                    "near-singular pendulum configuration, clamping acceleration denominator"
                );
                self.warned_singular = true;
            }
        }
        let denom1 = l1 * mass_term;
        let denom2 = l2 * mass_term;

        let mut d_w1 = (-g * common_mass * a1.sin()
            - m2 * g * (a1 - 2.0 * a2).sin()
            - 2.0 * sin_delta * m2 * (w2 * w2 * l2 + w1 * w1 * l1 * cos_delta))
            / denom1;

        let mut d_w2 = (2.0
            * sin_delta
            * (w1 * w1 * l1 * (m1 + m2) + g * (m1 + m2) * a1.cos() + w2 * w2 * l2 * m2 * cos_delta))
            / denom2;

        // Temperature modulates the acceleration, not the accumulated
        // velocity, so the effect does not compound over time.
        d_w1 *= self.temperature_factor;
        d_w2 *= self.temperature_factor;

        let [p1, p2] = &mut self.bodies;
        p1.angular_velocity =
            (p1.angular_velocity + d_w1 * dt).clamp(-MAX_ANGULAR_VELOCITY, MAX_ANGULAR_VELOCITY);
        p2.angular_velocity =
            (p2.angular_velocity + d_w2 * dt).clamp(-MAX_ANGULAR_VELOCITY, MAX_ANGULAR_VELOCITY);

        p1.angle += p1.angular_velocity * dt;
        p2.angle += p2.angular_velocity * dt;

        // A full revolution of the first arm bleeds energy and wraps the
        // angle back into (-2π, 2π).
        if p1.angle.abs() >= TWO_PI {
            p1.angular_velocity *= DAMPING_FACTOR;
            p1.angle %= TWO_PI;
        }
    }

    /// Replaces gravity, rescaling both angular velocities by
    /// `sqrt(g_new / g_old)` so the motion does not jump discontinuously.
    pub fn update_gravity(&mut self, g_new: f64) {
        let ratio = (g_new / self.g).sqrt();
        for body in &mut self.bodies {
            body.angular_velocity *= ratio;
        }
        self.g = g_new;
    }

    /// Recomputes the temperature factor and rescales both angular
    /// velocities by the factor ratio, clamped to the velocity bound.
    pub fn update_temperature(&mut self, celsius: f64, reduced_gravity: bool) {
        let new_factor = temperature_factor(celsius, reduced_gravity);
        let ratio = new_factor / self.temperature_factor;
        for body in &mut self.bodies {
            body.angular_velocity = (body.angular_velocity * ratio)
                .clamp(-MAX_ANGULAR_VELOCITY, MAX_ANGULAR_VELOCITY);
        }
        self.temperature_factor = new_factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulator(bodies: [PendulumBody; 2]) -> DoublePendulum {
        DoublePendulum::new(bodies.to_vec(), EARTH_GRAVITY, None, false).unwrap()
    }

    fn default_pair() -> [PendulumBody; 2] {
        [PendulumBody::upright(), PendulumBody::upright()]
    }

    #[test]
    fn test_wrong_body_count_is_domain_error() {
        let one = vec![PendulumBody::upright()];
        assert_eq!(
            DoublePendulum::new(one, EARTH_GRAVITY, None, false).unwrap_err(),
            PhysicsError::WrongBodyCount(1)
        );

        let three = vec![PendulumBody::upright(); 3];
        assert_eq!(
            DoublePendulum::new(three, EARTH_GRAVITY, None, false).unwrap_err(),
            PhysicsError::WrongBodyCount(3)
        );
    }

    #[test]
    fn test_velocities_stay_within_bound() {
        let mut bodies = default_pair();
        bodies[0].angular_velocity = 9.5;
        bodies[1].angular_velocity = -9.5;
        let mut sim = simulator(bodies);

        for _ in 0..2000 {
            sim.step(0.01);
            for body in sim.bodies() {
                assert!(body.angular_velocity.abs() <= MAX_ANGULAR_VELOCITY);
                assert!(body.angular_velocity.is_finite());
                assert!(body.angle.is_finite());
            }
        }
    }

    #[test]
    fn test_full_revolution_damps_and_wraps() {
        let mut bodies = default_pair();
        bodies[0].angle = 6.3; // already past 2π
        bodies[0].angular_velocity = 2.0;
        let mut sim = simulator(bodies);

        // Tiny dt: acceleration contributes negligibly, isolating the wrap.
        sim.step(1e-12);

        let p1 = &sim.bodies()[0];
        assert!(p1.angle.abs() < TWO_PI);
        assert!((p1.angle - (6.3 - TWO_PI)).abs() < 1e-9);
        assert!((p1.angular_velocity - 2.0 * DAMPING_FACTOR).abs() < 1e-6);
    }

    #[test]
    fn test_negative_revolution_wraps_with_sign() {
        let mut bodies = default_pair();
        bodies[0].angle = -6.9;
        bodies[0].angular_velocity = -1.0;
        let mut sim = simulator(bodies);

        sim.step(1e-12);

        let p1 = &sim.bodies()[0];
        assert!(p1.angle > -TWO_PI && p1.angle <= TWO_PI);
        assert!(p1.angle < 0.0, "sign-preserving wrap");
    }

    #[test]
    fn test_gravity_round_trip_restores_velocity() {
        let mut bodies = default_pair();
        bodies[0].angular_velocity = 1.3;
        bodies[1].angular_velocity = -0.7;
        let mut sim = simulator(bodies);

        sim.update_gravity(MOON_GRAVITY);
        sim.update_gravity(EARTH_GRAVITY);

        assert!((sim.bodies()[0].angular_velocity - 1.3).abs() < 1e-12);
        assert!((sim.bodies()[1].angular_velocity - (-0.7)).abs() < 1e-12);
        assert_eq!(sim.gravity(), EARTH_GRAVITY);
    }

    #[test]
    fn test_gravity_rescale_magnitude() {
        let mut bodies = default_pair();
        bodies[0].angular_velocity = 4.0;
        let mut sim = simulator(bodies);

        sim.update_gravity(MOON_GRAVITY);
        let expected = 4.0 * (MOON_GRAVITY / EARTH_GRAVITY).sqrt();
        assert!((sim.bodies()[0].angular_velocity - expected).abs() < 1e-12);
    }

    #[test]
    fn test_temperature_factor_curve() {
        assert_eq!(temperature_factor(0.0, false), 0.25);
        assert_eq!(temperature_factor(-12.0, false), 0.25);
        assert_eq!(temperature_factor(35.0, false), 2.0);
        assert_eq!(temperature_factor(48.0, false), 2.0);
        // Midpoint of the linear segment.
        assert!((temperature_factor(17.5, false) - 1.125).abs() < 1e-12);
    }

    #[test]
    fn test_temperature_factor_reduced_gravity() {
        assert_eq!(temperature_factor(-20.0, true), 1.0);
        assert_eq!(temperature_factor(17.5, true), 1.0);
        assert_eq!(temperature_factor(40.0, true), 1.0);
    }

    #[test]
    fn test_update_temperature_rescales_velocity() {
        let mut bodies = default_pair();
        bodies[0].angular_velocity = 4.0;
        bodies[1].angular_velocity = -2.0;
        let mut sim =
            DoublePendulum::new(bodies.to_vec(), EARTH_GRAVITY, Some(35.0), false).unwrap();
        assert_eq!(sim.temperature_factor(), 2.0);

        sim.update_temperature(0.0, false);

        // Ratio 0.25 / 2.0 = 0.125.
        assert!((sim.bodies()[0].angular_velocity - 0.5).abs() < 1e-12);
        assert!((sim.bodies()[1].angular_velocity - (-0.25)).abs() < 1e-12);
        assert_eq!(sim.temperature_factor(), 0.25);
    }

    #[test]
    fn test_update_temperature_clamps_velocity() {
        let mut bodies = default_pair();
        bodies[0].angular_velocity = 8.0;
        let mut sim =
            DoublePendulum::new(bodies.to_vec(), EARTH_GRAVITY, Some(0.0), false).unwrap();

        // 0.25 -> 2.0 would scale 8.0 to 64.0 without the clamp.
        sim.update_temperature(35.0, false);
        assert_eq!(sim.bodies()[0].angular_velocity, MAX_ANGULAR_VELOCITY);
    }

    #[test]
    fn test_near_singular_configuration_stays_finite() {
        // A vanishing inner mass with aligned arms drives the shared
        // denominator toward zero; the guard must keep the state finite.
        let b1 = PendulumBody::new(1.0, 1e-15, 1.0, 0.5).unwrap();
        let b2 = PendulumBody::new(1.0, 1.0, 1.0, -0.5).unwrap();
        let mut sim = DoublePendulum::new(vec![b1, b2], EARTH_GRAVITY, None, false).unwrap();

        for _ in 0..100 {
            sim.step(0.01);
            for body in sim.bodies() {
                assert!(body.angle.is_finite());
                assert!(body.angular_velocity.is_finite());
                assert!(body.angular_velocity.abs() <= MAX_ANGULAR_VELOCITY);
            }
        }
    }

    #[test]
    fn test_temperature_scales_acceleration_not_velocity() {
        // Two identical simulators, one hot and one neutral: after one step
        // from rest the hot one's velocity change is exactly factor times
        // the neutral one's.
        let bodies = default_pair();
        let mut neutral =
            DoublePendulum::new(bodies.to_vec(), EARTH_GRAVITY, None, false).unwrap();
        let mut hot =
            DoublePendulum::new(bodies.to_vec(), EARTH_GRAVITY, Some(35.0), false).unwrap();

        neutral.step(0.001);
        hot.step(0.001);

        let w_neutral = neutral.bodies()[0].angular_velocity;
        let w_hot = hot.bodies()[0].angular_velocity;
        assert!((w_hot - 2.0 * w_neutral).abs() < 1e-12);
    }
}
