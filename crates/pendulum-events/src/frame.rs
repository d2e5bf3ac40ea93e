//! Kinematic Frame Snapshots
//!
//! Immutable per-frame snapshots of body kinematics, produced once per
//! simulation frame and handed to the audio path. The audio thread never
//! touches live simulation state; it only reads these.

use serde::{Deserialize, Serialize};

/// One body's kinematics at a frame boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyKinematics {
    /// Angle from vertical, radians.
    pub angle: f64,
    /// Angular velocity, rad/s.
    pub angular_velocity: f64,
    /// Projected position, installation plane coordinates.
    pub x: f64,
    pub y: f64,
}

/// One double pendulum's kinematics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendulumKinematics {
    /// Effective gravity acting on this simulator.
    pub gravity: f64,
    /// Both arms, inner first.
    pub bodies: Vec<BodyKinematics>,
}

/// A complete ensemble snapshot for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicFrame {
    /// Monotonically increasing frame index.
    pub frame: u64,
    pub pendulums: Vec<PendulumKinematics>,
}

impl KinematicFrame {
    /// An empty frame, used as the initial buffer contents before the first
    /// simulation frame is published.
    pub fn empty() -> Self {
        Self {
            frame: 0,
            pendulums: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_frame() {
        let frame = KinematicFrame::empty();
        assert_eq!(frame.frame, 0);
        assert!(frame.pendulums.is_empty());
    }

    #[test]
    fn test_frame_serialization() {
        let frame = KinematicFrame {
            frame: 42,
            pendulums: vec![PendulumKinematics {
                gravity: 9.81,
                bodies: vec![
                    BodyKinematics {
                        angle: 1.2,
                        angular_velocity: -0.4,
                        x: 520.0,
                        y: 410.0,
                    },
                    BodyKinematics {
                        angle: 0.3,
                        angular_velocity: 2.1,
                        x: 610.0,
                        y: 530.0,
                    },
                ],
            }],
        };

        let json = serde_json::to_string(&frame).unwrap();
        let parsed: KinematicFrame = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, frame);
    }
}
