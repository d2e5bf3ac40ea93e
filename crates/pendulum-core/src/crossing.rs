//! Crossing Detection
//!
//! Edge-triggered hysteresis state machine turning a continuously varying
//! position into discrete trigger signals. Each tracked point fires exactly
//! one `active` pulse when it changes sides of the origin, then stays
//! latched until it has moved sufficiently far away and returned.

use serde::{Deserialize, Serialize};

/// The detector's externally visible state after an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossingSignal {
    /// True for exactly the observation on which a crossing fired.
    pub active: bool,
    /// The latch: true from a firing until the point re-arms.
    pub triggered: bool,
}

/// Hysteresis state machine for one tracked point.
///
/// Created unseeded; the first observation only records the position and
/// never fires.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrossingDetector {
    active: bool,
    triggered: bool,
    last_position: Option<f64>,
}

impl CrossingDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one position sample.
    ///
    /// `origin` is the reference line, `threshold` the hysteresis distance:
    /// the latch re-arms once the point is more than `2 * threshold` from
    /// the origin.
    pub fn observe(&mut self, position: f64, origin: f64, threshold: f64) -> CrossingSignal {
        if let Some(last) = self.last_position {
            let previous_side = last < origin;
            let current_side = position < origin;

            if previous_side != current_side {
                if !self.triggered {
                    self.active = true;
                    self.triggered = true;
                } else {
                    self.active = false;
                }
            } else {
                self.active = false;
            }

            if (position - origin).abs() > threshold * 2.0 {
                self.triggered = false;
            }
        }

        self.last_position = Some(position);
        self.signal()
    }

    pub fn signal(&self) -> CrossingSignal {
        CrossingSignal {
            active: self.active,
            triggered: self.triggered,
        }
    }
}

/// One detector per body across the ensemble.
///
/// Resizes with the population and is updated once per frame from projected
/// x-positions.
#[derive(Debug, Clone)]
pub struct CrossingTracker {
    origin: f64,
    threshold: f64,
    detectors: Vec<[CrossingDetector; 2]>,
}

impl CrossingTracker {
    /// `origin` is the vertical center line's x-coordinate in plane
    /// coordinates; `threshold` the hysteresis distance.
    pub fn new(origin: f64, threshold: f64) -> Self {
        Self {
            origin,
            threshold,
            detectors: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// Feeds one frame of projected x-positions, one `[inner, outer]` pair
    /// per simulator. The tracker grows or shrinks to match; new detectors
    /// start unseeded.
    pub fn update(&mut self, positions: &[[f64; 2]]) {
        self.detectors
            .resize_with(positions.len(), Default::default);

        for (pair, xs) in self.detectors.iter_mut().zip(positions) {
            for (detector, &x) in pair.iter_mut().zip(xs) {
                detector.observe(x, self.origin, self.threshold);
            }
        }
    }

    /// Signal for one body, by simulator and body index.
    pub fn signal(&self, simulator: usize, body: usize) -> CrossingSignal {
        self.detectors[simulator][body].signal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The canonical sequence: origin 100, threshold 5, positions
    // [110, 96, 95, 160, 96].
    #[test]
    fn test_crossing_sequence() {
        let mut detector = CrossingDetector::new();
        let origin = 100.0;
        let threshold = 5.0;

        // Seed only, never fires.
        let s1 = detector.observe(110.0, origin, threshold);
        assert!(!s1.active);
        assert!(!s1.triggered);

        // 110 -> 96 crosses the origin: one-shot fire.
        let s2 = detector.observe(96.0, origin, threshold);
        assert!(s2.active);
        assert!(s2.triggered);

        // 96 -> 95 stays on the same side: pulse ends, latch holds.
        let s3 = detector.observe(95.0, origin, threshold);
        assert!(!s3.active);
        assert!(s3.triggered);

        // |160 - 100| = 60 > 2 * 5: latch re-arms.
        let s4 = detector.observe(160.0, origin, threshold);
        assert!(!s4.triggered);

        // 160 -> 96 crosses again with the latch clear: fires again.
        let s5 = detector.observe(96.0, origin, threshold);
        assert!(s5.active);
        assert!(s5.triggered);
    }

    #[test]
    fn test_no_retrigger_while_latched() {
        let mut detector = CrossingDetector::new();
        detector.observe(101.0, 100.0, 5.0);
        let fired = detector.observe(99.0, 100.0, 5.0);
        assert!(fired.active);

        // Oscillating close to the origin: crossings happen but the latch
        // blocks every one of them.
        for position in [101.0, 99.0, 102.0, 98.0] {
            let signal = detector.observe(position, 100.0, 5.0);
            assert!(!signal.active);
            assert!(signal.triggered);
        }
    }

    #[test]
    fn test_far_crossing_rearms_in_same_observation() {
        let mut detector = CrossingDetector::new();
        detector.observe(95.0, 100.0, 5.0);

        // Crosses and lands far away: fires, and the latch resets in the
        // same observation, so the next crossing fires too.
        let signal = detector.observe(160.0, 100.0, 5.0);
        assert!(signal.active);
        assert!(!signal.triggered);

        let signal = detector.observe(95.0, 100.0, 5.0);
        assert!(signal.active);
    }

    #[test]
    fn test_tracker_resizes_with_population() {
        let mut tracker = CrossingTracker::new(100.0, 5.0);
        tracker.update(&[[110.0, 90.0], [105.0, 95.0]]);
        assert_eq!(tracker.len(), 2);

        tracker.update(&[[96.0, 110.0], [95.0, 105.0], [99.0, 101.0]]);
        assert_eq!(tracker.len(), 3);

        // Simulator 0 body 0 crossed 110 -> 96; the fresh third detector
        // only seeded.
        assert!(tracker.signal(0, 0).active);
        assert!(!tracker.signal(2, 0).active);

        tracker.update(&[[95.0, 111.0]]);
        assert_eq!(tracker.len(), 1);
    }
}
