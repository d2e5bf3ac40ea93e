//! Frame Buffer
//!
//! Single-slot hand-off between the simulation loop and the audio thread.
//! The simulation publishes a fresh immutable snapshot each frame; readers
//! clone the `Arc` under the lock and work with a consistent frame for as
//! long as they hold it. A slow reader never sees a half-written frame,
//! only an older complete one.

use std::sync::{Arc, Mutex};

use pendulum_events::KinematicFrame;

#[derive(Debug)]
pub struct FrameBuffer {
    latest: Mutex<Arc<KinematicFrame>>,
}

impl FrameBuffer {
    /// Starts with an empty frame so readers are valid before the first
    /// simulation frame lands.
    pub fn new() -> Self {
        Self {
            latest: Mutex::new(Arc::new(KinematicFrame::empty())),
        }
    }

    /// Replaces the buffered snapshot. Only the pointer swap happens under
    /// the lock.
    pub fn publish(&self, frame: KinematicFrame) {
        let frame = Arc::new(frame);
        match self.latest.lock() {
            Ok(mut slot) => *slot = frame,
            // A reader panicked mid-clone; the slot still holds a complete
            // frame, so keep publishing.
            Err(poisoned) => *poisoned.into_inner() = frame,
        }
    }

    /// The most recently published snapshot.
    pub fn latest(&self) -> Arc<KinematicFrame> {
        match self.latest.lock() {
            Ok(slot) => Arc::clone(&slot),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
