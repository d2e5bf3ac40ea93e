//! Shared event types, dispatch, and configuration for the installation.
//!
//! This crate contains the event vocabulary every other crate speaks, the
//! bus that carries it, and the pure data records (shared configuration,
//! musical settings, kinematic frames) that cross crate boundaries. It has
//! no simulation logic.

pub mod bus;
pub mod config;
pub mod event;
pub mod frame;
pub mod music;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

// Re-export event types
pub use event::{Event, EventKind, WeatherFetchFailure, WeatherUpdate};

// Re-export bus types
pub use bus::{EventBus, SubscriberId};

// Re-export configuration types
pub use config::{MusicSettings, SharedConfig};

// Re-export musical types
pub use music::{Key, Mode, ParseMusicError, Scale};

// Re-export frame snapshot types
pub use frame::{BodyKinematics, KinematicFrame, PendulumKinematics};
