//! Coordination layer for the pendulum installation.
//!
//! The conductor owns the event bus, the shared configuration, and the
//! frame loop. External inputs (weather fetches, operator control files)
//! become events; handlers apply them to the configuration and the
//! ensemble; each frame the ensemble is stepped, projected, fed through
//! crossing detection and note planning, and published as an immutable
//! kinematic snapshot.

pub mod config;
pub mod control;
pub mod display;
pub mod handlers;
pub mod output;
pub mod runner;
pub mod state;
pub mod weather;

pub use config::{default_config_toml, ConfigError, InstallationConfig};
pub use control::{ControlCommand, ControlWatcher};
pub use handlers::HandlerContext;
pub use output::JsonlSink;
pub use runner::{Installation, SetupError};
pub use state::SharedState;
pub use weather::{FixtureProvider, WeatherError, WeatherProvider, WeatherReport};
