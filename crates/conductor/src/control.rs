//! Control Directory
//!
//! Allows runtime modification of the installation by watching for JSON
//! files in a control directory. Each file holds one command; consumed
//! files are translated into published events and deleted.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use pendulum_events::{Event, EventBus};

/// Commands an operator can drop into the control directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlCommand {
    /// Change the weather location
    SetLocation { location: String },
    /// Toggle reduced-gravity mode
    SetMoonMode { enabled: bool },
    /// Resize the ensemble
    SetPendulumCount { count: usize },
    /// Change the mass variation range
    SetMassRange { range: f64 },
    /// Change the length variation range
    SetLengthRange { range: f64 },
}

impl ControlCommand {
    pub fn into_event(self) -> Event {
        match self {
            ControlCommand::SetLocation { location } => Event::LocationChanged(location),
            ControlCommand::SetMoonMode { enabled } => Event::MoonModeChanged(enabled),
            ControlCommand::SetPendulumCount { count } => Event::PendulumCountChanged(count),
            ControlCommand::SetMassRange { range } => Event::MassRangeChanged(range),
            ControlCommand::SetLengthRange { range } => Event::LengthRangeChanged(range),
        }
    }
}

/// Scans a directory for command files once per frame.
#[derive(Debug, Clone)]
pub struct ControlWatcher {
    dir: PathBuf,
}

impl ControlWatcher {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    /// Consumes every `.json` command file in the directory, publishing the
    /// corresponding events and deleting the files. Unparseable files are
    /// left in place so the operator can fix them. Returns the number of
    /// commands applied.
    pub fn poll(&self, bus: &EventBus) -> usize {
        if !self.dir.exists() {
            if let Err(e) = fs::create_dir_all(&self.dir) {
                tracing::warn!(dir = %self.dir.display(), error = %e, "could not create control directory");
                return 0;
            }
        }

        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(_) => return 0,
        };

        let mut applied = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "could not read control file");
                    continue;
                }
            };

            match serde_json::from_str::<ControlCommand>(&content) {
                Ok(command) => {
                    tracing::info!(file = %path.display(), ?command, "applying control command");
                    bus.publish(&command.into_event());
                    applied += 1;
                    if let Err(e) = fs::remove_file(&path) {
                        tracing::warn!(file = %path.display(), error = %e, "could not delete control file");
                    }
                }
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "could not parse control file");
                }
            }
        }
        applied
    }
}
