//! Frame Loop
//!
//! Owns everything the installation needs at runtime and advances it one
//! frame at a time: control poll, weather refresh, physics step,
//! projection, crossing detection, note planning, frame publication. The
//! loop is single-threaded; the only cross-thread surface is the
//! [`FrameBuffer`] snapshot hand-off.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

use pendulum_core::{CrossingTracker, Ensemble, EnsembleError, EnsembleParams, FrameBuffer};
use pendulum_events::{Event, EventBus, SharedConfig, WeatherFetchFailure, WeatherUpdate};
use sonifier::{MappingError, NotePlanner, NoteSink, WeatherMusicMap};

use crate::config::InstallationConfig;
use crate::control::ControlWatcher;
use crate::handlers::{self, HandlerContext};
use crate::state::SharedState;
use crate::weather::WeatherProvider;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Ensemble(#[from] EnsembleError),
    #[error("could not load music mapping: {0}")]
    Mapping(#[from] MappingError),
}

pub struct Installation {
    config: InstallationConfig,
    bus: EventBus,
    ctx: HandlerContext,
    tracker: CrossingTracker,
    frame_buffer: Arc<FrameBuffer>,
    provider: Box<dyn WeatherProvider>,
    control: ControlWatcher,
    frame: u64,
    refresh_every: u64,
}

impl Installation {
    pub fn new(
        config: InstallationConfig,
        provider: Box<dyn WeatherProvider>,
    ) -> Result<Self, SetupError> {
        let music_map = match &config.paths.music_mapping {
            Some(path) => WeatherMusicMap::from_file(path)?,
            None => WeatherMusicMap::builtin(),
        };

        let params = EnsembleParams {
            temperature: config.weather.fallback_temperature,
            angle_range: (-config.simulation.angle_range, config.simulation.angle_range),
            ..EnsembleParams::default()
        };
        let ensemble = Ensemble::new(
            config.simulation.pendulum_count,
            params,
            config.simulation.seed,
        )?;

        let state = SharedState::new(SharedConfig {
            location: config.weather.location.clone(),
            temperature: config.weather.fallback_temperature,
            weather_condition: config.weather.fallback_condition.clone(),
            pendulum_count: config.simulation.pendulum_count,
            volume: config.sonifier.volume,
            ..SharedConfig::default()
        });
        let planner = NotePlanner::new(&state.snapshot().music);

        let ctx = HandlerContext {
            state,
            ensemble: Rc::new(RefCell::new(ensemble)),
            planner: Rc::new(RefCell::new(planner)),
            music_map: Rc::new(music_map),
            refresh_requested: Rc::new(Cell::new(true)),
        };
        let bus = EventBus::new();
        handlers::wire(&bus, &ctx);

        let tracker = CrossingTracker::new(
            config.sonifier.origin.0,
            config.sonifier.crossing_threshold,
        );
        let control = ControlWatcher::new(&config.paths.control_dir);
        let refresh_every = config.weather.refresh_interval_secs * config.simulation.fps;

        Ok(Self {
            config,
            bus,
            ctx,
            tracker,
            frame_buffer: Arc::new(FrameBuffer::new()),
            provider,
            control,
            frame: 0,
            refresh_every,
        })
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn state(&self) -> &SharedState {
        &self.ctx.state
    }

    /// Shared snapshot handle for the audio thread.
    pub fn frame_buffer(&self) -> Arc<FrameBuffer> {
        Arc::clone(&self.frame_buffer)
    }

    /// Fetches the weather for the configured location and publishes the
    /// outcome. A failed fetch becomes a WeatherFetchError event and the
    /// configuration keeps its last applied weather. Satisfies any pending
    /// refresh request, so a caller fetching before the loop starts does not
    /// trigger a second fetch on the first frame.
    pub fn refresh_weather(&mut self) {
        self.ctx.refresh_requested.set(false);
        let location = self.ctx.state.snapshot().location;
        match self.provider.fetch(&location) {
            Ok(report) => {
                self.bus.publish(&Event::WeatherUpdated(WeatherUpdate {
                    condition: report.condition,
                    temperature: report.temperature,
                }));
            }
            Err(e) => {
                self.bus.publish(&Event::WeatherFetchError(WeatherFetchFailure {
                    error_message: e.to_string(),
                    location,
                }));
            }
        }
    }

    /// Advances the installation by one frame.
    pub fn run_frame(&mut self, sink: &mut dyn NoteSink) {
        self.control.poll(&self.bus);

        let refresh_due =
            self.refresh_every > 0 && self.frame > 0 && self.frame % self.refresh_every == 0;
        if self.ctx.refresh_requested.replace(false) || refresh_due {
            self.refresh_weather();
        }

        self.ctx.ensemble.borrow_mut().step(self.config.simulation.dt);
        self.frame += 1;

        let snapshot = self.ctx.ensemble.borrow().snapshot(
            self.frame,
            self.config.sonifier.origin,
            self.config.sonifier.scale,
        );

        let positions: Vec<[f64; 2]> = snapshot
            .pendulums
            .iter()
            .map(|p| [p.bodies[0].x, p.bodies[1].x])
            .collect();
        self.tracker.update(&positions);

        self.ctx
            .planner
            .borrow_mut()
            .update(&self.tracker, &snapshot, sink);

        self.frame_buffer.publish(snapshot);
    }

    /// Runs a fixed number of frames back to back, without pacing.
    pub fn run_frames(&mut self, frames: u64, sink: &mut dyn NoteSink) {
        for _ in 0..frames {
            self.run_frame(sink);
        }
    }

    /// Runs at the configured cadence until `max_frames` is reached (or
    /// forever when `None`).
    pub fn run(&mut self, sink: &mut dyn NoteSink, max_frames: Option<u64>) {
        let fps = self.config.simulation.fps.max(1);
        let frame_duration = Duration::from_secs_f64(1.0 / fps as f64);
        tracing::info!(fps, "frame loop started");

        let mut frames = 0u64;
        loop {
            let start = Instant::now();
            self.run_frame(sink);

            frames += 1;
            if let Some(max) = max_frames {
                if frames >= max {
                    break;
                }
            }

            if let Some(remaining) = frame_duration.checked_sub(start.elapsed()) {
                thread::sleep(remaining);
            }
        }
        tracing::info!(frames, "frame loop stopped");
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}
