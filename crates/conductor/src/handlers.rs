//! Event Handlers
//!
//! All mutation of the shared configuration and the ensemble happens here,
//! inside bus subscriptions. Handlers clone `Rc` handles into their
//! closures and never hold a borrow across a publish.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pendulum_core::Ensemble;
use pendulum_events::{Event, EventBus, EventKind};
use sonifier::{NotePlanner, WeatherMusicMap};

use crate::state::SharedState;

/// The mutable pieces the handlers coordinate.
#[derive(Clone)]
pub struct HandlerContext {
    pub state: SharedState,
    pub ensemble: Rc<RefCell<Ensemble>>,
    pub planner: Rc<RefCell<NotePlanner>>,
    pub music_map: Rc<WeatherMusicMap>,
    /// Set when the next loop iteration should refetch the weather.
    pub refresh_requested: Rc<Cell<bool>>,
}

/// Subscribes every installation handler on the bus.
pub fn wire(bus: &EventBus, ctx: &HandlerContext) {
    {
        let ctx = ctx.clone();
        bus.subscribe(EventKind::WeatherUpdated, move |event, bus| {
            if let Event::WeatherUpdated(update) = event {
                ctx.state.set_weather(&update.condition, update.temperature);
                ctx.ensemble
                    .borrow_mut()
                    .set_temperature(update.temperature);

                let settings = ctx.music_map.settings_for(&update.condition);
                ctx.state.set_music(settings);
                ctx.planner.borrow_mut().set_music(&settings);
                bus.publish(&Event::MusicSettingsChanged);

                tracing::info!(
                    condition = %update.condition,
                    temperature = update.temperature,
                    "weather applied"
                );
            }
        });
    }

    {
        let ctx = ctx.clone();
        bus.subscribe(EventKind::MoonModeChanged, move |event, _| {
            if let Event::MoonModeChanged(enabled) = event {
                ctx.state.set_moon_mode(*enabled);
                ctx.ensemble.borrow_mut().set_reduced_gravity(*enabled);
            }
        });
    }

    {
        let ctx = ctx.clone();
        bus.subscribe(EventKind::PendulumCountChanged, move |event, _| {
            if let Event::PendulumCountChanged(count) = event {
                match ctx.ensemble.borrow_mut().resize(*count) {
                    Ok(()) => ctx.state.set_pendulum_count(*count),
                    Err(e) => tracing::warn!(count, error = %e, "resize rejected"),
                }
            }
        });
    }

    {
        let ctx = ctx.clone();
        bus.subscribe(EventKind::MassRangeChanged, move |event, _| {
            if let Event::MassRangeChanged(range) = event {
                match ctx.ensemble.borrow_mut().set_mass_range(*range) {
                    Ok(()) => ctx.state.set_mass_range(*range),
                    Err(e) => tracing::warn!(range, error = %e, "mass range rejected"),
                }
            }
        });
    }

    {
        let ctx = ctx.clone();
        bus.subscribe(EventKind::LengthRangeChanged, move |event, _| {
            if let Event::LengthRangeChanged(range) = event {
                match ctx.ensemble.borrow_mut().set_length_range(*range) {
                    Ok(()) => ctx.state.set_length_range(*range),
                    Err(e) => tracing::warn!(range, error = %e, "length range rejected"),
                }
            }
        });
    }

    {
        let ctx = ctx.clone();
        bus.subscribe(EventKind::LocationChanged, move |event, _| {
            if let Event::LocationChanged(location) = event {
                ctx.state.set_location(location);
                ctx.refresh_requested.set(true);
                tracing::info!(%location, "location changed, weather refresh queued");
            }
        });
    }

    // Fetch failures are logged and nothing else: the configuration keeps
    // the last successfully applied weather.
    bus.subscribe(EventKind::WeatherFetchError, |event, _| {
        if let Event::WeatherFetchError(failure) = event {
            tracing::warn!(
                location = %failure.location,
                error = %failure.error_message,
                "weather fetch failed"
            );
        }
    });
}
