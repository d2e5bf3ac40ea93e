//! Shared State Handle
//!
//! Single-owner handle to the installation's [`SharedConfig`]. Handlers
//! clone the handle into their closures and mutate through it; everything
//! else reads by cloned snapshot, never by holding a borrow across a
//! dispatch.

use std::cell::RefCell;
use std::rc::Rc;

use pendulum_events::{MusicSettings, SharedConfig};

#[derive(Debug, Clone, Default)]
pub struct SharedState {
    inner: Rc<RefCell<SharedConfig>>,
}

impl SharedState {
    pub fn new(config: SharedConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(config)),
        }
    }

    /// A cloned snapshot of the current configuration.
    pub fn snapshot(&self) -> SharedConfig {
        self.inner.borrow().clone()
    }

    pub fn set_location(&self, location: &str) {
        self.inner.borrow_mut().location = location.to_string();
    }

    pub fn set_weather(&self, condition: &str, temperature: f64) {
        let mut config = self.inner.borrow_mut();
        config.weather_condition = condition.to_string();
        config.temperature = temperature;
    }

    pub fn set_moon_mode(&self, moon_mode: bool) {
        self.inner.borrow_mut().moon_mode = moon_mode;
    }

    pub fn set_pendulum_count(&self, count: usize) {
        self.inner.borrow_mut().pendulum_count = count;
    }

    pub fn set_mass_range(&self, range: f64) {
        self.inner.borrow_mut().mass_range = range;
    }

    pub fn set_length_range(&self, range: f64) {
        self.inner.borrow_mut().length_range = range;
    }

    pub fn set_music(&self, music: MusicSettings) {
        self.inner.borrow_mut().music = music;
    }

    pub fn set_volume(&self, volume: f64) {
        self.inner.borrow_mut().volume = volume.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pendulum_events::{Key, Mode, Scale};

    #[test]
    fn test_snapshot_is_detached() {
        let state = SharedState::default();
        let before = state.snapshot();

        state.set_weather("Heavy rain", 8.5);

        assert_eq!(before.weather_condition, "Clear");
        assert_eq!(state.snapshot().weather_condition, "Heavy rain");
        assert_eq!(state.snapshot().temperature, 8.5);
    }

    #[test]
    fn test_clones_share_the_config() {
        let state = SharedState::default();
        let handle = state.clone();

        handle.set_music(MusicSettings {
            key: Key::EFlat,
            scale: Scale::Minor,
            mode: Mode::Aeolian,
        });

        assert_eq!(state.snapshot().music.key, Key::EFlat);
    }

    #[test]
    fn test_volume_is_clamped() {
        let state = SharedState::default();
        state.set_volume(1.7);
        assert_eq!(state.snapshot().volume, 1.0);
        state.set_volume(-0.2);
        assert_eq!(state.snapshot().volume, 0.0);
    }
}
