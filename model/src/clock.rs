use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::check_positive;
use crate::TrailError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockConfig {
    /// One full cycle of the animation, in the same units as the path's timeline
    pub loop_length: f64,
    /// How many of those units pass per real second
    pub speed: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            loop_length: 1800.0,
            speed: 30.0,
        }
    }
}

/// Produces the animation cursor. There's no timer or thread here; whatever drives frames asks
/// for the cursor at the current time, so the same instant always gives the same answer.
#[derive(Clone, Debug)]
pub struct AnimationClock {
    config: ClockConfig,
}

impl AnimationClock {
    pub fn new(config: ClockConfig) -> Result<Self, TrailError> {
        check_positive("loop length", config.loop_length)?;
        check_positive("animation speed", config.speed)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Real seconds before the cursor wraps back to 0
    pub fn cycle_duration(&self) -> f64 {
        self.config.loop_length / self.config.speed
    }

    /// A sawtooth over real time: rises from 0 to just under the loop length, then resets every
    /// `cycle_duration()` seconds.
    pub fn tick(&self, now_seconds: f64) -> f64 {
        let cycle = self.cycle_duration();
        let phase = now_seconds.rem_euclid(cycle) / cycle;
        let time = phase * self.config.loop_length;
        // rem_euclid can land exactly on the divisor for tiny negative inputs
        if time >= self.config.loop_length {
            0.0
        } else {
            time
        }
    }

    pub fn tick_now(&self) -> f64 {
        self.tick(now_seconds())
    }
}

/// Wall-clock seconds since the Unix epoch
pub fn now_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
