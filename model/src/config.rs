use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::check_non_negative;
use crate::{ClockConfig, TimePolicy, TrailError};

/// Everything needed to replay one trail. Missing fields take defaults, but values that are
/// present and nonsensical are rejected by `validate`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplayConfig {
    pub clock: ClockConfig,
    pub policy: TimePolicy,
    /// How much trailing history, in timeline units, stays visible behind the cursor
    pub trail_length: f64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            clock: ClockConfig::default(),
            policy: TimePolicy::default(),
            trail_length: 180.0,
        }
    }
}

impl ReplayConfig {
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &str) -> Result<Self> {
        let file = fs_err::File::open(path)?;
        Self::from_reader(file).map_err(|err| anyhow!("{path}: {err}"))
    }

    /// Clock settings are checked again when the clock is built.
    pub fn validate(&self) -> Result<(), TrailError> {
        check_non_negative("trail length", self.trail_length)?;
        crate::AnimationClock::new(self.clock.clone())?;
        Ok(())
    }
}
