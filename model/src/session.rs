use serde::Serialize;

use crate::error::check_non_negative;
use crate::{
    AnimationClock, LocationHistory, NormalizedPath, PathStatus, ReplayConfig, TimePolicy,
    TrailError, TrailSegment,
};

/// Ties one path to one clock. Whatever drives frames calls `frame` once per tick and redraws
/// from the result; nothing here schedules itself.
pub struct Replay {
    clock: AnimationClock,
    policy: TimePolicy,
    trail_length: f64,
    path: NormalizedPath,
}

/// What to draw right now
#[derive(Clone, Serialize)]
pub struct Frame {
    pub current_time: f64,
    pub status: PathStatus,
    pub trail: TrailSegment,
}

impl Replay {
    pub fn new(config: &ReplayConfig) -> Result<Self, TrailError> {
        check_non_negative("trail length", config.trail_length)?;
        Ok(Self {
            clock: AnimationClock::new(config.clock.clone())?,
            policy: config.policy.clone(),
            trail_length: config.trail_length,
            path: NormalizedPath::awaiting(),
        })
    }

    /// Replaces the path wholesale. If the source is malformed, the old path is dropped too and
    /// the session goes back to waiting for data, so nothing stale gets animated.
    pub fn load(&mut self, source: Option<&LocationHistory>) -> Result<(), TrailError> {
        match NormalizedPath::normalize(source, &self.policy) {
            Ok(path) => {
                if let Some((start, end)) = path.time_range() {
                    let loop_length = self.clock.config().loop_length;
                    if end - start > loop_length {
                        warn!(
                            "The path spans {} time units, but the animation loops every \
                             {loop_length}; the end will never be shown",
                            end - start
                        );
                    }
                }
                self.path = path;
                Ok(())
            }
            Err(err) => {
                self.path = NormalizedPath::awaiting();
                Err(err)
            }
        }
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn trail_length(&self) -> f64 {
        self.trail_length
    }

    /// Recomputes the cursor and the visible trail at some instant, in real seconds. Until the
    /// path is ready, the trail is empty but the cursor still runs.
    pub fn frame(&self, now_seconds: f64) -> Frame {
        let current_time = self.clock.tick(now_seconds);
        let trail = if self.path.is_ready() {
            self.path.visible_trail(current_time, self.trail_length)
        } else {
            TrailSegment::default()
        };
        Frame {
            current_time,
            status: self.path.status(),
            trail,
        }
    }

    pub fn frame_now(&self) -> Frame {
        self.frame(crate::clock::now_seconds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClockConfig, RawLocationRecord};

    fn config() -> ReplayConfig {
        ReplayConfig {
            clock: ClockConfig {
                loop_length: 1800.0,
                speed: 30.0,
            },
            policy: TimePolicy::Raw,
            trail_length: 180.0,
        }
    }

    fn history() -> LocationHistory {
        LocationHistory::new(
            (0..10)
                .map(|i| RawLocationRecord::new(476052100 + i, -1223320700 - i, i * 100))
                .collect(),
        )
    }

    #[test]
    fn awaiting_data() {
        let replay = Replay::new(&config()).unwrap();
        let frame = replay.frame(30.0);
        assert_eq!(frame.current_time, 900.0);
        assert_eq!(frame.status, PathStatus::Loading);
        assert!(frame.trail.is_empty());
    }

    #[test]
    fn trail_follows_the_cursor() {
        let mut replay = Replay::new(&config()).unwrap();
        replay.load(Some(&history())).unwrap();
        // cursor at 450
        let frame = replay.frame(15.0);
        assert_eq!(frame.current_time, 450.0);
        assert_eq!(frame.status, PathStatus::Ready);
        assert_eq!(frame.trail.indices, vec![3, 4]);
        // one cycle later, the same picture
        assert_eq!(replay.frame(75.0).trail.indices, vec![3, 4]);
    }

    #[test]
    fn malformed_load_drops_the_old_path() {
        let mut replay = Replay::new(&config()).unwrap();
        replay.load(Some(&history())).unwrap();
        assert_eq!(replay.path().len(), 10);

        let mut records = history().locations.unwrap();
        records[7].longitude_e7 = None;
        let err = replay.load(Some(&LocationHistory::new(records))).unwrap_err();
        assert_eq!(err.record_index(), Some(7));
        assert_eq!(replay.path().status(), PathStatus::Loading);
        assert!(replay.path().is_empty());
        assert!(replay.frame(15.0).trail.is_empty());
    }

    #[test]
    fn wall_clock_frame() {
        let mut replay = Replay::new(&config()).unwrap();
        replay.load(Some(&history())).unwrap();
        let frame = replay.frame_now();
        assert!((0.0..1800.0).contains(&frame.current_time));
        assert!(frame.trail.len() <= 2);
    }

    #[test]
    fn bad_config_means_no_session() {
        let mut bad = config();
        bad.clock.speed = 0.0;
        assert!(matches!(
            Replay::new(&bad),
            Err(TrailError::InvalidConfiguration(_))
        ));
        let mut bad = config();
        bad.trail_length = f64::NAN;
        assert!(Replay::new(&bad).is_err());
    }
}
