use chrono::{NaiveDateTime, TimeZone, Utc};
use geom::{GPSBounds, LonLat};
use serde::{Deserialize, Serialize};

use crate::{LocationHistory, RawE7, RawLocationRecord, TrailError};

const E7: f64 = 10_000_000.0;
const MS_PER_MINUTE: f64 = 60_000.0;

/// How raw timestamps become values on the timeline. Both kinds of exports exist, so the choice
/// is explicit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum TimePolicy {
    /// Whole minutes since `start` (UTC). Partial minutes are truncated, not rounded.
    ElapsedMinutes { start: NaiveDateTime },
    /// Use `timestampMs` as-is; the source is already in the animation's units.
    Raw,
}

impl Default for TimePolicy {
    fn default() -> Self {
        TimePolicy::Raw
    }
}

impl TimePolicy {
    pub fn elapsed_since(start: NaiveDateTime) -> Self {
        TimePolicy::ElapsedMinutes { start }
    }

    /// Only meaningful for `ElapsedMinutes`
    pub fn start_epoch_ms(&self) -> Option<i64> {
        match self {
            TimePolicy::ElapsedMinutes { start } => {
                Some(Utc.from_utc_datetime(start).timestamp_millis())
            }
            TimePolicy::Raw => None,
        }
    }

    fn time_value(&self, timestamp_ms: f64) -> f64 {
        match self.start_epoch_ms() {
            Some(start) => ((timestamp_ms - start as f64) / MS_PER_MINUTE).floor(),
            None => timestamp_ms,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PathStatus {
    /// Waiting for a source. Also where a path stays forever if none ever arrives.
    Loading,
    /// Ingestion started
    Loaded,
    Ready,
}

/// A trail ready for animating. `points[i]` and `timeline[i]` always come from the same raw
/// record.
#[derive(Clone, Serialize)]
pub struct NormalizedPath {
    points: Vec<LonLat>,
    timeline: Vec<f64>,
    status: PathStatus,
}

impl NormalizedPath {
    /// The empty path that exists before any source is supplied
    pub fn awaiting() -> Self {
        Self {
            points: Vec::new(),
            timeline: Vec::new(),
            status: PathStatus::Loading,
        }
    }

    /// Builds a path from a location-history payload in one pass. A malformed record fails the
    /// whole thing; no partial path is ever returned.
    pub fn normalize(
        source: Option<&LocationHistory>,
        policy: &TimePolicy,
    ) -> Result<Self, TrailError> {
        let mut path = Self::awaiting();
        let records = match source.and_then(|src| src.locations.as_ref()) {
            Some(records) => records,
            None => {
                debug!("No location source yet, path is still {:?}", path.status);
                return Ok(path);
            }
        };

        path.advance(PathStatus::Loaded);
        path.points.reserve(records.len());
        path.timeline.reserve(records.len());
        for (idx, rec) in records.iter().enumerate() {
            let (pt, time) = match normalize_record(rec, policy) {
                Ok(pair) => pair,
                Err(reason) => {
                    warn!(
                        "Abandoning normalization of {} records at #{idx}: {reason}",
                        records.len()
                    );
                    return Err(TrailError::malformed(idx, reason));
                }
            };
            path.points.push(pt);
            path.timeline.push(time);
        }
        path.advance(PathStatus::Ready);

        info!(
            "Normalized {} location records into a path, spanning {:?}",
            path.len(),
            path.time_range()
        );
        Ok(path)
    }

    fn advance(&mut self, next: PathStatus) {
        debug!("Path status {:?} -> {:?}", self.status, next);
        self.status = next;
    }

    pub fn points(&self) -> &[LonLat] {
        &self.points
    }

    pub fn timeline(&self) -> &[f64] {
        &self.timeline
    }

    pub fn status(&self) -> PathStatus {
        self.status
    }

    pub fn is_ready(&self) -> bool {
        self.status == PathStatus::Ready
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The smallest and largest time values. The timeline isn't required to be sorted, so this
    /// looks at every value. None for an empty path.
    pub fn time_range(&self) -> Option<(f64, f64)> {
        let mut iter = self.timeline.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
    }

    pub fn gps_bounds(&self) -> GPSBounds {
        let mut gps_bounds = GPSBounds::new();
        for pt in &self.points {
            gps_bounds.update(*pt);
        }
        gps_bounds
    }
}

fn normalize_record(rec: &RawLocationRecord, policy: &TimePolicy) -> Result<(LonLat, f64), String> {
    let lat = e7_field(rec.latitude_e7.as_ref(), "latitudeE7")?;
    let lon = e7_field(rec.longitude_e7.as_ref(), "longitudeE7")?;
    let raw_time = rec.timestamp_ms.as_ref().ok_or("missing timestampMs")?;
    let timestamp_ms = raw_time
        .coerce()
        .ok_or_else(|| format!("timestampMs {:?} isn't a number", raw_time))?;

    let pt = LonLat::new(lon as f64 / E7, lat as f64 / E7);
    Ok((pt, policy.time_value(timestamp_ms)))
}

fn e7_field(value: Option<&RawE7>, name: &str) -> Result<i64, String> {
    match value {
        Some(RawE7::Integer(x)) => Ok(*x),
        Some(RawE7::Other(x)) => Err(format!("{name} {x} isn't an integer")),
        None => Err(format!("missing {name}")),
    }
}
