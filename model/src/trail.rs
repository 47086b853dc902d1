use geom::LonLat;
use serde::Serialize;

use crate::NormalizedPath;

/// The part of a path that's lit up behind the cursor, in path order.
#[derive(Clone, Default, Serialize)]
pub struct TrailSegment {
    /// Indices into the full path
    pub indices: Vec<usize>,
    pub points: Vec<LonLat>,
    pub timeline: Vec<f64>,
}

impl TrailSegment {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl NormalizedPath {
    /// Everything with a time in `[current - trail_length, current]`. The timeline isn't assumed
    /// to be sorted, so this checks every point instead of binary searching.
    pub fn visible_trail(&self, current: f64, trail_length: f64) -> TrailSegment {
        let earliest = current - trail_length;
        let mut segment = TrailSegment::default();
        for (idx, (pt, t)) in self.points().iter().zip(self.timeline()).enumerate() {
            // NaN fails both comparisons and selects nothing
            if *t >= earliest && *t <= current {
                segment.indices.push(idx);
                segment.points.push(*pt);
                segment.timeline.push(*t);
            }
        }
        segment
    }
}
