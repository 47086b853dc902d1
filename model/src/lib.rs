//! Turns a raw location history into a trail that can be animated: E7 coordinates become
//! degrees, timestamps become timeline values, and a looping clock decides which part of the
//! trail is lit up at any moment.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod clock;
mod config;
mod error;
mod export;
mod history;
mod normalize;
mod session;
pub mod stores;
mod trail;

pub use self::clock::{now_seconds, AnimationClock, ClockConfig};
pub use self::config::ReplayConfig;
pub use self::error::TrailError;
pub use self::history::{LocationHistory, RawE7, RawLocationRecord, RawTimestamp};
pub use self::normalize::{NormalizedPath, PathStatus, TimePolicy};
pub use self::session::{Frame, Replay};
pub use self::stores::StoreLocation;
pub use self::trail::TrailSegment;
