#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDateTime;
use structopt::StructOpt;

use model::{now_seconds, LocationHistory, Replay, ReplayConfig, TimePolicy};

/// Replays a location history as a looping trail, printing one JSON frame per tick.
#[derive(StructOpt)]
struct Args {
    /// The path to a location history JSON file. Without one, the trail just waits for data.
    #[structopt(long)]
    history: Option<String>,
    /// The path to store locations, as JSON or CSV
    #[structopt(long)]
    stores: Option<String>,
    /// The path to a JSON replay config. The flags below override it.
    #[structopt(long)]
    config: Option<String>,
    /// Length of one animation cycle, in timeline units
    #[structopt(long)]
    loop_length: Option<f64>,
    /// Timeline units per real second
    #[structopt(long)]
    speed: Option<f64>,
    /// Timeline units of history to keep visible behind the cursor
    #[structopt(long)]
    trail_length: Option<f64>,
    /// Measure time as whole minutes since this UTC instant ("2019-08-15 00:00:00"), instead of
    /// passing timestamps through
    #[structopt(long, parse(try_from_str = parse_start))]
    start: Option<NaiveDateTime>,
    /// How many frames to emit. Defaults to one full cycle.
    #[structopt(long)]
    frames: Option<usize>,
    #[structopt(long, default_value = "30")]
    fps: f64,
    /// Sleep between frames and use the wall clock, instead of synthetic times
    #[structopt(long)]
    realtime: bool,
    /// Also write the normalized path here as GeoJSON
    #[structopt(long)]
    geojson: Option<String>,
}

fn parse_start(x: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(x, "%Y-%m-%d %H:%M:%S")
        .map_err(|err| anyhow!("bad --start {x}: {err}"))
}

impl Args {
    fn config(&self) -> Result<ReplayConfig> {
        let mut config = match self.config {
            Some(ref path) => ReplayConfig::load(path)?,
            None => ReplayConfig::default(),
        };
        if let Some(x) = self.loop_length {
            config.clock.loop_length = x;
        }
        if let Some(x) = self.speed {
            config.clock.speed = x;
        }
        if let Some(x) = self.trail_length {
            config.trail_length = x;
        }
        if let Some(start) = self.start {
            config.policy = TimePolicy::elapsed_since(start);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Real seconds between frames
fn frame_interval(fps: f64) -> Result<f64> {
    let interval = 1.0 / fps;
    if !fps.is_finite() || fps <= 0.0 || !interval.is_finite() {
        bail!("--fps must be a positive, reasonably sized number, not {fps}");
    }
    Ok(interval)
}

fn main() -> Result<()> {
    abstutil::logger::setup();

    let args = Args::from_args();
    let interval = frame_interval(args.fps)?;
    let config = args.config()?;
    let mut replay = Replay::new(&config)?;

    if let Some(ref path) = args.stores {
        let (stores, gps_bounds) = model::stores::load(path)?;
        info!(
            "{} stores between ({}, {}) and ({}, {})",
            stores.len(),
            gps_bounds.min_lon,
            gps_bounds.min_lat,
            gps_bounds.max_lon,
            gps_bounds.max_lat
        );
    }

    let history = match args.history {
        Some(ref path) => Some(LocationHistory::load(path)?),
        None => None,
    };
    // A malformed history stops here, before any frame is shown
    replay.load(history.as_ref())?;
    if !replay.path().is_empty() {
        // Frames the initial view
        let gps_bounds = replay.path().gps_bounds();
        info!(
            "{} points between ({}, {}) and ({}, {}), showing {} time units of trail",
            replay.path().len(),
            gps_bounds.min_lon,
            gps_bounds.min_lat,
            gps_bounds.max_lon,
            gps_bounds.max_lat,
            replay.trail_length()
        );
    }

    if let Some(ref path) = args.geojson {
        let gj = replay.path().to_geojson();
        fs_err::write(path, serde_json::to_string_pretty(&gj)?)?;
        info!("Wrote {path}");
    }

    let frames = args
        .frames
        .unwrap_or_else(|| (replay.clock().cycle_duration() * args.fps).ceil() as usize);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for i in 0..frames {
        let frame = if args.realtime {
            if i > 0 {
                std::thread::sleep(Duration::from_secs_f64(interval));
            }
            replay.frame(now_seconds())
        } else {
            replay.frame(i as f64 * interval)
        };
        serde_json::to_writer(&mut out, &frame)?;
        writeln!(out)?;
    }
    Ok(())
}
