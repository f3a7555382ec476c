//! Lane-based unique vehicle counting.
//!
//! Takes per-frame tracker output (track id plus bounding box), decides which
//! lane polygon each tracked vehicle occupies, and counts every vehicle at most
//! once per lane. Jitter is suppressed by a minimum-move filter and lane
//! flicker by a per-track cooldown.
//!
//! ```ignore
//! use lanecount_rs::{CountingConfig, LaneCountingEngine, TrackedObject, VideoInfo};
//!
//! let mut engine = LaneCountingEngine::new(&CountingConfig::default(), VideoInfo::new(1280, 720, 30.0))?;
//! let report = engine.process_frame(1, &[TrackedObject::from_tlbr(7, 80.0, 280.0, 160.0, 340.0)])?;
//! for event in &report.events {
//!     println!("vehicle {} entered lane {}", event.track_id, event.lane_id);
//! }
//! let totals = engine.finish().totals;
//! ```

pub mod config;
pub mod counter;
pub mod error;
pub mod export;
pub mod integration;

pub use config::{CountingConfig, LaneDefinition, VideoInfo};
pub use counter::{
    CountEvent, CountReport, FrameReport, LaneCountingEngine, LaneId, LanePolygon, LaneState,
    Rect, Resolution, TrackId, TrackedFrame, TrackedObject,
};
pub use error::{ConfigError, CountingError, ExportError};
