//! Integration module for connecting detectors, trackers and recorded track
//! data with the lane counting engine.
//!
//! The detector and tracker are external collaborators: this module only
//! defines the seams they plug into, the vehicle pre-filter applied between
//! them, and the drivers that push frames through a [`LaneCountingEngine`].
//!
//! [`LaneCountingEngine`]: crate::counter::LaneCountingEngine

mod builder;
mod detector;
mod filter;
mod pipeline;
mod replay;

pub use builder::DetectionBuilder;
pub use detector::{Detection, DetectionSource, IntoDetections, ObjectTracker};
pub use filter::{COCO_VEHICLE_CLASSES, VehicleFilter};
pub use pipeline::CountingPipeline;
pub use replay::{CsvTrackReader, ReplayError, TrackRow, TrackSource, replay};
