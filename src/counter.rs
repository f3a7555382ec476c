mod classifier;
mod debouncer;
mod engine;
mod geometry;
mod lane_state;
mod motion;
mod polygon;
mod rect;
mod tally;
mod tracked_object;

pub use classifier::LaneClassifier;
pub use debouncer::{Transition, TransitionDebouncer};
pub use engine::{CountReport, FrameReport, LaneCountingEngine};
pub use geometry::{GeometryMapper, Resolution};
pub use lane_state::LaneState;
pub use motion::{Motion, MotionFilter};
pub use polygon::{LaneId, LanePolygon};
pub use rect::Rect;
pub use tally::{CountEvent, EventRecorder, UniqueCounter, frame_timestamp};
pub use tracked_object::{TrackId, TrackedFrame, TrackedObject};
