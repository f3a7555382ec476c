//! Tracker output consumed by the counting engine.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::counter::rect::Rect;

/// Identifier assigned by the external multi-object tracker.
pub type TrackId = u64;

/// One tracked object in one frame.
///
/// The track id is stable across frames for the same physical object; the
/// counting engine never invents or discards ids.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackedObject {
    /// Tracker-assigned identity
    pub track_id: TrackId,
    /// Bounding box in frame coordinates
    pub bbox: Rect,
}

impl TrackedObject {
    pub fn new(track_id: TrackId, bbox: Rect) -> Self {
        Self { track_id, bbox }
    }

    /// Build from TLBR corners, the layout trackers usually emit.
    pub fn from_tlbr(track_id: TrackId, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(track_id, Rect::from_tlbr(x1, y1, x2, y2))
    }

    /// Tracked object whose box is centered on `(cx, cy)`.
    pub fn centered_at(track_id: TrackId, cx: f32, cy: f32) -> Self {
        Self::new(track_id, Rect::from_center(cx, cy, 40.0, 40.0))
    }

    #[inline]
    pub fn centroid(&self) -> Point2<f64> {
        self.bbox.centroid()
    }
}

/// All tracked objects of a single frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackedFrame {
    pub frame_index: u64,
    pub objects: Vec<TrackedObject>,
}

impl TrackedFrame {
    pub fn new(frame_index: u64, objects: Vec<TrackedObject>) -> Self {
        Self {
            frame_index,
            objects,
        }
    }
}
