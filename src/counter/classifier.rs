//! Point-to-lane classification.

use std::collections::BTreeSet;

use nalgebra::Point2;

use crate::counter::polygon::{LaneId, LanePolygon};
use crate::error::ConfigError;

/// Assigns a point to at most one lane.
///
/// Lanes are kept sorted by ascending `lane_id`, and the first lane whose
/// polygon contains the point wins. Overlapping lanes therefore always resolve
/// to the lowest lane id, independent of the order lanes were declared in.
#[derive(Debug, Clone)]
pub struct LaneClassifier {
    lanes: Vec<LanePolygon>,
}

impl LaneClassifier {
    /// Validate and order the lane set.
    pub fn new(mut lanes: Vec<LanePolygon>) -> Result<Self, ConfigError> {
        if lanes.is_empty() {
            return Err(ConfigError::NoLanes);
        }

        let mut seen = BTreeSet::new();
        for lane in &lanes {
            if !seen.insert(lane.lane_id) {
                return Err(ConfigError::DuplicateLane(lane.lane_id));
            }
            lane.validate()?;
        }

        lanes.sort_by_key(|lane| lane.lane_id);
        Ok(Self { lanes })
    }

    /// Lowest-id lane containing `point`, or `None` when the point is unassigned.
    pub fn classify(&self, point: &Point2<f64>) -> Option<LaneId> {
        self.lanes
            .iter()
            .find(|lane| lane.contains(point))
            .map(|lane| lane.lane_id)
    }

    /// Lanes in priority order.
    pub fn lanes(&self) -> &[LanePolygon] {
        &self.lanes
    }

    pub fn lane_ids(&self) -> impl Iterator<Item = LaneId> + '_ {
        self.lanes.iter().map(|lane| lane.lane_id)
    }
}
