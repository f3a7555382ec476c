//! Detection pre-filter applied before tracking.

use serde::{Deserialize, Serialize};

use crate::integration::detector::Detection;

/// COCO classes counted as vehicles: car, motorcycle, bus, truck.
pub const COCO_VEHICLE_CLASSES: [u32; 4] = [2, 3, 5, 7];

/// Keeps confident, reasonably sized vehicle detections only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleFilter {
    pub min_confidence: f32,
    pub classes: Vec<u32>,
    pub min_width: f32,
    pub min_height: f32,
}

impl Default for VehicleFilter {
    fn default() -> Self {
        Self {
            min_confidence: 0.5,
            classes: COCO_VEHICLE_CLASSES.to_vec(),
            min_width: 30.0,
            min_height: 30.0,
        }
    }
}

impl VehicleFilter {
    pub fn accepts(&self, detection: &Detection) -> bool {
        detection.score >= self.min_confidence
            && self.classes.contains(&detection.class_id)
            && detection.bbox.width >= self.min_width
            && detection.bbox.height >= self.min_height
    }

    pub fn apply(&self, detections: Vec<Detection>) -> Vec<Detection> {
        detections.into_iter().filter(|d| self.accepts(d)).collect()
    }
}
