//! Static configuration for a counting run.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::counter::{LaneId, LanePolygon, Resolution};
use crate::error::ConfigError;
use crate::integration::VehicleFilter;

/// Lane polygon as written in the config file, at canonical resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneDefinition {
    pub lane_id: LaneId,
    pub vertices: Vec<[i32; 2]>,
}

impl LaneDefinition {
    pub fn to_polygon(&self) -> LanePolygon {
        let points: Vec<(i32, i32)> = self.vertices.iter().map(|&[x, y]| (x, y)).collect();
        LanePolygon::from_points(self.lane_id, &points)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CountingConfig {
    /// Resolution the lane vertices are authored in.
    pub canonical_resolution: Resolution,
    pub lanes: Vec<LaneDefinition>,
    /// Minimum centroid displacement, in pixels, before a track is re-classified.
    pub min_move_dist: f64,
    /// Minimum number of frames between two accepted lane changes of one track.
    pub cooldown_frames: u64,
    /// Pre-tracking detection filter, used by the detector pipeline.
    pub detection: VehicleFilter,
}

impl Default for CountingConfig {
    /// Three curved lanes on a 1280x720 frame.
    fn default() -> Self {
        Self {
            canonical_resolution: Resolution::new(1280, 720),
            lanes: vec![
                LaneDefinition {
                    lane_id: 1,
                    vertices: vec![[0, 720], [400, 400], [500, 0], [0, 0]],
                },
                LaneDefinition {
                    lane_id: 2,
                    vertices: vec![[400, 720], [800, 400], [700, 0], [500, 0]],
                },
                LaneDefinition {
                    lane_id: 3,
                    vertices: vec![[800, 720], [1280, 720], [1280, 0], [700, 0]],
                },
            ],
            min_move_dist: 15.0,
            cooldown_frames: 60,
            detection: VehicleFilter::default(),
        }
    }
}

impl CountingConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: CountingConfig = serde_yaml::from_str(contents)?;
        Ok(config)
    }

    pub fn lane_polygons(&self) -> Vec<LanePolygon> {
        self.lanes.iter().map(LaneDefinition::to_polygon).collect()
    }

    /// Checks that do not depend on the video being processed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.canonical_resolution.validate()?;
        if !self.min_move_dist.is_finite() || self.min_move_dist < 0.0 {
            return Err(ConfigError::InvalidMoveDistance(self.min_move_dist));
        }
        Ok(())
    }
}

/// Properties of the video source the tracks come from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub resolution: Resolution,
    pub fps: f64,
}

impl VideoInfo {
    pub fn new(width: u32, height: u32, fps: f64) -> Self {
        Self {
            resolution: Resolution::new(width, height),
            fps,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(ConfigError::InvalidFrameRate(self.fps));
        }
        self.resolution.validate()
    }
}
