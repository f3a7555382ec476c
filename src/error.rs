//! Error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::counter::LaneId;

/// Raised once, while building a counting engine, when the static
/// configuration or the video metadata cannot produce well-defined results.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("frame rate must be positive and finite, got {0}")]
    InvalidFrameRate(f64),

    #[error("resolution must be non-zero, got {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("minimum move distance must be non-negative and finite, got {0}")]
    InvalidMoveDistance(f64),

    #[error("no lanes configured")]
    NoLanes,

    #[error("lane {0} is defined more than once")]
    DuplicateLane(LaneId),

    #[error("lane {lane_id} polygon is invalid: {reason}")]
    InvalidPolygon { lane_id: LaneId, reason: String },
}

/// Raised by the counting engine for input it refuses to process.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CountingError {
    #[error("frame {frame} arrived after frame {last}; frames must be non-decreasing")]
    FrameOutOfOrder { frame: u64, last: u64 },
}

/// Raised while writing the event table or summary.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("json export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
