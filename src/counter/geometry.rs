//! Scaling of canonical lane polygons to the active frame resolution.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::counter::polygon::LanePolygon;
use crate::error::ConfigError;

/// Frame dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

/// Maps points from the canonical resolution lanes are authored in to the
/// resolution of the video actually being processed.
#[derive(Debug, Clone, Copy)]
pub struct GeometryMapper {
    scale_x: f64,
    scale_y: f64,
}

impl GeometryMapper {
    pub fn new(canonical: Resolution, target: Resolution) -> Result<Self, ConfigError> {
        canonical.validate()?;
        target.validate()?;
        Ok(Self {
            scale_x: f64::from(target.width) / f64::from(canonical.width),
            scale_y: f64::from(target.height) / f64::from(canonical.height),
        })
    }

    /// `(round(x * Wt / Wc), round(y * Ht / Hc))`, or `None` when the scaled
    /// point no longer fits in `i32`.
    #[inline]
    pub fn map_point(&self, point: Point2<i32>) -> Option<Point2<i32>> {
        Some(Point2::new(
            scale_coord(point.x, self.scale_x)?,
            scale_coord(point.y, self.scale_y)?,
        ))
    }

    /// Scale every vertex, keeping lane id and vertex order.
    pub fn map_polygon(&self, polygon: &LanePolygon) -> Result<LanePolygon, ConfigError> {
        let vertices = polygon
            .vertices
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                self.map_point(v).ok_or_else(|| ConfigError::InvalidPolygon {
                    lane_id: polygon.lane_id,
                    reason: format!("vertex {i} is out of range after scaling"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LanePolygon::new(polygon.lane_id, vertices))
    }

    pub fn map_all(&self, polygons: &[LanePolygon]) -> Result<Vec<LanePolygon>, ConfigError> {
        polygons.iter().map(|p| self.map_polygon(p)).collect()
    }
}

fn scale_coord(value: i32, scale: f64) -> Option<i32> {
    let scaled = (f64::from(value) * scale).round();
    if scaled < f64::from(i32::MIN) || scaled > f64::from(i32::MAX) {
        return None;
    }
    Some(scaled as i32)
}
