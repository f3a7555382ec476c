//! Jitter suppression on tracked centroids.

use std::collections::HashMap;

use nalgebra::Point2;

use crate::counter::tracked_object::TrackId;

/// Outcome of offering a centroid to the [`MotionFilter`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// First sighting of the track id.
    First,
    /// Moved at least the threshold since the last accepted position.
    Moved { distance: f64 },
    /// Moved less than the threshold; the registered position stands.
    Stationary { distance: f64 },
}

impl Motion {
    /// Whether the object should be re-evaluated this frame.
    #[inline]
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Motion::Stationary { .. })
    }
}

/// Requires a minimum centroid displacement before a track is re-classified.
///
/// Holds the position registry: track id to last accepted centroid. Entries
/// are only written when an observation is accepted.
#[derive(Debug, Clone)]
pub struct MotionFilter {
    min_move_dist: f64,
    positions: HashMap<TrackId, Point2<f64>>,
}

impl MotionFilter {
    pub fn new(min_move_dist: f64) -> Self {
        Self {
            min_move_dist,
            positions: HashMap::new(),
        }
    }

    pub fn min_move_dist(&self) -> f64 {
        self.min_move_dist
    }

    pub fn observe(&mut self, track_id: TrackId, centroid: Point2<f64>) -> Motion {
        let Some(last) = self.positions.get_mut(&track_id) else {
            self.positions.insert(track_id, centroid);
            return Motion::First;
        };

        let distance = nalgebra::distance(last, &centroid);
        if distance < self.min_move_dist {
            return Motion::Stationary { distance };
        }

        *last = centroid;
        Motion::Moved { distance }
    }

    /// Last accepted centroid for a track id.
    pub fn position(&self, track_id: TrackId) -> Option<Point2<f64>> {
        self.positions.get(&track_id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_observation_always_accepted() {
        let mut filter = MotionFilter::new(15.0);
        assert_eq!(filter.observe(1, Point2::new(10.0, 10.0)), Motion::First);
        assert_eq!(filter.position(1), Some(Point2::new(10.0, 10.0)));
    }

    #[test]
    fn test_small_moves_do_not_update_registry() {
        let mut filter = MotionFilter::new(15.0);
        filter.observe(1, Point2::new(0.0, 0.0));

        let motion = filter.observe(1, Point2::new(9.0, 12.0 - 1e-6));
        assert!(!motion.is_accepted());
        assert_eq!(filter.position(1), Some(Point2::new(0.0, 0.0)));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let mut filter = MotionFilter::new(15.0);
        filter.observe(1, Point2::new(0.0, 0.0));

        // 9-12-15 triangle: exactly on the threshold.
        match filter.observe(1, Point2::new(9.0, 12.0)) {
            Motion::Moved { distance } => assert!((distance - 15.0).abs() < 1e-9),
            other => panic!("expected move, got {other:?}"),
        }
        assert_eq!(filter.position(1), Some(Point2::new(9.0, 12.0)));
    }

    #[test]
    fn test_drift_measured_from_last_accepted_position() {
        let mut filter = MotionFilter::new(15.0);
        filter.observe(1, Point2::new(0.0, 0.0));

        assert!(!filter.observe(1, Point2::new(10.0, 0.0)).is_accepted());
        // 16 units from the registered origin, although only 6 from the previous frame.
        assert!(filter.observe(1, Point2::new(16.0, 0.0)).is_accepted());
    }

    #[test]
    fn test_tracks_are_independent() {
        let mut filter = MotionFilter::new(15.0);
        filter.observe(1, Point2::new(0.0, 0.0));
        assert_eq!(filter.observe(2, Point2::new(1.0, 1.0)), Motion::First);
        assert_eq!(filter.len(), 2);
    }
}
