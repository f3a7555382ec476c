//! CountingPipeline for combining detection, tracking and lane counting.

use crate::counter::{CountReport, FrameReport, LaneCountingEngine};
use crate::integration::{DetectionSource, ObjectTracker, VehicleFilter};

/// Runs detection, vehicle filtering, tracking and lane counting frame by frame.
pub struct CountingPipeline<D: DetectionSource, T: ObjectTracker> {
    detector: D,
    filter: VehicleFilter,
    tracker: T,
    engine: LaneCountingEngine,
}

impl<D: DetectionSource, T: ObjectTracker> CountingPipeline<D, T> {
    pub fn new(detector: D, filter: VehicleFilter, tracker: T, engine: LaneCountingEngine) -> Self {
        Self {
            detector,
            filter,
            tracker,
            engine,
        }
    }

    /// Process the next video frame.
    ///
    /// A detection failure leaves tracker and engine untouched, so the run
    /// stays consistent with the frames processed before it.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<FrameReport, D::Error> {
        let detections = self.detector.detect(input, width, height)?;
        let vehicles = self.filter.apply(detections);
        let tracked = self.tracker.update(vehicles);
        Ok(self.engine.advance(&tracked))
    }

    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    pub fn engine(&self) -> &LaneCountingEngine {
        &self.engine
    }

    /// Stop and return the final counts.
    pub fn finish(self) -> CountReport {
        self.engine.finish()
    }
}
