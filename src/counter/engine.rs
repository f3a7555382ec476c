//! The per-frame counting loop.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::config::{CountingConfig, VideoInfo};
use crate::counter::classifier::LaneClassifier;
use crate::counter::debouncer::{Transition, TransitionDebouncer};
use crate::counter::geometry::GeometryMapper;
use crate::counter::lane_state::LaneState;
use crate::counter::motion::{Motion, MotionFilter};
use crate::counter::polygon::{LaneId, LanePolygon};
use crate::counter::tally::{CountEvent, EventRecorder, UniqueCounter};
use crate::counter::tracked_object::{TrackId, TrackedObject};
use crate::error::{ConfigError, CountingError};

/// What happened while processing one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub frame_index: u64,
    /// Tracked objects supplied for the frame.
    pub objects: usize,
    /// Objects that passed the motion filter and were classified.
    pub evaluated: usize,
    /// Objects held back by the motion filter.
    pub stationary: usize,
    /// Lane changes rejected by the cooldown.
    pub suppressed: usize,
    /// Events appended to the log during this frame.
    pub events: Vec<CountEvent>,
}

/// Final output of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountReport {
    /// Unique vehicles per lane, every configured lane included.
    pub totals: BTreeMap<LaneId, usize>,
    /// Full event log in append order.
    pub events: Vec<CountEvent>,
}

impl CountReport {
    /// `Lane {id}: {n} vehicles` for every lane, in lane order.
    pub fn summary_lines(&self) -> Vec<String> {
        self.totals
            .iter()
            .map(|(lane, count)| format!("Lane {lane}: {count} vehicles"))
            .collect()
    }

    pub fn total(&self) -> usize {
        self.totals.values().sum()
    }
}

/// Lane occupancy and unique counting for one video.
///
/// Owns every piece of per-track state, so independent engines can run side
/// by side. Each call to [`process_frame`](Self::process_frame) commits a whole
/// frame before returning.
pub struct LaneCountingEngine {
    video: VideoInfo,
    classifier: LaneClassifier,
    motion: MotionFilter,
    debouncer: TransitionDebouncer,
    counter: UniqueCounter,
    recorder: EventRecorder,
    last_frame: Option<u64>,
    frames_processed: u64,
}

impl LaneCountingEngine {
    /// Validate the configuration against the video and scale lanes to its resolution.
    pub fn new(config: &CountingConfig, video: VideoInfo) -> Result<Self, ConfigError> {
        config.validate()?;
        video.validate()?;

        let canonical = config.lane_polygons();
        for lane in &canonical {
            lane.validate()?;
        }

        let mapper = GeometryMapper::new(config.canonical_resolution, video.resolution)?;
        let classifier = LaneClassifier::new(mapper.map_all(&canonical)?)?;
        let counter = UniqueCounter::with_lanes(classifier.lane_ids());

        info!(
            "Lane counting ready: {} lanes at {}x{}, {:.2} fps, min_move_dist={}, cooldown={} frames",
            classifier.lanes().len(),
            video.resolution.width,
            video.resolution.height,
            video.fps,
            config.min_move_dist,
            config.cooldown_frames
        );

        Ok(Self {
            video,
            classifier,
            motion: MotionFilter::new(config.min_move_dist),
            debouncer: TransitionDebouncer::new(config.cooldown_frames),
            counter,
            recorder: EventRecorder::new(video.fps),
            last_frame: None,
            frames_processed: 0,
        })
    }

    /// Process every tracked object of one frame.
    ///
    /// Frame indices must be non-decreasing across calls. A frame that goes
    /// backwards is rejected before any state is touched.
    pub fn process_frame(
        &mut self,
        frame_index: u64,
        objects: &[TrackedObject],
    ) -> Result<FrameReport, CountingError> {
        if let Some(last) = self.last_frame {
            if frame_index < last {
                return Err(CountingError::FrameOutOfOrder {
                    frame: frame_index,
                    last,
                });
            }
        }
        Ok(self.run_frame(frame_index, objects))
    }

    /// Process the frame after the last one seen, starting at frame 1.
    ///
    /// Past `u64::MAX` the index stays put, which still satisfies the ordering rule.
    pub fn advance(&mut self, objects: &[TrackedObject]) -> FrameReport {
        let next = self.last_frame.map_or(1, |last| last.saturating_add(1));
        self.run_frame(next, objects)
    }

    fn run_frame(&mut self, frame_index: u64, objects: &[TrackedObject]) -> FrameReport {
        let mut report = FrameReport {
            frame_index,
            objects: objects.len(),
            ..FrameReport::default()
        };

        for object in objects {
            self.observe(object, frame_index, &mut report);
        }

        self.last_frame = Some(frame_index);
        self.frames_processed += 1;

        if !report.events.is_empty() || report.suppressed > 0 {
            debug!(
                frame = frame_index,
                objects = report.objects,
                evaluated = report.evaluated,
                stationary = report.stationary,
                suppressed = report.suppressed,
                counted = report.events.len(),
                "frame processed"
            );
        }

        report
    }

    fn observe(&mut self, object: &TrackedObject, frame_index: u64, report: &mut FrameReport) {
        let track_id = object.track_id;
        let centroid = object.centroid();

        match self.motion.observe(track_id, centroid) {
            Motion::Stationary { distance } => {
                trace!(track_id, frame = frame_index, distance, "stationary, skipped");
                report.stationary += 1;
                return;
            }
            Motion::Moved { distance } => {
                trace!(track_id, frame = frame_index, distance, "moved, re-evaluating");
            }
            Motion::First => {
                trace!(track_id, frame = frame_index, "first sighting");
            }
        }
        report.evaluated += 1;

        let candidate = self.classifier.classify(&centroid);
        let transition = self.debouncer.update(track_id, candidate, frame_index);

        match transition {
            Transition::Suppressed {
                candidate,
                frames_remaining,
            } => {
                debug!(
                    track_id,
                    frame = frame_index,
                    ?candidate,
                    frames_remaining,
                    "lane change suppressed by cooldown"
                );
                report.suppressed += 1;
            }
            Transition::Entered { from, to } => {
                debug!(track_id, frame = frame_index, ?from, to, "entered lane");
            }
            Transition::Left { from } => {
                debug!(track_id, frame = frame_index, from, "left all lanes");
            }
            Transition::Reconfirmed(lane_id) => {
                debug!(track_id, frame = frame_index, lane_id, "lane re-confirmed");
            }
            Transition::Held => {
                debug!(track_id, frame = frame_index, "still outside all lanes");
            }
        }

        let Some(lane_id) = transition.countable_lane() else {
            return;
        };

        if self.counter.insert(track_id, lane_id) {
            let event = self.recorder.record(track_id, lane_id, frame_index);
            info!(
                "Vehicle {} counted in lane {} at frame {} ({:.2}s)",
                track_id, lane_id, frame_index, event.timestamp_seconds
            );
            report.events.push(event);
        }
    }

    /// Event log so far, in append order.
    pub fn events(&self) -> &[CountEvent] {
        self.recorder.events()
    }

    /// Unique vehicles per lane so far.
    pub fn lane_counts(&self) -> BTreeMap<LaneId, usize> {
        self.counter.totals()
    }

    pub fn count_for(&self, lane_id: LaneId) -> usize {
        self.counter.count(lane_id)
    }

    pub fn lane_state(&self, track_id: TrackId) -> LaneState {
        self.debouncer.state(track_id)
    }

    /// Lane polygons scaled to the video resolution, in priority order.
    pub fn lanes(&self) -> &[LanePolygon] {
        self.classifier.lanes()
    }

    pub fn video(&self) -> &VideoInfo {
        &self.video
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    pub fn last_frame(&self) -> Option<u64> {
        self.last_frame
    }

    /// Number of distinct track ids seen so far.
    pub fn tracks_seen(&self) -> usize {
        self.motion.len()
    }

    /// Snapshot of the results without ending the run.
    pub fn report(&self) -> CountReport {
        CountReport {
            totals: self.counter.totals(),
            events: self.recorder.events().to_vec(),
        }
    }

    pub fn finish(self) -> CountReport {
        let report = CountReport {
            totals: self.counter.totals(),
            events: self.recorder.into_events(),
        };

        info!(
            "Counting finished after {} frames: {} events, {} unique lane counts",
            self.frames_processed,
            report.events.len(),
            report.total()
        );
        for line in report.summary_lines() {
            info!("  {}", line);
        }

        report
    }
}
