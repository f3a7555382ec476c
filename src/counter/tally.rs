//! Unique per-lane counting and the count event log.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::counter::polygon::LaneId;
use crate::counter::tracked_object::TrackId;

/// First confirmed moment a track id is counted within a lane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountEvent {
    pub track_id: TrackId,
    pub lane_id: LaneId,
    pub frame_index: u64,
    /// `frame_index / fps`, rounded to two decimals.
    pub timestamp_seconds: f64,
}

/// Seconds at `frame_index`, rounded to hundredths.
#[inline]
pub fn frame_timestamp(frame_index: u64, fps: f64) -> f64 {
    (frame_index as f64 / fps * 100.0).round() / 100.0
}

/// Per-lane sets of track ids already counted.
#[derive(Debug, Clone, Default)]
pub struct UniqueCounter {
    counted: BTreeMap<LaneId, HashSet<TrackId>>,
}

impl UniqueCounter {
    /// Counter reporting every lane in `lanes`, even those that stay empty.
    pub fn with_lanes(lanes: impl IntoIterator<Item = LaneId>) -> Self {
        Self {
            counted: lanes.into_iter().map(|id| (id, HashSet::new())).collect(),
        }
    }

    /// Returns `true` when the pair had not been counted yet.
    pub fn insert(&mut self, track_id: TrackId, lane_id: LaneId) -> bool {
        self.counted.entry(lane_id).or_default().insert(track_id)
    }

    pub fn contains(&self, track_id: TrackId, lane_id: LaneId) -> bool {
        self.counted
            .get(&lane_id)
            .is_some_and(|ids| ids.contains(&track_id))
    }

    pub fn count(&self, lane_id: LaneId) -> usize {
        self.counted.get(&lane_id).map_or(0, HashSet::len)
    }

    /// Lane id to number of distinct track ids counted there.
    pub fn totals(&self) -> BTreeMap<LaneId, usize> {
        self.counted
            .iter()
            .map(|(&lane, ids)| (lane, ids.len()))
            .collect()
    }
}

/// Append-only log of [`CountEvent`]s, ordered by non-decreasing frame index.
#[derive(Debug, Clone)]
pub struct EventRecorder {
    fps: f64,
    events: Vec<CountEvent>,
}

impl EventRecorder {
    pub fn new(fps: f64) -> Self {
        Self {
            fps,
            events: Vec::new(),
        }
    }

    pub fn record(&mut self, track_id: TrackId, lane_id: LaneId, frame_index: u64) -> CountEvent {
        debug_assert!(
            self.events
                .last()
                .is_none_or(|last| last.frame_index <= frame_index),
            "count events must be appended in frame order"
        );

        let event = CountEvent {
            track_id,
            lane_id,
            frame_index,
            timestamp_seconds: frame_timestamp(frame_index, self.fps),
        };
        self.events.push(event);
        event
    }

    pub fn events(&self) -> &[CountEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_events(self) -> Vec<CountEvent> {
        self.events
    }
}
