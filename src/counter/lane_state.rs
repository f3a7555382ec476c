use serde::Serialize;

use crate::counter::polygon::LaneId;

/// Lane assignment of a single track id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LaneState {
    /// Not in any lane. `since_frame` is the frame the track last left a lane,
    /// or `None` if it has never changed lanes, which lets its first transition
    /// bypass the cooldown whatever the cooldown length.
    Unassigned { since_frame: Option<u64> },
    /// Confirmed inside a lane since the given frame.
    InLane { lane_id: LaneId, since_frame: u64 },
}

impl Default for LaneState {
    fn default() -> Self {
        LaneState::Unassigned { since_frame: None }
    }
}

impl LaneState {
    #[inline]
    pub fn lane(&self) -> Option<LaneId> {
        match self {
            LaneState::Unassigned { .. } => None,
            LaneState::InLane { lane_id, .. } => Some(*lane_id),
        }
    }

    /// Frame of the last accepted change, `None` when no change was ever accepted.
    #[inline]
    pub fn last_change(&self) -> Option<u64> {
        match self {
            LaneState::Unassigned { since_frame } => *since_frame,
            LaneState::InLane { since_frame, .. } => Some(*since_frame),
        }
    }
}
