//! Per-track hysteresis on lane changes.

use std::collections::HashMap;

use crate::counter::lane_state::LaneState;
use crate::counter::polygon::LaneId;
use crate::counter::tracked_object::TrackId;

/// Decision taken for one classified observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Same lane as before. State is untouched; the frame of the last change is kept.
    Reconfirmed(LaneId),
    /// Still outside every lane.
    Held,
    /// Accepted change into a lane.
    Entered { from: Option<LaneId>, to: LaneId },
    /// Accepted change out of every lane.
    Left { from: LaneId },
    /// Change rejected because the cooldown has not elapsed.
    Suppressed {
        candidate: Option<LaneId>,
        frames_remaining: u64,
    },
}

impl Transition {
    /// Lane the track should be counted in, if this decision allows counting.
    #[inline]
    pub fn countable_lane(&self) -> Option<LaneId> {
        match self {
            Transition::Reconfirmed(lane) => Some(*lane),
            Transition::Entered { to, .. } => Some(*to),
            Transition::Held | Transition::Left { .. } | Transition::Suppressed { .. } => None,
        }
    }

    #[inline]
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Transition::Suppressed { .. })
    }
}

/// Rejects lane reassignment that comes sooner than `cooldown` frames after
/// the previous accepted change of the same track id.
#[derive(Debug, Clone)]
pub struct TransitionDebouncer {
    cooldown: u64,
    states: HashMap<TrackId, LaneState>,
}

impl TransitionDebouncer {
    pub fn new(cooldown: u64) -> Self {
        Self {
            cooldown,
            states: HashMap::new(),
        }
    }

    pub fn cooldown(&self) -> u64 {
        self.cooldown
    }

    pub fn update(
        &mut self,
        track_id: TrackId,
        candidate: Option<LaneId>,
        frame_index: u64,
    ) -> Transition {
        let state = self.states.entry(track_id).or_default();
        let current = state.lane();

        if candidate == current {
            return match candidate {
                Some(lane) => Transition::Reconfirmed(lane),
                None => Transition::Held,
            };
        }

        if let Some(last_change) = state.last_change() {
            let elapsed = frame_index.saturating_sub(last_change);
            if elapsed < self.cooldown {
                return Transition::Suppressed {
                    candidate,
                    frames_remaining: self.cooldown - elapsed,
                };
            }
        }

        match (current, candidate) {
            (_, Some(to)) => {
                *state = LaneState::InLane {
                    lane_id: to,
                    since_frame: frame_index,
                };
                Transition::Entered { from: current, to }
            }
            (Some(from), None) => {
                *state = LaneState::Unassigned {
                    since_frame: Some(frame_index),
                };
                Transition::Left { from }
            }
            (None, None) => Transition::Held,
        }
    }

    /// Current state of a track id; never-seen ids are unassigned.
    pub fn state(&self, track_id: TrackId) -> LaneState {
        self.states.get(&track_id).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_transition_bypasses_cooldown() {
        let mut debouncer = TransitionDebouncer::new(u64::MAX);
        assert_eq!(
            debouncer.update(1, Some(2), 0),
            Transition::Entered { from: None, to: 2 }
        );
        assert_eq!(
            debouncer.state(1),
            LaneState::InLane {
                lane_id: 2,
                since_frame: 0
            }
        );
    }

    #[test]
    fn test_unassigned_first_sighting_is_held() {
        let mut debouncer = TransitionDebouncer::new(60);
        assert_eq!(debouncer.update(1, None, 5), Transition::Held);
        assert_eq!(debouncer.state(1), LaneState::default());
        // Still the first change, so still free of cooldown.
        assert_eq!(
            debouncer.update(1, Some(1), 6),
            Transition::Entered { from: None, to: 1 }
        );
    }

    #[test]
    fn test_change_within_cooldown_suppressed() {
        let mut debouncer = TransitionDebouncer::new(60);
        debouncer.update(7, Some(2), 10);

        assert_eq!(
            debouncer.update(7, Some(3), 40),
            Transition::Suppressed {
                candidate: Some(3),
                frames_remaining: 30
            }
        );
        assert_eq!(debouncer.state(7).lane(), Some(2));

        assert_eq!(
            debouncer.update(7, Some(3), 90),
            Transition::Entered {
                from: Some(2),
                to: 3
            }
        );
    }

    #[test]
    fn test_cooldown_boundary() {
        let mut debouncer = TransitionDebouncer::new(60);
        debouncer.update(1, Some(1), 100);
        assert!(debouncer.update(1, Some(2), 159).is_suppressed());
        assert_eq!(
            debouncer.update(1, Some(2), 160),
            Transition::Entered {
                from: Some(1),
                to: 2
            }
        );
    }

    #[test]
    fn test_reconfirmation_keeps_last_change_frame() {
        let mut debouncer = TransitionDebouncer::new(60);
        debouncer.update(1, Some(1), 10);

        assert_eq!(debouncer.update(1, Some(1), 50), Transition::Reconfirmed(1));
        assert_eq!(debouncer.state(1).last_change(), Some(10));

        // Measured from frame 10, not from the re-confirmation at 50.
        assert_eq!(
            debouncer.update(1, Some(2), 70),
            Transition::Entered {
                from: Some(1),
                to: 2
            }
        );
    }

    #[test]
    fn test_leaving_lane_is_debounced() {
        let mut debouncer = TransitionDebouncer::new(60);
        debouncer.update(1, Some(1), 0);

        assert!(debouncer.update(1, None, 30).is_suppressed());
        assert_eq!(debouncer.update(1, None, 60), Transition::Left { from: 1 });
        assert_eq!(
            debouncer.state(1),
            LaneState::Unassigned {
                since_frame: Some(60)
            }
        );

        // Re-entering is a change like any other.
        assert!(debouncer.update(1, Some(1), 61).is_suppressed());
        assert_eq!(debouncer.update(1, None, 62), Transition::Held);
    }

    #[test]
    fn test_zero_cooldown_accepts_every_change() {
        let mut debouncer = TransitionDebouncer::new(0);
        debouncer.update(1, Some(1), 1);
        assert_eq!(
            debouncer.update(1, Some(2), 1),
            Transition::Entered {
                from: Some(1),
                to: 2
            }
        );
    }

    #[test]
    fn test_countable_lane() {
        assert_eq!(Transition::Reconfirmed(4).countable_lane(), Some(4));
        assert_eq!(
            Transition::Entered { from: None, to: 2 }.countable_lane(),
            Some(2)
        );
        assert_eq!(Transition::Left { from: 2 }.countable_lane(), None);
        assert_eq!(Transition::Held.countable_lane(), None);
        assert_eq!(
            Transition::Suppressed {
                candidate: Some(1),
                frames_remaining: 3
            }
            .countable_lane(),
            None
        );
    }
}
