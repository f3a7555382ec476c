use std::collections::{BTreeMap, BTreeSet, HashSet};

use lanecount_rs::{
    CountEvent, CountingConfig, LaneCountingEngine, LaneDefinition, LaneState, Resolution,
    TrackedObject, VideoInfo,
};

/// Two 100x100 lanes sharing the edge x = 100, declared highest id first.
fn side_by_side_config() -> CountingConfig {
    CountingConfig {
        canonical_resolution: Resolution::new(200, 100),
        lanes: vec![
            LaneDefinition {
                lane_id: 2,
                vertices: vec![[100, 0], [200, 0], [200, 100], [100, 100]],
            },
            LaneDefinition {
                lane_id: 1,
                vertices: vec![[0, 0], [100, 0], [100, 100], [0, 100]],
            },
        ],
        min_move_dist: 15.0,
        cooldown_frames: 60,
        ..CountingConfig::default()
    }
}

fn side_by_side_engine() -> LaneCountingEngine {
    LaneCountingEngine::new(&side_by_side_config(), VideoInfo::new(200, 100, 30.0)).unwrap()
}

fn reference_engine(width: u32, height: u32) -> LaneCountingEngine {
    LaneCountingEngine::new(&CountingConfig::default(), VideoInfo::new(width, height, 30.0))
        .unwrap()
}

#[test]
fn test_worked_example() {
    let mut engine = reference_engine(1280, 720);

    // Frame 10: first classification, lane 2.
    let report = engine
        .process_frame(10, &[TrackedObject::centered_at(7, 600.0, 300.0)])
        .unwrap();
    assert_eq!(report.events.len(), 1);
    let event = report.events[0];
    assert_eq!((event.track_id, event.lane_id, event.frame_index), (7, 2, 10));
    assert!((event.timestamp_seconds - 0.33).abs() < 1e-12);

    // Frame 40: lane 3 only 30 frames after the last change.
    let report = engine
        .process_frame(40, &[TrackedObject::centered_at(7, 1000.0, 300.0)])
        .unwrap();
    assert!(report.events.is_empty());
    assert_eq!(report.suppressed, 1);
    assert_eq!(engine.lane_state(7).lane(), Some(2));

    // Frame 90: lane 3 again, 80 frames after the last change.
    let report = engine
        .process_frame(90, &[TrackedObject::centered_at(7, 1000.0, 350.0)])
        .unwrap();
    assert_eq!(report.events.len(), 1);
    let event = report.events[0];
    assert_eq!((event.track_id, event.lane_id, event.frame_index), (7, 3, 90));
    assert!((event.timestamp_seconds - 3.0).abs() < 1e-12);

    assert_eq!(
        engine.lane_state(7),
        LaneState::InLane {
            lane_id: 3,
            since_frame: 90
        }
    );
    let report = engine.finish();
    assert_eq!(report.totals, BTreeMap::from([(1, 0), (2, 1), (3, 1)]));
}

#[test]
fn test_shared_edge_goes_to_lane_one() {
    let mut engine = side_by_side_engine();
    let report = engine
        .process_frame(1, &[TrackedObject::centered_at(1, 100.0, 50.0)])
        .unwrap();
    assert_eq!(report.events.len(), 1);
    assert_eq!(report.events[0].lane_id, 1);
}

#[test]
fn test_oscillation_is_debounced() {
    let mut engine = side_by_side_engine();
    let lane_one = TrackedObject::centered_at(1, 50.0, 50.0);
    let lane_two = TrackedObject::centered_at(1, 150.0, 50.0);
    let at = |frame: u64| if frame % 2 == 1 { lane_one } else { lane_two };

    for frame in 1..=59 {
        engine.process_frame(frame, &[at(frame)]).unwrap();
    }
    assert_eq!(engine.events().len(), 1);
    assert_eq!(engine.events()[0].lane_id, 1);

    let mut second = None;
    for frame in 60..=120 {
        let report = engine.process_frame(frame, &[at(frame)]).unwrap();
        if !report.events.is_empty() {
            second = Some(report.events[0]);
            break;
        }
    }

    // Last accepted change was frame 1; frame 61 is lane 1 again, so the
    // first lane 2 frame at least 60 frames later is 62.
    let second = second.expect("a second transition");
    assert_eq!(second.lane_id, 2);
    assert_eq!(second.frame_index, 62);
    assert_eq!(engine.events().len(), 2);
}

#[test]
fn test_stationary_vehicle_evaluated_once() {
    let mut engine = side_by_side_engine();
    let first = engine
        .process_frame(1, &[TrackedObject::centered_at(3, 50.0, 50.0)])
        .unwrap();
    assert_eq!(first.evaluated, 1);

    let jitter = [(3.0, -2.0), (-4.0, 5.0), (6.0, 1.0), (0.0, -7.0), (-9.0, 3.0)];
    for frame in 2..=11u64 {
        let (dx, dy) = jitter[frame as usize % jitter.len()];
        let report = engine
            .process_frame(frame, &[TrackedObject::centered_at(3, 50.0 + dx, 50.0 + dy)])
            .unwrap();
        assert_eq!(report.evaluated, 0);
        assert_eq!(report.stationary, 1);
        assert!(report.events.is_empty());
    }
    assert_eq!(engine.events().len(), 1);
}

#[test]
fn test_reentering_same_lane_counts_once() {
    let mut engine = side_by_side_engine();
    let lane_one = TrackedObject::centered_at(5, 50.0, 50.0);
    let lane_two = TrackedObject::centered_at(5, 150.0, 50.0);

    engine.process_frame(1, &[lane_one]).unwrap();
    engine.process_frame(100, &[lane_two]).unwrap();
    engine.process_frame(200, &[lane_one]).unwrap();

    assert_eq!(engine.events().len(), 2);
    assert_eq!(engine.count_for(1), 1);
    assert_eq!(engine.count_for(2), 1);
    assert_eq!(engine.lane_state(5).lane(), Some(1));
}

#[test]
fn test_lanes_follow_video_resolution() {
    let mut engine = reference_engine(640, 360);
    let report = engine
        .process_frame(1, &[TrackedObject::centered_at(1, 300.0, 150.0)])
        .unwrap();
    assert_eq!(report.events[0].lane_id, 2);
}

#[test]
fn test_independent_engines_do_not_interfere() {
    let mut a = side_by_side_engine();
    let mut b = side_by_side_engine();

    a.process_frame(1, &[TrackedObject::centered_at(1, 50.0, 50.0)])
        .unwrap();
    let report = b
        .process_frame(1, &[TrackedObject::centered_at(1, 150.0, 50.0)])
        .unwrap();

    assert_eq!(report.events[0].lane_id, 2);
    assert_eq!(a.lane_counts(), BTreeMap::from([(1, 1), (2, 0)]));
    assert_eq!(b.lane_counts(), BTreeMap::from([(1, 0), (2, 1)]));
}

/// Small deterministic generator so the walk is reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn coord(&mut self, max: u64) -> f32 {
        (self.next() % max) as f32
    }
}

#[test]
fn test_event_log_holds_up_on_random_walk() {
    let mut engine = LaneCountingEngine::new(
        &CountingConfig {
            cooldown_frames: 5,
            ..CountingConfig::default()
        },
        VideoInfo::new(1280, 720, 25.0),
    )
    .unwrap();
    let mut rng = Lcg(42);

    for frame in 1..=400u64 {
        let visible = rng.next() % 12;
        let objects: Vec<TrackedObject> = (0..visible)
            .map(|i| {
                let id = (i + frame / 50) % 15;
                TrackedObject::centered_at(id, rng.coord(1400), rng.coord(800))
            })
            .collect();
        engine.process_frame(frame, &objects).unwrap();
    }

    let events: Vec<CountEvent> = engine.events().to_vec();
    assert!(!events.is_empty());

    let mut pairs = HashSet::new();
    for event in &events {
        assert!(
            pairs.insert((event.track_id, event.lane_id)),
            "track {} counted twice in lane {}",
            event.track_id,
            event.lane_id
        );
    }

    assert!(events.windows(2).all(|w| w[0].frame_index <= w[1].frame_index));

    let report = engine.finish();
    for (lane, count) in &report.totals {
        let distinct: BTreeSet<u64> = events
            .iter()
            .filter(|e| e.lane_id == *lane)
            .map(|e| e.track_id)
            .collect();
        assert_eq!(*count, distinct.len());
    }
}

#[test]
fn test_shipped_config_matches_defaults() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/lanes.yaml");
    let config = CountingConfig::load(path).unwrap();
    let defaults = CountingConfig::default();

    assert_eq!(config.lanes, defaults.lanes);
    assert_eq!(config.canonical_resolution, defaults.canonical_resolution);
    assert_eq!(config.cooldown_frames, defaults.cooldown_frames);
    assert_eq!(config.detection, defaults.detection);
}
