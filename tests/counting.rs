use chrono::{Duration, Local, TimeZone};
use linecross::bbox::BBox;
use linecross::clock::{FixedClock, StepClock};
use linecross::config::{AppConfig, LineConfig};
use linecross::geometry::intersects;
use linecross::observation::GeometryIssue;
use linecross::{
    classifier::classify, Direction, Frame, LineCounting, LineCrossingEngine, Orientation,
    Statistics, StreamCounter, TrackedObservation,
};
use nalgebra as na;

fn obs(id: u64, x: f32, y: f32) -> TrackedObservation {
    TrackedObservation::new(id, BBox::ltrb(x - 20.0, y - 20.0, x + 20.0, y + 20.0), "car")
}

fn fixed_clock() -> FixedClock {
    FixedClock(Local.timestamp_opt(1_700_000_000, 0).unwrap())
}

fn horizontal_line_engine() -> LineCrossingEngine {
    let config = LineConfig::new([0.0, 500.0, 1280.0, 500.0], Orientation::Vertical);
    LineCrossingEngine::with_clock(&config, fixed_clock()).unwrap()
}

/// Ticks for three objects zig-zagging over the line y = 500 several times.
fn zig_zag_ticks() -> Vec<Vec<TrackedObservation>> {
    let ys = [460.0, 540.0, 470.0, 530.0, 480.0, 560.0];

    ys.iter()
        .enumerate()
        .map(|(i, &y)| {
            vec![
                obs(1, 100.0, y),
                obs(2, 400.0 + i as f32, 1000.0 - y),
                obs(3, 900.0, 300.0 + i as f32 * 10.0),
            ]
        })
        .collect()
}

#[test]
fn reference_scenarios() {
    let pt = na::Point2::new;

    assert!(intersects(
        &pt(0.0f32, 0.0),
        &pt(100.0, 100.0),
        &pt(0.0, 100.0),
        &pt(100.0, 0.0)
    ));
    assert!(!intersects(
        &pt(0.0f32, 0.0),
        &pt(40.0, 40.0),
        &pt(0.0, 100.0),
        &pt(100.0, 0.0)
    ));

    assert_eq!(
        classify(&pt(5.0f32, 10.0), &pt(5.0, 4.0), Orientation::Vertical),
        Direction::Up
    );
    assert_eq!(
        classify(&pt(5.0f32, 10.0), &pt(5.0, 10.0), Orientation::Vertical),
        Direction::Down
    );
    assert_eq!(
        classify(&pt(10.0f32, 5.0), &pt(4.0, 5.0), Orientation::Horizontal),
        Direction::Left
    );
}

#[test]
fn end_to_end_single_identity() {
    let mut engine = horizontal_line_engine();

    engine.update(&[obs(7, 640.0, 480.0)]);
    engine.update(&[obs(7, 640.0, 520.0)]);

    let stats = engine.statistics();
    assert_eq!(stats.down, 1);
    assert_eq!(stats.total, 1);
    assert_eq!(engine.events().len(), 1);
    assert_eq!(engine.events()[0].direction, Direction::Down);

    engine.update(&[obs(7, 640.0, 480.0)]);
    assert_eq!(engine.events().len(), 1);
    assert_eq!(engine.statistics(), stats);
}

#[test]
fn landing_on_line_then_bouncing_back_is_not_counted() {
    let mut engine = horizontal_line_engine();

    engine.update(&[obs(7, 640.0, 480.0)]);
    assert_eq!(engine.update(&[obs(7, 640.0, 500.0)]).crossings, 0);
    assert_eq!(engine.update(&[obs(7, 640.0, 480.0)]).crossings, 0);

    assert_eq!(engine.statistics(), Statistics::default());
    assert!(engine.events().is_empty());
}

#[test]
fn landing_on_line_then_continuing_counts_once() {
    let mut engine = horizontal_line_engine();

    engine.update(&[obs(7, 640.0, 480.0)]);
    assert_eq!(engine.update(&[obs(7, 640.0, 500.0)]).crossings, 0);
    assert_eq!(engine.total_count(), 0);

    assert_eq!(engine.update(&[obs(7, 640.0, 520.0)]).crossings, 1);

    let stats = engine.statistics();
    assert_eq!(stats.down, 1);
    assert_eq!(stats.total, 1);
    assert_eq!(engine.events()[0].centroid, na::Point2::new(640.0, 520.0));
}

#[test]
fn each_identity_counts_at_most_once() {
    let mut engine = horizontal_line_engine();

    for tick in zig_zag_ticks() {
        engine.update(&tick);
    }

    // 1 and 2 cross five times each, 3 never reaches the line
    let stats = engine.statistics();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.down, 1);
    assert_eq!(stats.up, 1);

    let ids: Vec<u64> = engine.events().iter().map(|e| e.identity).collect();
    assert_eq!(ids, [1, 2]);
}

#[test]
fn order_within_tick_does_not_matter() {
    let ticks = zig_zag_ticks();

    let mut forward = horizontal_line_engine();
    let mut backward = horizontal_line_engine();
    let mut rotated = horizontal_line_engine();

    for tick in &ticks {
        forward.update(tick);

        let mut rev = tick.clone();
        rev.reverse();
        backward.update(&rev);

        let mut rot = tick.clone();
        rot.rotate_left(1);
        rotated.update(&rot);
    }

    let content = |e: &LineCrossingEngine| {
        let mut v: Vec<_> = e
            .events()
            .iter()
            .map(|ev| (ev.identity, ev.direction, ev.centroid.x, ev.centroid.y))
            .collect();
        v.sort_by_key(|(id, ..)| *id);
        v
    };

    assert_eq!(forward.statistics(), backward.statistics());
    assert_eq!(forward.statistics(), rotated.statistics());
    assert_eq!(content(&forward), content(&backward));
    assert_eq!(content(&forward), content(&rotated));
}

#[test]
fn counters_never_decrease() {
    let mut engine = horizontal_line_engine();
    let mut last = 0;

    for (i, tick) in zig_zag_ticks().into_iter().enumerate() {
        let mut tick = tick;
        // new identities keep arriving and crossing
        tick.push(obs(100 + i as u64, 700.0, 490.0));
        tick.push(obs(99 + i as u64, 700.0, 510.0));
        engine.update(&tick);

        let total = engine.total_count();
        assert!(total >= last);
        last = total;
    }

    assert!(last > 2);
}

#[test]
fn reset_then_reuse_tokens() {
    let mut engine = horizontal_line_engine();
    for tick in zig_zag_ticks() {
        engine.update(&tick);
    }
    assert!(engine.total_count() > 0);

    engine.reset();
    assert_eq!(engine.statistics(), Statistics::default());
    assert!(engine.events().is_empty());

    // same tokens, first tick after reset is a first sighting again
    let mut ticks = zig_zag_ticks().into_iter();
    engine.update(&ticks.next().unwrap());
    assert_eq!(engine.total_count(), 0);
    engine.update(&ticks.next().unwrap());
    assert_eq!(engine.total_count(), 2);
}

#[test]
fn timestamps_come_from_injected_clock() {
    let start = Local.timestamp_opt(1_700_000_000, 0).unwrap();
    let config = LineConfig::new([0.0, 500.0, 1280.0, 500.0], Orientation::Vertical);
    let mut engine =
        LineCrossingEngine::with_clock(&config, StepClock::new(start, Duration::seconds(1)))
            .unwrap();

    engine.update(&[obs(1, 100.0, 480.0), obs(2, 200.0, 480.0)]);
    engine.update(&[obs(1, 100.0, 520.0)]);
    engine.update(&[obs(2, 200.0, 520.0)]);

    let stamps: Vec<_> = engine.events().iter().map(|e| e.timestamp).collect();
    assert_eq!(stamps, [start, start + Duration::seconds(1)]);
}

#[test]
fn stream_counter_keeps_sources_apart() {
    let mut counter: StreamCounter =
        StreamCounter::with_clock(&AppConfig::default(), fixed_clock()).unwrap();

    let frames = vec![
        Frame::new(0, vec![obs(1, 640.0, 480.0), obs(2, 100.0, 100.0)]),
        Frame::new(1, vec![obs(1, 640.0, 520.0), obs(2, 110.0, 100.0)]),
    ];

    let report = counter.update(&frames, "north");
    assert_eq!(report.crossings, 1);
    assert!(report.is_clean());

    counter.update(&frames[..1], "south");

    assert_eq!(counter.statistics("north").down, 1);
    assert_eq!(counter.statistics("south"), Statistics::default());
    assert_eq!(counter.statistics("missing"), Statistics::default());
    assert_eq!(counter.events("north").len(), 1);
    assert!(counter.events("missing").is_empty());

    assert_eq!(counter.total_unique("north"), 2);
    assert_eq!(counter.total_unique("south"), 2);
    assert_eq!(counter.total_unique("missing"), 0);

    assert_eq!(
        counter.trajectory("north", &1),
        [na::Point2::new(640.0, 480.0), na::Point2::new(640.0, 520.0)]
    );
    assert_eq!(counter.class_counts("north").get("car"), Some(&1));

    let mut sources: Vec<_> = counter.sources().collect();
    sources.sort_unstable();
    assert_eq!(sources, ["north", "south"]);
}

#[test]
fn stream_reset_keeps_unique_total() {
    let mut counter: StreamCounter = StreamCounter::new(&AppConfig::default()).unwrap();

    counter.update(
        &[
            Frame::new(0, vec![obs(1, 640.0, 480.0)]),
            Frame::new(1, vec![obs(1, 640.0, 520.0)]),
        ],
        "cam",
    );
    counter.reset("cam");

    assert_eq!(counter.statistics("cam").total, 0);
    assert!(counter.events("cam").is_empty());
    assert_eq!(counter.total_unique("cam"), 1);
}

#[test]
fn stream_reports_bad_observations() {
    let mut counter: StreamCounter = StreamCounter::new(&AppConfig::default()).unwrap();
    let inverted = TrackedObservation::new(5, BBox::ltrb(100.0, 0.0, 50.0, 10.0), "person");

    let report = counter.update(&[Frame::new(0, vec![inverted, obs(6, 1.0, 1.0)])], "cam");

    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].identity, 5);
    assert_eq!(report.warnings[0].issue, GeometryIssue::InvertedBox);
    // still counted as a seen identity, but no trajectory point
    assert_eq!(counter.total_unique("cam"), 2);
    assert!(counter.trajectory("cam", &5).is_empty());
}

#[test]
fn invalid_config_refuses_to_start() {
    let mut config = AppConfig::default();
    config.line.coordinates = vec![0.0, 0.0, 0.0, 0.0];

    assert!(StreamCounter::<u64>::new(&config).is_err());
}

#[test]
fn string_identities() {
    let config = LineConfig::new([300.0, 0.0, 300.0, 720.0], Orientation::Horizontal);
    let mut engine: LineCrossingEngine<String> = LineCrossingEngine::new(&config).unwrap();

    let at = |x: f32| {
        TrackedObservation::new(
            "track-a".to_string(),
            BBox::ltrb(x - 5.0, 100.0, x + 5.0, 110.0),
            "bus",
        )
    };

    engine.update(&[at(350.0)]);
    engine.update(&[at(250.0)]);

    assert_eq!(engine.statistics().left, 1);
    assert_eq!(engine.events()[0].identity, "track-a");
}
