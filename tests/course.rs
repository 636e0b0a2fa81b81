//! End-to-end course and turret scenarios

use glam::{Vec2, Vec3};

use roll_course::platform::input::keys;
use roll_course::platform::{
    Entity, KeyBindings, RawInput, RecordingSink, SceneCall, ScriptedInput, run_course,
    run_turret,
};
use roll_course::settings::{CoursePreset, Settings};
use roll_course::sim::{
    CourseState, FlatTerrain, GameEvent, Intent, TickInput, TurretState, tick,
};
use roll_course::{GOAL_REACHED, NEUTRAL};

/// One far-away platform so nothing interrupts a fall near the origin
fn open_ground() -> Settings {
    let mut settings = Settings::from_preset(CoursePreset::Classic);
    settings.platforms = vec![[1000.0, 0.0, 1000.0]];
    settings.goal.x = -1000.0;
    settings.physics.drag = 0.0;
    settings
}

#[test]
fn free_fall_matches_closed_form() {
    let mut state = CourseState::new(open_ground(), &FlatTerrain(0.0));
    state.actor.pos = Vec3::new(0.0, 100.0, 0.0);
    state.camera.pos = state.actor.pos;

    let mut frames = 0;
    let impact_frame = loop {
        frames += 1;
        let out = tick(&mut state, &TickInput::default(), &FlatTerrain(0.0));
        if out.events.iter().any(|e| matches!(e, GameEvent::Impact { .. })) {
            break frames;
        }
        assert!(frames < 1000, "ball never reached the ground");
    };

    // y_n = 100 - 0.005 n (n + 1) first drops below the radius at n = 141
    assert_eq!(impact_frame, 141);
    let continuous = (2.0_f32 * 99.0 / 0.01).sqrt();
    assert!((impact_frame as f32 - continuous).abs() < 1.5);
    assert!((state.actor.pos.y - 1.0).abs() < 1e-5);
    assert_eq!(state.actor.dy, 0.0);
}

#[test]
fn ball_at_roll_height_stands_on_start_platform() {
    // start platform spans x in [40, 48], z in [39, 47] at y = 5
    let mut state = CourseState::new(Settings::default(), &FlatTerrain(0.0));
    state.actor.pos = Vec3::new(44.0, 6.75, 43.0);
    state.actor.dy = 0.0;

    let out = tick(&mut state, &TickInput::default(), &FlatTerrain(0.0));

    assert!(state.actor.on_platform);
    assert_eq!(state.actor.dy, 0.0);
    assert!((state.actor.pos.y - 6.75).abs() < 1e-6);
    assert!(out.events.contains(&GameEvent::Landed { platform: 0 }));
}

#[test]
fn overlapping_platforms_land_once() {
    let mut settings = Settings::default();
    settings.platforms = vec![[0.0, 5.0, 0.0], [1.0, 5.3, 1.0]];
    let mut state = CourseState::new(settings, &FlatTerrain(0.0));
    state.actor.pos = Vec3::new(0.5, 6.6, 0.5);
    state.actor.dy = -0.05;

    let out = tick(&mut state, &TickInput::default(), &FlatTerrain(0.0));

    let landings: Vec<_> = out
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::Landed { .. }))
        .collect();
    assert_eq!(landings, vec![&GameEvent::Landed { platform: 0 }]);
    assert!((state.actor.pos.y - 6.75).abs() < 1e-6);
    assert_eq!(state.actor.dy, 0.0);
}

#[test]
fn explosion_grows_then_resets_in_one_frame() {
    let mut state = CourseState::new(open_ground(), &FlatTerrain(0.0));
    state.actor.pos = Vec3::new(-200.0, 0.5, -200.0);
    state.actor.dr = 0.2;

    let mut last_expl = 1.0;
    let mut frames = 0;
    loop {
        frames += 1;
        let out = tick(&mut state, &TickInput::default(), &FlatTerrain(0.0));
        if out.events.contains(&GameEvent::Reset) {
            assert_eq!(out.ball_scale, Some(1.0));
            assert_eq!(out.ball_color, Some(NEUTRAL));
            break;
        }
        assert!(state.actor.expl > last_expl);
        assert!(state.actor.expl <= state.settings.explosion.limit);
        last_expl = state.actor.expl;
        assert!(frames < 100);
    }

    assert_eq!(frames, 11);
    assert_eq!(state.actor.expl, 1.0);
    assert_eq!(state.actor.dr, 0.0);
    assert_eq!(state.actor.dy, 0.0);
    assert_eq!(state.actor.color, NEUTRAL);
    // back above platforms[0] with spawn clearance
    assert_eq!(state.actor.pos, Vec3::new(1000.0, 6.0, 1000.0));
    assert_eq!(state.camera.pos, state.actor.pos);
}

#[test]
fn helix_goal_bounces_ball_back() {
    let mut state = CourseState::new(Settings::from_preset(CoursePreset::Helix), &FlatTerrain(0.0));
    state.actor.pos = Vec3::new(0.0, 40.0, -3.2);
    state.actor.heading = 0.0;
    state.actor.dr = 0.5;

    let out = tick(&mut state, &TickInput::default(), &FlatTerrain(0.0));

    assert!(out.events.contains(&GameEvent::GoalReached));
    assert_eq!(out.goal_color, Some(GOAL_REACHED));
    assert!((state.actor.pos.z - (-3.2)).abs() < 1e-5);
    assert!(state.actor.dr < 0.0);
    assert!(state.course.goal.reached);

    // already reached: no second event
    let out = tick(&mut state, &TickInput::default(), &FlatTerrain(0.0));
    assert!(!out.events.contains(&GameEvent::GoalReached));
}

#[test]
fn run_course_stops_at_frame_cap() {
    let mut settings = Settings::default();
    settings.max_frames = 50;
    let mut state = CourseState::new(settings, &FlatTerrain(0.0));
    let mut sink = RecordingSink::new();
    let mut input = ScriptedInput::default();

    let summary = run_course(
        &mut state,
        &FlatTerrain(0.0),
        &KeyBindings::course(),
        &mut sink,
        &mut input,
    );

    assert_eq!(summary.frames, 50);
    assert!(!summary.quit);
    assert_eq!(
        sink.last_position(Entity::Platform(0)),
        Some(Vec3::new(44.0, 5.0, 43.0))
    );
    assert_eq!(sink.last_position(Entity::Ball), Some(state.actor.pos));
    assert!(sink.calls.iter().any(|c| matches!(c, SceneCall::Camera(_))));
}

#[test]
fn run_course_quits_on_escape() {
    let mut state = CourseState::new(Settings::default(), &FlatTerrain(0.0));
    let mut sink = RecordingSink::new();
    let mut input = ScriptedInput::default();
    input.push_key_at(9, keys::ESCAPE);

    let summary = run_course(
        &mut state,
        &FlatTerrain(0.0),
        &KeyBindings::course(),
        &mut sink,
        &mut input,
    );

    assert_eq!(summary.frames, 10);
    assert!(summary.quit);
}

#[test]
fn run_course_stops_when_host_shuts_down() {
    let mut state = CourseState::new(Settings::default(), &FlatTerrain(0.0));
    let mut sink = RecordingSink::with_frame_limit(5);
    let mut input = ScriptedInput::default();

    let summary = run_course(
        &mut state,
        &FlatTerrain(0.0),
        &KeyBindings::course(),
        &mut sink,
        &mut input,
    );

    assert_eq!(summary.frames, 5);
}

#[test]
fn turret_volley_hits_then_misses() {
    // target straight ahead of the muzzle at rest
    let mut turret = TurretState::new(Vec3::ZERO, Vec3::new(0.0, 3.55, 40.0));
    let mut input = ScriptedInput::new([RawInput::default()]);
    input.push_key_at(1, keys::SPACE);
    // sidestep 3 units along x, then fire again
    for frame in 2..32 {
        input.push_key_at(frame, keys::letter('d'));
    }
    input.push_key_at(32, keys::SPACE);

    let mut sink = RecordingSink::new();
    let summary = run_turret(
        &mut turret,
        &Settings::default().aim,
        &KeyBindings::turret(),
        &mut sink,
        &mut input,
        40,
    );

    assert_eq!(summary.shots, 2);
    assert_eq!(summary.hits, 1);
    assert!((turret.pod.translation.x - 3.0).abs() < 1e-3);
    assert!(sink
        .calls
        .iter()
        .any(|c| matches!(c, SceneCall::Visible(Entity::Beam, true))));
}

#[test]
fn pointer_steers_heading_toward_camera_yaw() {
    let mut state = CourseState::new(open_ground(), &FlatTerrain(0.0));
    state.actor.pos = Vec3::new(0.0, 50.0, 0.0);
    state.actor.heading = 350.0;
    // pointer x of -50 gives a camera yaw of +10 degrees
    let input = TickInput {
        pointer_delta: Vec2::new(-50.0, 0.0),
        ..Default::default()
    };
    tick(&mut state, &input, &FlatTerrain(0.0));
    // moved 5% of the +20 degree short way
    assert!((state.actor.heading - 351.0).abs() < 1e-3);
}

#[test]
fn spawn_heading_holds_and_forward_rolls_along_z() {
    let mut state = CourseState::new(Settings::default(), &FlatTerrain(0.0));
    let start_z = state.actor.pos.z;
    let forward = TickInput {
        intent: Some(Intent::ForwardBoost),
        ..Default::default()
    };

    tick(&mut state, &forward, &FlatTerrain(0.0));
    assert_eq!(state.actor.heading, 0.0);

    for _ in 0..60 {
        tick(&mut state, &TickInput::default(), &FlatTerrain(0.0));
        // untouched pointer: the spawn heading is already the steering target
        assert_eq!(state.actor.heading, 0.0);
    }
    assert!(state.actor.pos.z > start_z);
    assert!((state.actor.pos.x - 44.0).abs() < 1e-6);
}
