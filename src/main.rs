//! Roll Course headless entry point
//!
//! Runs the rolling-ball course and a turret volley against a recording
//! scene, with scripted input in place of a keyboard and mouse.
//!
//! Usage: `roll-course [settings.json]`

use glam::Vec3;

use roll_course::Settings;
use roll_course::platform::input::keys;
use roll_course::platform::{
    KeyBindings, RawInput, RecordingSink, ScriptedInput, run_course, run_turret,
};
use roll_course::sim::turret::BASE_OFFSET;
use roll_course::sim::{CourseState, HeightGrid, TurretState};

/// Frame cap when the settings leave it open
const DEFAULT_FRAMES: u64 = 1200;

fn main() {
    env_logger::init();
    log::info!("Roll Course (headless) starting...");

    let mut settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };
    if settings.max_frames == 0 {
        settings.max_frames = DEFAULT_FRAMES;
    }

    let terrain = HeightGrid::procedural(
        settings.seed,
        settings.terrain.size,
        settings.terrain.height,
        settings.terrain.divisions,
    );

    // Course: drift the pointer to swing the camera, boost now and then, try a jump
    let mut state = CourseState::new(settings.clone(), &terrain);
    let mut input = ScriptedInput::new((0..settings.max_frames).map(|frame| RawInput {
        mouse_dx: if frame < 120 { -0.5 } else { 0.0 },
        mouse_dy: 0.0,
        key: None,
    }));
    for frame in (60..600).step_by(20) {
        input.push_key_at(frame, keys::letter('w'));
    }
    input.push_key_at(45, keys::SPACE);

    let mut sink = RecordingSink::new();
    let summary = run_course(
        &mut state,
        &terrain,
        &KeyBindings::course(),
        &mut sink,
        &mut input,
    );
    log::info!(
        "Course: {} frames, {} scene writes, ball at ({:.2}, {:.2}, {:.2})",
        summary.frames,
        sink.calls.len(),
        state.actor.pos.x,
        state.actor.pos.y,
        state.actor.pos.z
    );

    // Turret: swing the gun onto the target, fire, sidestep, fire again
    let mut turret = TurretState::default();
    let pivot = turret.pod.translation + BASE_OFFSET;
    let to_target = turret.target - pivot;
    let yaw = to_target.x.atan2(to_target.z).to_degrees();
    let pitch = -(to_target.y.atan2(Vec3::new(to_target.x, 0.0, to_target.z).length())).to_degrees();

    let mut input = ScriptedInput::new([RawInput {
        mouse_dx: yaw,
        mouse_dy: -pitch,
        key: None,
    }]);
    input.push_key_at(1, keys::SPACE);
    for frame in 2..40 {
        input.push_key_at(frame, keys::letter('d'));
    }
    input.push_key_at(40, keys::SPACE);

    let mut sink = RecordingSink::new();
    let summary = run_turret(
        &mut turret,
        &settings.aim,
        &KeyBindings::turret(),
        &mut sink,
        &mut input,
        60,
    );
    log::info!("Turret: {} of {} shots hit", summary.hits, summary.shots);
}
