//! Host engine abstraction layer
//!
//! The host engine owns the window, meshes, textures and the frame clock.
//! The simulation reaches it only through:
//! - `InputSource`: one raw input event (or none) per frame
//! - `SceneSink`: fire-and-forget transform/material writes plus frame advance

pub mod headless;
pub mod input;

use glam::Vec3;

use crate::Rgb;
use crate::sim::{
    CameraPose, Course, CourseState, FrameOutput, GameEvent, Terrain, TurretFrame, TurretState,
    tick, tick_turret,
};
use crate::settings::AimSettings;

pub use headless::{RecordingSink, SceneCall, ScriptedInput};
pub use input::KeyBindings;

/// Renderer-owned objects the simulation writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    /// Ball transform (position and heading)
    Ball,
    /// Visible sphere under the ball transform (roll spin, color)
    BallShape,
    Goal,
    Platform(usize),
    Scenery(usize),
    Pod,
    LaserBase,
    LaserGun,
    /// Beam cylinder, positioned in gun space
    Beam,
    Target,
}

/// One frame of raw host input
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawInput {
    pub mouse_dx: f32,
    pub mouse_dy: f32,
    /// Key code read this frame, if any
    pub key: Option<i32>,
}

/// Host input polling
pub trait InputSource {
    fn poll_input(&mut self) -> RawInput;
}

/// Host scene write-back and frame clock
pub trait SceneSink {
    fn set_position(&mut self, entity: Entity, pos: Vec3);
    /// Absolute yaw (degrees)
    fn set_rotation_y(&mut self, entity: Entity, degrees: f32);
    /// Absolute rotation as (pitch, yaw, roll) degrees
    fn set_rotation(&mut self, entity: Entity, degrees: Vec3);
    fn set_scale(&mut self, entity: Entity, scale: Vec3);
    fn set_color(&mut self, entity: Entity, color: Rgb);
    fn place_camera(&mut self, pose: &CameraPose);
    /// Block until the next frame is due; `false` means shut down
    fn advance_frame(&mut self) -> bool;

    /// Incremental rotation (degrees)
    fn spin(&mut self, _entity: Entity, _degrees: Vec3) {}

    fn set_visible(&mut self, _entity: Entity, _visible: bool) {}
}

/// Totals for a finished run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub goal_reached: bool,
    pub landings: u32,
    pub resets: u32,
    pub jumps: u32,
    pub shots: u32,
    pub hits: u32,
    pub quit: bool,
}

impl RunSummary {
    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::GoalReached => self.goal_reached = true,
                GameEvent::Landed { .. } => self.landings += 1,
                GameEvent::Reset => self.resets += 1,
                GameEvent::Jumped => self.jumps += 1,
                GameEvent::ShotFired { hit, .. } => {
                    self.shots += 1;
                    if *hit {
                        self.hits += 1;
                    }
                }
                GameEvent::Quit => self.quit = true,
                GameEvent::Impact { .. } => {}
            }
        }
    }
}

/// Place the static course geometry once at startup
pub fn write_course_setup(sink: &mut impl SceneSink, course: &Course) {
    for (i, platform) in course.platforms.iter().enumerate() {
        sink.set_position(Entity::Platform(i), platform.center);
        sink.set_scale(
            Entity::Platform(i),
            Vec3::new(platform.width, platform.thickness, platform.width),
        );
    }
    for (i, platform) in course.scenery.iter().enumerate() {
        sink.set_position(Entity::Scenery(i), platform.center);
        sink.set_scale(
            Entity::Scenery(i),
            Vec3::new(platform.width, platform.thickness, platform.width),
        );
        if let Some(color) = platform.color {
            sink.set_color(Entity::Scenery(i), color);
        }
    }
    sink.set_position(Entity::Goal, course.goal.pos);
}

/// Forward one course frame to the renderer
pub fn write_course_frame(sink: &mut impl SceneSink, out: &FrameOutput) {
    sink.place_camera(&out.camera);
    sink.set_position(Entity::Ball, out.ball_pos);
    sink.set_rotation_y(Entity::Ball, out.ball_yaw);
    sink.spin(Entity::BallShape, Vec3::new(out.roll_spin, 0.0, 0.0));
    if let Some(scale) = out.ball_scale {
        sink.set_scale(Entity::Ball, Vec3::splat(scale));
    }
    if let Some(color) = out.ball_color {
        sink.set_color(Entity::BallShape, color);
    }
    if let Some(color) = out.goal_color {
        sink.set_color(Entity::Goal, color);
    }
}

/// Forward one turret frame to the renderer
pub fn write_turret_frame(sink: &mut impl SceneSink, state: &TurretState, out: &TurretFrame) {
    sink.set_position(Entity::Pod, out.pod.translation);
    sink.set_rotation(Entity::Pod, Vec3::new(out.pod.pitch, out.pod.yaw, out.pod.roll));
    sink.set_rotation_y(Entity::LaserBase, out.base_yaw);
    sink.set_rotation(Entity::LaserGun, Vec3::new(out.gun_pitch, 0.0, 0.0));
    sink.set_visible(Entity::Beam, out.beam.visible);
    if out.beam.visible {
        sink.set_position(Entity::Beam, Vec3::new(0.0, 0.0, out.beam.tip_offset));
    }
    sink.set_position(Entity::Target, state.target);
    sink.set_rotation(Entity::Target, out.target_spin);
}

/// Run the course until quit, host shutdown, or the frame cap
pub fn run_course(
    state: &mut CourseState,
    terrain: &impl Terrain,
    bindings: &KeyBindings,
    sink: &mut impl SceneSink,
    input: &mut impl InputSource,
) -> RunSummary {
    let max_frames = state.settings.max_frames;
    let mut summary = RunSummary::default();

    write_course_setup(sink, &state.course);

    while max_frames == 0 || summary.frames < max_frames {
        let raw = input.poll_input();
        let out = tick(state, &bindings.decode(&raw), terrain);
        write_course_frame(sink, &out);

        summary.frames += 1;
        summary.record(&out.events);

        if out.quit || !sink.advance_frame() {
            break;
        }
    }

    log::info!(
        "Course run finished after {} frames: goal {}, {} landings, {} resets",
        summary.frames,
        if summary.goal_reached { "reached" } else { "not reached" },
        summary.landings,
        summary.resets
    );
    summary
}

/// Run the turret scene until quit, host shutdown, or `max_frames` (0 = no cap)
pub fn run_turret(
    state: &mut TurretState,
    cfg: &AimSettings,
    bindings: &KeyBindings,
    sink: &mut impl SceneSink,
    input: &mut impl InputSource,
    max_frames: u64,
) -> RunSummary {
    let mut summary = RunSummary::default();

    while max_frames == 0 || summary.frames < max_frames {
        let raw = input.poll_input();
        let out = tick_turret(state, &bindings.decode(&raw), cfg);
        write_turret_frame(sink, state, &out);

        summary.frames += 1;
        summary.record(&out.events);

        if out.quit || !sink.advance_frame() {
            break;
        }
    }

    log::info!(
        "Turret run finished after {} frames: {} of {} shots hit",
        summary.frames,
        summary.hits,
        summary.shots
    );
    summary
}
