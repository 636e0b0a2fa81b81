//! Per-frame course tick
//!
//! One call per rendered frame: motion, then contacts, then the frame's input
//! intent. The returned `FrameOutput` is everything the renderer needs.

use glam::{Vec2, Vec3};

use super::collision::{self, Impact};
use super::motion;
use super::state::{CourseState, GameEvent};
use super::terrain::Terrain;
use crate::consts::ROLL_SPIN;
use crate::{NEUTRAL, Rgb};

/// World axis for pod translation and rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Logical action decoded from a key press
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Speed up along the heading
    ForwardBoost,
    /// Slow down / roll backward
    BackwardBoost,
    /// Jump, only while resting on a platform
    Jump,
    /// Translate along a world axis
    Strafe { axis: Axis, step: f32 },
    /// Rotate about an axis (degrees)
    Rotate { axis: Axis, step: f32 },
    Fire,
    Quit,
}

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer movement since the last frame
    pub pointer_delta: Vec2,
    /// At most one key intent per frame
    pub intent: Option<Intent>,
}

/// Camera placement for the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Yaw (degrees)
    pub rot: f32,
    /// Pitch (degrees)
    pub tilt: f32,
    /// Point the camera orbits
    pub target: Vec3,
    /// Distance behind the target
    pub back_off: f32,
}

/// Render write-back for one frame
#[derive(Debug, Clone)]
pub struct FrameOutput {
    pub ball_pos: Vec3,
    /// Ball yaw (degrees)
    pub ball_yaw: f32,
    /// Spin to add to the visible sphere about its local x axis (degrees)
    pub roll_spin: f32,
    /// New ball scale, when it changed
    pub ball_scale: Option<f32>,
    /// New ball color, when it changed
    pub ball_color: Option<Rgb>,
    /// New goal color, when it changed
    pub goal_color: Option<Rgb>,
    pub camera: CameraPose,
    pub events: Vec<GameEvent>,
    /// Quit requested; the host should stop its loop
    pub quit: bool,
}

/// Advance the course by one frame
pub fn tick(state: &mut CourseState, input: &TickInput, terrain: &impl Terrain) -> FrameOutput {
    state.frame += 1;
    state.pointer.accumulate(input.pointer_delta);

    let CourseState {
        settings,
        course,
        actor,
        camera,
        pointer,
        frame,
    } = state;

    motion::integrate(actor, camera, *pointer, &settings.physics, &settings.camera);

    let was_on_platform = actor.on_platform;
    let report = collision::resolve(
        actor,
        camera,
        course,
        terrain,
        &settings.physics,
        &settings.explosion,
    );

    let mut events = Vec::new();
    let mut goal_color = None;
    let mut ball_scale = None;
    let mut ball_color = None;

    if report.goal_newly_reached {
        log::info!("Goal reached at frame {}", frame);
        goal_color = collision::goal_color(&course.goal);
        events.push(GameEvent::GoalReached);
    }

    if let Some(platform) = report.landed_on {
        if !was_on_platform {
            log::debug!("Landed on platform {} at frame {}", platform, frame);
            events.push(GameEvent::Landed { platform });
        }
    }

    match report.impact {
        Some(Impact::Swelling { scale, color }) => {
            ball_scale = Some(scale);
            ball_color = Some(color);
            events.push(GameEvent::Impact { expl: scale });
        }
        Some(Impact::Reset) => {
            log::info!("Ball exploded, back to start at frame {}", frame);
            ball_scale = Some(1.0);
            ball_color = Some(NEUTRAL);
            events.push(GameEvent::Reset);
        }
        None => {}
    }

    let roll_spin = actor.dr * ROLL_SPIN;

    let mut quit = false;
    match input.intent {
        Some(Intent::ForwardBoost) => actor.dr += settings.physics.boost,
        Some(Intent::BackwardBoost) => actor.dr -= settings.physics.boost,
        Some(Intent::Jump) if actor.on_platform => {
            actor.dy += settings.physics.jump;
            events.push(GameEvent::Jumped);
        }
        Some(Intent::Quit) => {
            log::info!("Quit requested at frame {}", frame);
            quit = true;
            events.push(GameEvent::Quit);
        }
        _ => {}
    }

    FrameOutput {
        ball_pos: actor.pos,
        ball_yaw: -actor.heading,
        roll_spin,
        ball_scale,
        ball_color,
        goal_color,
        camera: CameraPose {
            rot: camera.rot,
            tilt: camera.tilt,
            target: camera.pos + Vec3::new(0.0, settings.camera.lift, 0.0),
            back_off: camera.back_off,
        },
        events,
        quit,
    }
}
