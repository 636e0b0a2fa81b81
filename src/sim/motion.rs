//! Per-frame motion of the ball and its trailing camera
//!
//! All rates are per frame. Nothing here is scaled by elapsed time, so the
//! host must step once per rendered frame at a steady rate.

use glam::Vec3;

use super::state::{ActorState, CameraState, PointerState};
use crate::settings::{CameraSettings, PhysicsSettings};
use crate::{shortest_signed_angle, smooth_toward};

/// Camera yaw and tilt from the accumulated pointer position
pub fn orient_camera(camera: &mut CameraState, pointer: PointerState, cfg: &CameraSettings) {
    camera.rot = -pointer.x * cfg.mouse_yaw;
    camera.tilt = (pointer.y * cfg.mouse_pitch - cfg.tilt_offset).min(cfg.tilt_top);
    camera.back_off = back_off(camera.tilt);
}

/// How far the camera sits behind its target for a given tilt
///
/// Steep downward tilts pull the camera further out so it does not dip
/// through the terrain.
#[inline]
pub fn back_off(tilt: f32) -> f32 {
    if tilt < -1.0 {
        5.0 - 2.5 / tilt.abs()
    } else {
        2.5
    }
}

/// Low-pass the camera position toward the ball
pub fn follow(camera: &mut CameraState, target: Vec3, smoothing: f32) {
    camera.pos = Vec3::new(
        smooth_toward(camera.pos.x, target.x, smoothing),
        smooth_toward(camera.pos.y, target.y, smoothing),
        smooth_toward(camera.pos.z, target.z, smoothing),
    );
}

/// Turn the heading a fraction of the shortest way toward `target`
pub fn steer(heading: f32, target: f32, smoothing: f32) -> f32 {
    heading + shortest_signed_angle(heading, target) * smoothing
}

/// One frame of speed decay
#[inline]
pub fn apply_drag(dr: f32, drag: f32) -> f32 {
    dr * (1.0 - drag)
}

/// Horizontal displacement for rolling speed `dr` along `heading` (degrees)
#[inline]
pub fn roll_step(dr: f32, heading: f32) -> Vec3 {
    let (sin, cos) = heading.to_radians().sin_cos();
    Vec3::new(-dr * sin, 0.0, dr * cos)
}

/// Semi-implicit Euler: velocity first, then position
pub fn fall(actor: &mut ActorState, gravity: f32) {
    actor.dy += gravity;
    actor.pos.y += actor.dy;
}

/// Advance ball and camera by one frame
pub fn integrate(
    actor: &mut ActorState,
    camera: &mut CameraState,
    pointer: PointerState,
    physics: &PhysicsSettings,
    cfg: &CameraSettings,
) {
    orient_camera(camera, pointer, cfg);
    follow(camera, actor.pos, cfg.smoothing);

    actor.heading = steer(actor.heading, camera.rot, cfg.smoothing);
    actor.dr = apply_drag(actor.dr, physics.drag);
    actor.pos += roll_step(actor.dr, actor.heading);
    fall(actor, physics.gravity);
}
