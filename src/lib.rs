//! Roll Course - rolling-ball platform course and turret aim core
//!
//! Core modules:
//! - `sim`: Per-frame simulation (motion, collisions, aim test, course state)
//! - `platform`: Host engine contract (scene write-back, input polling, key mapping)
//! - `settings`: Data-driven course and physics tuning

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{CoursePreset, Settings, SettingsError};

/// Course configuration constants (per-frame units)
pub mod consts {
    /// Gravity: change in vertical velocity each frame
    pub const GRAVITY: f32 = -0.01;
    /// Ball radius
    pub const BALL_RADIUS: f32 = 1.0;
    /// Initial heading of the ball about the vertical axis (degrees).
    /// Matches the steering target for an untouched pointer, so the ball
    /// spawns rolling along +z.
    pub const START_HEADING: f32 = 0.0;
    /// Height above the start platform at which the ball (re)spawns
    pub const SPAWN_CLEARANCE: f32 = 5.0;
    /// Speed change per forward/backward key press
    pub const BOOST: f32 = 0.1;

    /// Camera follow / heading smoothing factor per frame
    pub const SMOOTHING: f32 = 0.05;
    /// Pointer x to camera yaw (degrees per unit)
    pub const MOUSE_YAW: f32 = 0.2;
    /// Pointer y to camera tilt (degrees per unit)
    pub const MOUSE_PITCH: f32 = 0.1;
    /// Tilt offset subtracted after scaling pointer y
    pub const TILT_OFFSET: f32 = 10.0;
    /// Upper bound on camera tilt
    pub const TILT_TOP: f32 = 5.0;
    /// Camera lift above the followed point
    pub const CAMERA_LIFT: f32 = 1.0;

    /// Roll animation: degrees of spin per unit of rolling speed
    pub const ROLL_SPIN: f32 = 50.0;

    /// Laser range and beam growth per frame
    pub const BEAM_RANGE: f32 = 100.0;
    pub const BEAM_STEP: f32 = 5.0;
    /// Beam distance when fired (positive value starts it)
    pub const BEAM_START: f32 = 0.5;
    /// Beam tip offset along the gun axis
    pub const BEAM_TIP_BASE: f32 = 2.5;
}

/// RGB material color written back to the renderer
pub type Rgb = [f32; 3];

/// Neutral ball color
pub const NEUTRAL: Rgb = [0.5, 0.5, 0.5];
/// Color of a reached goal marker
pub const GOAL_REACHED: Rgb = [1.0, 0.0, 0.0];

/// Wrap an angle in degrees into (-180, 180]
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Shortest signed rotation (degrees) that takes `from` onto `to`
#[inline]
pub fn shortest_signed_angle(from: f32, to: f32) -> f32 {
    wrap_degrees(to - from)
}

/// First-order low-pass step of `current` toward `target`
#[inline]
pub fn smooth_toward(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}
