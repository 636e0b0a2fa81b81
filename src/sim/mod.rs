//! Frame-synchronous simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering:
//! - One step per rendered frame, per-frame constants only
//! - Seeded RNG only
//! - Ordered iteration (platform order decides landings)
//! - Ground elevation comes in through the `Terrain` trait

pub mod aim;
pub mod collision;
pub mod motion;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod turret;

pub use aim::{AimReport, Beam, BeamFrame, is_hit, resolve_aim};
pub use collision::{ContactReport, Impact, resolve};
pub use state::{
    ActorState, CameraState, Course, CourseState, GameEvent, GoalMarker, Platform, PointerState,
};
pub use terrain::{FlatTerrain, HeightGrid, Terrain};
pub use tick::{Axis, CameraPose, FrameOutput, Intent, TickInput, tick};
pub use turret::{Transform, TurretFrame, TurretState, tick_turret};
