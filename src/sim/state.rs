//! Course state and core simulation types
//!
//! Everything the frame loop threads from one frame to the next lives here.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aim::AimReport;
use super::terrain::Terrain;
use crate::settings::{GoalResponse, PhysicsSettings, Settings};
use crate::{NEUTRAL, Rgb};

/// The player-controlled ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorState {
    pub pos: Vec3,
    /// Rolling speed along the heading
    pub dr: f32,
    /// Vertical velocity
    pub dy: f32,
    /// Heading about the vertical axis (degrees)
    pub heading: f32,
    /// Explosion factor; 1.0 is intact
    pub expl: f32,
    /// Resting on a platform this frame (jumping allowed)
    pub on_platform: bool,
    pub color: Rgb,
}

impl ActorState {
    /// Ball hovering above the start platform, at rest
    pub fn spawn_above(start: &Platform, physics: &PhysicsSettings) -> Self {
        Self {
            pos: start.spawn_point(physics),
            dr: 0.0,
            dy: 0.0,
            heading: physics.start_heading,
            expl: 1.0,
            on_platform: false,
            color: NEUTRAL,
        }
    }

    /// An explosion is in progress
    #[inline]
    pub fn is_exploding(&self) -> bool {
        self.expl > 1.0
    }
}

/// Trailing camera, recomputed every frame from the ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    /// Smoothed follow position
    pub pos: Vec3,
    /// Yaw (degrees)
    pub rot: f32,
    /// Pitch (degrees)
    pub tilt: f32,
    /// Distance the camera backs off from the followed point
    pub back_off: f32,
}

impl CameraState {
    pub fn at(pos: Vec3) -> Self {
        Self {
            pos,
            rot: 0.0,
            tilt: 0.0,
            back_off: 2.5,
        }
    }
}

/// Accumulated pointer position built from per-frame deltas
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    pub fn accumulate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

/// Axis-aligned box the ball can land on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub center: Vec3,
    /// Full width on both horizontal axes
    pub width: f32,
    pub thickness: f32,
    /// Material override; `None` keeps the host's texture
    pub color: Option<Rgb>,
}

impl Platform {
    pub fn new(center: Vec3, width: f32, thickness: f32) -> Self {
        Self {
            center,
            width,
            thickness,
            color: None,
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width * 0.5
    }

    /// Height of a resting ball's center on the top face
    #[inline]
    pub fn roll_height(&self, radius: f32) -> f32 {
        self.center.y + radius + self.thickness * 0.5
    }

    /// Strictly inside the footprint
    #[inline]
    pub fn covers(&self, x: f32, z: f32) -> bool {
        let half = self.half_width();
        (x - self.center.x).abs() < half && (z - self.center.z).abs() < half
    }

    /// Where the ball (re)spawns above this platform
    pub fn spawn_point(&self, physics: &PhysicsSettings) -> Vec3 {
        self.center + Vec3::new(0.0, physics.radius + physics.spawn_clearance, 0.0)
    }
}

/// Goal pole or helix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalMarker {
    pub pos: Vec3,
    pub radius: f32,
    pub response: GoalResponse,
    pub reached: bool,
}

/// Static course geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Landable platforms; order matters, index 0 is the start
    pub platforms: Vec<Platform>,
    /// Decorative platforms, drawn but never landed on
    pub scenery: Vec<Platform>,
    pub goal: GoalMarker,
}

impl Course {
    /// Lay out platforms and goal on top of the terrain
    pub fn build(settings: &Settings, terrain: &impl Terrain) -> Self {
        let on_ground = |p: &[f32; 3]| {
            Vec3::new(p[0], p[1] + terrain.height(p[0], p[2]), p[2])
        };

        let platforms: Vec<Platform> = settings
            .platforms
            .iter()
            .map(|p| Platform::new(on_ground(p), settings.platform.width, settings.platform.thickness))
            .collect();

        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let scenery = (0..settings.platform.scenery_count)
            .map(|_| {
                let p = [
                    rng.random::<f32>() * 50.0,
                    rng.random::<f32>() * 20.0,
                    rng.random::<f32>() * 100.0,
                ];
                let mut platform =
                    Platform::new(on_ground(&p), settings.platform.width, settings.platform.thickness);
                platform.color = Some([1.0, 0.7, 0.2]);
                platform
            })
            .collect();

        let goal = &settings.goal;
        let goal = GoalMarker {
            pos: Vec3::new(goal.x, terrain.height(goal.x, goal.z) + goal.lift, goal.z),
            radius: goal.radius,
            response: goal.response,
            reached: false,
        };

        Self {
            platforms,
            scenery,
            goal,
        }
    }

    /// Start platform
    ///
    /// Courses are built from validated settings, which always hold a platform.
    pub fn start(&self) -> &Platform {
        &self.platforms[0]
    }
}

/// Something that happened during a frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    GoalReached,
    /// Ball came to rest on the platform at this index
    Landed { platform: usize },
    /// Ground contact; factor before this frame's growth
    Impact { expl: f32 },
    /// Explosion finished, ball back at the start
    Reset,
    Jumped,
    /// Shot fired; `report` is `None` when the target sat on the muzzle
    ShotFired { report: Option<AimReport>, hit: bool },
    Quit,
}

/// Complete course simulation state
#[derive(Debug, Clone)]
pub struct CourseState {
    pub settings: Settings,
    pub course: Course,
    pub actor: ActorState,
    pub camera: CameraState,
    pub pointer: PointerState,
    /// Frames simulated
    pub frame: u64,
}

impl CourseState {
    /// Build the course and place the ball above the start platform
    pub fn new(settings: Settings, terrain: &impl Terrain) -> Self {
        let course = Course::build(&settings, terrain);
        let actor = ActorState::spawn_above(course.start(), &settings.physics);
        let camera = CameraState::at(actor.pos);

        log::info!(
            "{} course built: {} platforms, {} scenery, goal at ({:.1}, {:.1}, {:.1})",
            settings.preset.as_str(),
            course.platforms.len(),
            course.scenery.len(),
            course.goal.pos.x,
            course.goal.pos.y,
            course.goal.pos.z
        );

        Self {
            settings,
            course,
            actor,
            camera,
            pointer: PointerState::default(),
            frame: 0,
        }
    }
}
