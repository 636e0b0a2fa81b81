//! Laser turret mounted on a spaceship pod
//!
//! The pod carries a laser base that yaws with the pointer, and the base
//! carries a gun that pitches with it. Firing launches a beam and measures
//! the shot against the target's world position.

use glam::{Affine3A, EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::aim::{self, AimReport, Beam, BeamFrame};
use super::state::{GameEvent, PointerState};
use super::tick::{Axis, Intent, TickInput};
use crate::consts::BEAM_RANGE;
use crate::settings::AimSettings;

/// Laser base mount point on the pod
pub const BASE_OFFSET: Vec3 = Vec3::new(0.0, 3.15, 0.0);
/// Gun pivot on the laser base
pub const GUN_OFFSET: Vec3 = Vec3::new(0.0, 0.4, -0.4);
/// Gun pitch limits (degrees)
pub const GUN_PITCH_MIN: f32 = -85.0;
pub const GUN_PITCH_MAX: f32 = 20.0;
/// Target tumble per frame about x and z (degrees)
pub const TARGET_TUMBLE: Vec3 = Vec3::new(1.5, 0.0, 2.0);

/// Position plus yaw/pitch/roll in degrees
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl Transform {
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            self.roll.to_radians(),
        )
    }

    /// Local-to-parent matrix: rotate about the local origin, then translate
    pub fn matrix(&self) -> Affine3A {
        Affine3A::from_rotation_translation(self.rotation(), self.translation)
    }

    fn translate(&mut self, axis: Axis, step: f32) {
        match axis {
            Axis::X => self.translation.x += step,
            Axis::Y => self.translation.y += step,
            Axis::Z => self.translation.z += step,
        }
    }

    fn rotate(&mut self, axis: Axis, step: f32) {
        match axis {
            Axis::X => self.pitch += step,
            Axis::Y => self.yaw += step,
            Axis::Z => self.roll += step,
        }
    }
}

/// Turret scene state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurretState {
    pub pod: Transform,
    /// Laser base yaw (degrees)
    pub base_yaw: f32,
    /// Gun pitch (degrees)
    pub gun_pitch: f32,
    pub pointer: PointerState,
    pub beam: Beam,
    /// Target world position
    pub target: Vec3,
    /// Accumulated target tumble (degrees)
    pub target_spin: Vec3,
    pub frame: u64,
}

impl Default for TurretState {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 20.0), Vec3::new(20.0, 10.0, 50.0))
    }
}

impl TurretState {
    pub fn new(pod: Vec3, target: Vec3) -> Self {
        Self {
            pod: Transform::at(pod),
            base_yaw: 0.0,
            gun_pitch: 0.0,
            pointer: PointerState::default(),
            beam: Beam::Idle,
            target,
            target_spin: Vec3::ZERO,
            frame: 0,
        }
    }

    /// Laser base local-to-world
    pub fn base_matrix(&self) -> Affine3A {
        self.pod.matrix()
            * Affine3A::from_rotation_translation(
                Quat::from_rotation_y(self.base_yaw.to_radians()),
                BASE_OFFSET,
            )
    }

    /// Gun local-to-world
    pub fn gun_matrix(&self) -> Affine3A {
        self.base_matrix()
            * Affine3A::from_rotation_translation(
                Quat::from_rotation_x(self.gun_pitch.to_radians()),
                GUN_OFFSET,
            )
    }

    /// Gun origin and unit firing direction (local +z) in world space
    pub fn muzzle(&self) -> (Vec3, Vec3) {
        let m = self.gun_matrix();
        let origin = m.transform_point3(Vec3::ZERO);
        let dir = m.transform_vector3(Vec3::Z).normalize_or_zero();
        (origin, dir)
    }

    /// Measure a shot from the current muzzle at the target
    pub fn measure_shot(&self) -> Option<AimReport> {
        let (origin, dir) = self.muzzle();
        aim::resolve_aim(origin, dir, self.target)
    }
}

/// Render write-back for one turret frame
#[derive(Debug, Clone)]
pub struct TurretFrame {
    pub pod: Transform,
    pub base_yaw: f32,
    pub gun_pitch: f32,
    pub beam: BeamFrame,
    pub target_spin: Vec3,
    pub events: Vec<GameEvent>,
    pub quit: bool,
}

/// Advance the turret scene by one frame
pub fn tick_turret(state: &mut TurretState, input: &TickInput, cfg: &AimSettings) -> TurretFrame {
    state.frame += 1;
    state.target_spin += TARGET_TUMBLE;

    state.pointer.accumulate(input.pointer_delta);
    state.base_yaw = state.pointer.x;
    state.gun_pitch = (-state.pointer.y).clamp(GUN_PITCH_MIN, GUN_PITCH_MAX);

    let beam = state.beam.advance(BEAM_RANGE);

    let mut events = Vec::new();
    let mut quit = false;
    match input.intent {
        Some(Intent::Strafe { axis, step }) => state.pod.translate(axis, step),
        Some(Intent::Rotate { axis, step }) => state.pod.rotate(axis, step),
        Some(Intent::Fire) => {
            state.beam.fire();
            let report = state.measure_shot();
            let hit = aim::is_hit(report.as_ref(), cfg);
            match &report {
                Some(r) => log::info!(
                    "Shot fired: sin_angle {:.4}, distance {:.1}, {}",
                    r.sin_angle,
                    r.distance,
                    if hit { "hit" } else { "miss" }
                ),
                None => log::warn!("Shot fired with target on the muzzle; no line to measure"),
            }
            events.push(GameEvent::ShotFired { report, hit });
        }
        Some(Intent::Quit) => {
            quit = true;
            events.push(GameEvent::Quit);
        }
        _ => {}
    }

    TurretFrame {
        pod: state.pod,
        base_yaw: state.base_yaw,
        gun_pitch: state.gun_pitch,
        beam,
        target_spin: state.target_spin,
        events,
        quit,
    }
}
