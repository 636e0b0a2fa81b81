//! Shot direction test and laser beam animation
//!
//! The aim test only measures how far a shot deviates from the line to the
//! target. Whether that counts as a hit is decided by `AimSettings`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{BEAM_START, BEAM_STEP, BEAM_TIP_BASE};
use crate::settings::AimSettings;

/// Deviation of a shot from the direction to its target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AimReport {
    /// Sine of the angle between shot and target direction (0 = dead on)
    pub sin_angle: f32,
    /// `target_dir × aim`; its length is `sin_angle`
    pub cross: Vec3,
    /// Distance from muzzle to target
    pub distance: f32,
    /// Target lies in front of the muzzle rather than behind it
    pub facing: bool,
}

impl AimReport {
    /// Close enough to the line, in range, and not behind the muzzle
    pub fn is_hit(&self, cfg: &AimSettings) -> bool {
        self.facing && self.sin_angle < cfg.max_sin_angle && self.distance <= cfg.max_range
    }
}

/// Measure a shot fired from `origin` along `aim` against `target`
///
/// Returns `None` when no line exists: the target sits on the muzzle, or the
/// aim direction has no length.
pub fn resolve_aim(origin: Vec3, aim: Vec3, target: Vec3) -> Option<AimReport> {
    let aim = aim.try_normalize()?;
    let to_target = target - origin;
    let distance = to_target.length();
    if distance == 0.0 {
        return None;
    }

    let dir = to_target / distance;
    let cross = dir.cross(aim);
    Some(AimReport {
        sin_angle: cross.length(),
        cross,
        distance,
        facing: dir.dot(aim) > 0.0,
    })
}

/// Shot verdict; a degenerate measurement is never a hit
pub fn is_hit(report: Option<&AimReport>, cfg: &AimSettings) -> bool {
    report.is_some_and(|r| r.is_hit(cfg))
}

/// Laser beam animation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum Beam {
    #[default]
    Idle,
    /// Beam travelling outward; `distance` grows every frame
    Firing { distance: f32 },
}

/// Beam draw state for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamFrame {
    pub visible: bool,
    /// Tip offset along the gun axis
    pub tip_offset: f32,
}

impl Beam {
    /// Start (or restart) the beam
    pub fn fire(&mut self) {
        *self = Beam::Firing {
            distance: BEAM_START,
        };
    }

    pub fn is_firing(&self) -> bool {
        matches!(self, Beam::Firing { .. })
    }

    /// Advance one frame; the beam goes idle once past `range`
    pub fn advance(&mut self, range: f32) -> BeamFrame {
        match *self {
            Beam::Idle => BeamFrame {
                visible: false,
                tip_offset: BEAM_TIP_BASE,
            },
            Beam::Firing { distance } => {
                let tip_offset = BEAM_TIP_BASE + distance;
                let next = distance + BEAM_STEP;
                if next > range {
                    *self = Beam::Idle;
                    BeamFrame {
                        visible: false,
                        tip_offset,
                    }
                } else {
                    *self = Beam::Firing { distance: next };
                    BeamFrame {
                        visible: true,
                        tip_offset,
                    }
                }
            }
        }
    }
}
