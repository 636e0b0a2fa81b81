//! Course settings and physics tuning
//!
//! Every per-frame constant of the simulation lives here so a host can swap
//! presets or load overrides from JSON. Values are per rendered frame, not per
//! second: the simulation speed follows the host's frame rate.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Course layout presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CoursePreset {
    /// Five platforms down to a pole, ground-only explosion
    #[default]
    Classic,
    /// Eight platforms up to a helix that bounces the ball back, sticky explosion
    Helix,
}

impl CoursePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoursePreset::Classic => "Classic",
            CoursePreset::Helix => "Helix",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "pole" => Some(CoursePreset::Classic),
            "helix" => Some(CoursePreset::Helix),
            _ => None,
        }
    }

    /// Landable platform centers, before terrain adjustment. First entry is the start.
    pub fn platform_layout(&self) -> Vec<[f32; 3]> {
        match self {
            CoursePreset::Classic => vec![
                [44.0, 5.0, 43.0],
                [32.0, 3.0, 28.0],
                [30.0, 2.0, 15.0],
                [15.0, 1.0, 5.0],
                [0.0, 2.0, 0.0],
            ],
            CoursePreset::Helix => vec![
                [44.0, 5.0, 43.0],
                [32.0, 3.0, 28.0],
                [30.0, 2.0, 15.0],
                [15.0, 1.0, 5.0],
                [0.0, 15.0, 0.0],
                [12.0, 3.0, -10.0],
                [-5.0, 8.0, -21.0],
                [4.0, 12.0, -23.0],
            ],
        }
    }
}

/// Ball physics (per-frame units)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Fraction of rolling speed lost each frame
    pub drag: f32,
    /// Change in vertical velocity each frame (negative is down)
    pub gravity: f32,
    pub radius: f32,
    /// Rolling speed added by a forward/backward press
    pub boost: f32,
    /// Vertical velocity added by a jump
    pub jump: f32,
    /// Spawn height above the start platform's roll height
    pub spawn_clearance: f32,
    /// Heading at spawn (degrees)
    pub start_heading: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            drag: 0.02,
            gravity: GRAVITY,
            radius: BALL_RADIUS,
            boost: BOOST,
            jump: 0.3,
            spawn_clearance: SPAWN_CLEARANCE,
            start_heading: START_HEADING,
        }
    }
}

/// Platform box dimensions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlatformSettings {
    /// Full width on both horizontal axes
    pub width: f32,
    /// Vertical thickness
    pub thickness: f32,
    /// Decorative platforms scattered by the seeded RNG (never landable)
    pub scenery_count: usize,
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            width: 8.0,
            thickness: 1.5,
            scenery_count: 0,
        }
    }
}

/// What touching the goal does to the ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GoalResponse {
    /// Only recolor the marker
    Mark,
    /// Recolor, undo this frame's roll and reverse speed scaled by `damping`
    Bounce { damping: f32 },
}

/// Goal marker placement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GoalSettings {
    pub x: f32,
    pub z: f32,
    /// Added to the ball radius for the contact box
    pub radius: f32,
    /// Marker center above the ground
    pub lift: f32,
    pub response: GoalResponse,
}

impl Default for GoalSettings {
    fn default() -> Self {
        Self {
            x: 0.0,
            z: 0.0,
            radius: 0.0,
            lift: 5.0,
            response: GoalResponse::Mark,
        }
    }
}

/// Ground impact explosion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExplosionSettings {
    /// Multiplier applied to the explosion factor each frame
    pub growth: f32,
    /// Factor above which the ball resets to the start platform
    pub limit: f32,
    /// Red channel per unit of explosion factor
    pub tint: f32,
    /// Keep exploding once started, lifting the ball by its swelling radius
    pub sticky: bool,
}

impl Default for ExplosionSettings {
    fn default() -> Self {
        Self {
            growth: 1.25,
            limit: 10.0,
            tint: 0.2,
            sticky: false,
        }
    }
}

/// Trailing camera
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraSettings {
    /// Follow and heading smoothing per frame
    pub smoothing: f32,
    pub mouse_yaw: f32,
    pub mouse_pitch: f32,
    pub tilt_offset: f32,
    pub tilt_top: f32,
    pub lift: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            smoothing: SMOOTHING,
            mouse_yaw: MOUSE_YAW,
            mouse_pitch: MOUSE_PITCH,
            tilt_offset: TILT_OFFSET,
            tilt_top: TILT_TOP,
            lift: CAMERA_LIFT,
        }
    }
}

/// Shot hit thresholds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AimSettings {
    /// Largest sine of the deviation angle still counted as a hit
    pub max_sin_angle: f32,
    /// Farthest target distance still counted as a hit
    pub max_range: f32,
}

impl Default for AimSettings {
    fn default() -> Self {
        Self {
            max_sin_angle: 0.05,
            max_range: BEAM_RANGE,
        }
    }
}

/// Procedural terrain for headless runs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainSettings {
    /// Width and depth of the square map
    pub size: f32,
    /// Peak elevation
    pub height: f32,
    /// Grid cells along each side
    pub divisions: usize,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            size: 900.0,
            height: 150.0,
            divisions: 32,
        }
    }
}

/// Complete simulation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub preset: CoursePreset,
    /// Seed for scenery placement and procedural terrain
    pub seed: u64,
    /// Frame cap for headless runs (0 = until quit)
    pub max_frames: u64,
    pub physics: PhysicsSettings,
    pub platform: PlatformSettings,
    /// Landable platform centers; first entry is the start platform
    pub platforms: Vec<[f32; 3]>,
    pub goal: GoalSettings,
    pub explosion: ExplosionSettings,
    pub camera: CameraSettings,
    pub aim: AimSettings,
    pub terrain: TerrainSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_preset(CoursePreset::Classic)
    }
}

/// Configuration loading failure
#[derive(Debug)]
pub enum SettingsError {
    /// Settings file could not be read
    Io { path: PathBuf, source: std::io::Error },
    /// Settings JSON is malformed or has wrong field types
    Parse(serde_json::Error),
    /// Settings parsed but describe an unusable course
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io { path, source } => {
                write!(f, "cannot read settings {}: {}", path.display(), source)
            }
            SettingsError::Parse(e) => write!(f, "malformed settings: {}", e),
            SettingsError::Invalid(reason) => write!(f, "invalid settings: {}", reason),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io { source, .. } => Some(source),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Only the preset field, read first so overrides land on the right base
#[derive(Deserialize, Default)]
#[serde(default)]
struct PresetOnly {
    preset: CoursePreset,
}

impl Settings {
    /// Settings for a course preset
    pub fn from_preset(preset: CoursePreset) -> Self {
        let mut settings = Self {
            preset,
            seed: 0x5eed,
            max_frames: 0,
            physics: PhysicsSettings::default(),
            platform: PlatformSettings::default(),
            platforms: preset.platform_layout(),
            goal: GoalSettings::default(),
            explosion: ExplosionSettings::default(),
            camera: CameraSettings::default(),
            aim: AimSettings::default(),
            terrain: TerrainSettings::default(),
        };

        if preset == CoursePreset::Helix {
            settings.physics.drag = 0.1;
            settings.physics.jump = 0.35;
            settings.platform.width = 10.0;
            settings.platform.scenery_count = 10;
            settings.goal.radius = 2.0;
            settings.goal.lift = 24.0;
            settings.goal.response = GoalResponse::Bounce { damping: 0.1 };
            settings.explosion = ExplosionSettings {
                growth: 2.5,
                limit: 75.0,
                tint: 0.5,
                sticky: true,
            };
            settings.terrain.height = 50.0;
        }

        settings
    }

    /// Parse settings JSON. Omitted fields take the values of the named preset.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        let PresetOnly { preset } = serde_json::from_value(overrides.clone())?;

        let mut merged = serde_json::to_value(Self::from_preset(preset))?;
        merge_json(&mut merged, overrides);
        let settings: Self = serde_json::from_value(merged)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json_str(&json)?;
        log::info!(
            "Loaded {} settings from {}",
            settings.preset.as_str(),
            path.display()
        );
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would make the course degenerate
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |reason: &str| Err(SettingsError::Invalid(reason.to_string()));

        if self.platforms.is_empty() {
            return invalid("course needs at least one platform");
        }
        if self.physics.radius <= 0.0 {
            return invalid("ball radius must be positive");
        }
        if !(0.0..1.0).contains(&self.physics.drag) {
            return invalid("drag must be in [0, 1)");
        }
        if self.platform.width <= 0.0 || self.platform.thickness <= 0.0 {
            return invalid("platform width and thickness must be positive");
        }
        if self.explosion.growth <= 1.0 {
            return invalid("explosion growth must exceed 1");
        }
        if self.explosion.limit <= 1.0 {
            return invalid("explosion limit must exceed 1");
        }
        if self.terrain.divisions == 0 {
            return invalid("terrain needs at least one division");
        }
        Ok(())
    }
}

/// Overlay `overrides` onto `base`, recursing into objects
fn merge_json(base: &mut serde_json::Value, overrides: serde_json::Value) {
    match (base, overrides) {
        (serde_json::Value::Object(base), serde_json::Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
