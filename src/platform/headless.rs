//! Headless host for scripted runs and tests
//!
//! `RecordingSink` keeps every write instead of drawing it, and
//! `ScriptedInput` replays a fixed list of raw input events.

use std::collections::VecDeque;

use glam::Vec3;

use super::{Entity, InputSource, RawInput, SceneSink};
use crate::Rgb;
use crate::sim::CameraPose;

/// One recorded scene write
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCall {
    Position(Entity, Vec3),
    RotationY(Entity, f32),
    Rotation(Entity, Vec3),
    Scale(Entity, Vec3),
    Color(Entity, Rgb),
    Camera(CameraPose),
    Spin(Entity, Vec3),
    Visible(Entity, bool),
}

/// Scene sink that records writes and stops after an optional frame limit
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub calls: Vec<SceneCall>,
    pub frames: u64,
    pub frame_limit: Option<u64>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frame_limit(limit: u64) -> Self {
        Self {
            frame_limit: Some(limit),
            ..Default::default()
        }
    }

    /// Most recent color written to `entity`
    pub fn last_color(&self, entity: Entity) -> Option<Rgb> {
        self.calls.iter().rev().find_map(|call| match call {
            SceneCall::Color(e, color) if *e == entity => Some(*color),
            _ => None,
        })
    }

    /// Most recent position written to `entity`
    pub fn last_position(&self, entity: Entity) -> Option<Vec3> {
        self.calls.iter().rev().find_map(|call| match call {
            SceneCall::Position(e, pos) if *e == entity => Some(*pos),
            _ => None,
        })
    }
}

impl SceneSink for RecordingSink {
    fn set_position(&mut self, entity: Entity, pos: Vec3) {
        self.calls.push(SceneCall::Position(entity, pos));
    }

    fn set_rotation_y(&mut self, entity: Entity, degrees: f32) {
        self.calls.push(SceneCall::RotationY(entity, degrees));
    }

    fn set_rotation(&mut self, entity: Entity, degrees: Vec3) {
        self.calls.push(SceneCall::Rotation(entity, degrees));
    }

    fn set_scale(&mut self, entity: Entity, scale: Vec3) {
        self.calls.push(SceneCall::Scale(entity, scale));
    }

    fn set_color(&mut self, entity: Entity, color: Rgb) {
        self.calls.push(SceneCall::Color(entity, color));
    }

    fn place_camera(&mut self, pose: &CameraPose) {
        self.calls.push(SceneCall::Camera(*pose));
    }

    fn advance_frame(&mut self) -> bool {
        self.frames += 1;
        self.frame_limit.is_none_or(|limit| self.frames < limit)
    }

    fn spin(&mut self, entity: Entity, degrees: Vec3) {
        self.calls.push(SceneCall::Spin(entity, degrees));
    }

    fn set_visible(&mut self, entity: Entity, visible: bool) {
        self.calls.push(SceneCall::Visible(entity, visible));
    }
}

/// Replays queued input events, then reports no input
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    queue: VecDeque<RawInput>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = RawInput>) -> Self {
        Self {
            queue: events.into_iter().collect(),
        }
    }

    /// A key press on frame `frame` (0-based), idle frames before it
    pub fn push_key_at(&mut self, frame: usize, code: i32) {
        while self.queue.len() <= frame {
            self.queue.push_back(RawInput::default());
        }
        self.queue[frame].key = Some(code);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll_input(&mut self) -> RawInput {
        self.queue.pop_front().unwrap_or_default()
    }
}
