//! Key bindings
//!
//! Maps the host's raw key codes to logical intents. The course and the
//! turret scene share keys (`w`, space) with different meanings, so each
//! scene has its own binding set.

use std::collections::HashMap;

use glam::Vec2;

use super::RawInput;
use crate::sim::{Axis, Intent, TickInput};

/// Raw key codes as delivered by the host keyboard reader
pub mod keys {
    pub const ESCAPE: i32 = 27;
    pub const SPACE: i32 = 32;
    /// Cursor keys in the terminal key reader
    pub const UP: i32 = 259;
    pub const DOWN: i32 = 258;
    /// Cursor keys in the X11 key reader
    pub const X_UP: i32 = 134;
    pub const X_DOWN: i32 = 135;

    /// Code for a lowercase ASCII letter key
    pub const fn letter(c: char) -> i32 {
        c as i32
    }
}

/// Pod translation per key press
pub const POD_STEP: f32 = 0.1;
/// Pod rotation per key press (degrees)
pub const POD_TURN: f32 = 2.0;

/// Maps raw key codes to intents
#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    key_to_intent: HashMap<i32, Intent>,
}

impl KeyBindings {
    /// Empty bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Rolling-ball course bindings
    ///
    /// - W / Up = ForwardBoost
    /// - S / Down = BackwardBoost
    /// - Space = Jump
    /// - Escape = Quit
    pub fn course() -> Self {
        let mut bindings = Self::new();
        for code in [keys::letter('w'), keys::UP, keys::X_UP] {
            bindings.bind(code, Intent::ForwardBoost);
        }
        for code in [keys::letter('s'), keys::DOWN, keys::X_DOWN] {
            bindings.bind(code, Intent::BackwardBoost);
        }
        bindings.bind(keys::SPACE, Intent::Jump);
        bindings.bind(keys::ESCAPE, Intent::Quit);
        bindings
    }

    /// Turret scene bindings
    ///
    /// - A / D = move pod along x, W / S along y, Z / X along z
    /// - J / L = yaw pod, I / K = pitch pod
    /// - Space = Fire
    /// - Escape = Quit
    pub fn turret() -> Self {
        let mut bindings = Self::new();
        let strafe = |axis, step| Intent::Strafe { axis, step };
        let rotate = |axis, step| Intent::Rotate { axis, step };

        bindings.bind(keys::letter('a'), strafe(Axis::X, -POD_STEP));
        bindings.bind(keys::letter('d'), strafe(Axis::X, POD_STEP));
        bindings.bind(keys::letter('w'), strafe(Axis::Y, POD_STEP));
        bindings.bind(keys::letter('s'), strafe(Axis::Y, -POD_STEP));
        bindings.bind(keys::letter('z'), strafe(Axis::Z, POD_STEP));
        bindings.bind(keys::letter('x'), strafe(Axis::Z, -POD_STEP));
        bindings.bind(keys::letter('j'), rotate(Axis::Y, POD_TURN));
        bindings.bind(keys::letter('l'), rotate(Axis::Y, -POD_TURN));
        bindings.bind(keys::letter('i'), rotate(Axis::X, POD_TURN));
        bindings.bind(keys::letter('k'), rotate(Axis::X, -POD_TURN));
        bindings.bind(keys::SPACE, Intent::Fire);
        bindings.bind(keys::ESCAPE, Intent::Quit);
        bindings
    }

    /// Bind a key, replacing any previous intent for it
    pub fn bind(&mut self, code: i32, intent: Intent) {
        self.key_to_intent.insert(code, intent);
    }

    pub fn unbind(&mut self, code: i32) -> Option<Intent> {
        self.key_to_intent.remove(&code)
    }

    pub fn intent_for(&self, code: i32) -> Option<Intent> {
        self.key_to_intent.get(&code).copied()
    }

    /// Turn one raw input event into simulation input
    pub fn decode(&self, raw: &RawInput) -> TickInput {
        TickInput {
            pointer_delta: Vec2::new(raw.mouse_dx, raw.mouse_dy),
            intent: raw.key.and_then(|code| self.intent_for(code)),
        }
    }
}
