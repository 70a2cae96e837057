//! Keyboard state tracking with both edge-triggered and level-triggered queries.
//!
//! - **Level-triggered (held):** `is_held(key)` returns true every frame the key
//!   is physically down. The play scene polls its three actions this way.
//!
//! - **Edge-triggered (just_pressed / just_released):** These are true only during
//!   the frame the transition happened and are cleared by `end_frame()`, which the
//!   runner calls after the scene has consumed the frame.
//!
//! Scene actions never look at raw keys. `KeyBindings` resolves them into a
//! `ControlState` snapshot once per frame.

use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Escape,
    Space,
    F,
    A,
    D,
}

pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
    just_released: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
        }
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.held.remove(&key) {
            self.just_released.insert(key);
        }
    }

    /// Drive a key to `down`, emitting the matching edge only on change.
    pub fn set_key(&mut self, key: Key, down: bool) {
        if down {
            self.key_down(key);
        } else {
            self.key_up(key);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn is_just_released(&self, key: Key) -> bool {
        self.just_released.contains(&key)
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Instantaneous "is down" state of the three scene actions for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    pub fire: bool,
    pub left: bool,
    pub right: bool,
}

/// Key assignment for the scene actions. Defaults to F / Left / Right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_fire")]
    pub fire: Key,
    #[serde(default = "default_left")]
    pub left: Key,
    #[serde(default = "default_right")]
    pub right: Key,
}

impl KeyBindings {
    pub fn poll(&self, input: &InputState) -> ControlState {
        ControlState {
            fire: input.is_held(self.fire),
            left: input.is_held(self.left),
            right: input.is_held(self.right),
        }
    }

    /// Push a control snapshot back into raw key state (used for replays).
    pub fn apply(&self, controls: ControlState, input: &mut InputState) {
        input.set_key(self.fire, controls.fire);
        input.set_key(self.left, controls.left);
        input.set_key(self.right, controls.right);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            fire: default_fire(),
            left: default_left(),
            right: default_right(),
        }
    }
}

const fn default_fire() -> Key {
    Key::F
}

const fn default_left() -> Key {
    Key::Left
}

const fn default_right() -> Key {
    Key::Right
}
