//! Keyboard intent tracking
//!
//! The host's key handlers only ever write here. Jump and drop are edges that
//! the next tick consumes; they never touch velocity directly.

use serde::{Deserialize, Serialize};

use super::object::Side;

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Jump,
    Drop,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Key::Left),
            "ArrowRight" | "KeyD" => Some(Key::Right),
            "ArrowUp" | "Space" | "KeyW" => Some(Key::Jump),
            "ArrowDown" | "KeyS" => Some(Key::Drop),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputState {
    pub left_pressed: bool,
    pub right_pressed: bool,
    /// Side of the most recent left/right press; picks the idle stance
    pub last_pressed: Side,
    jump_queued: bool,
    drop_queued: bool,
    jump_held: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => {
                self.left_pressed = true;
                self.last_pressed = Side::Left;
            }
            Key::Right => {
                self.right_pressed = true;
                self.last_pressed = Side::Right;
            }
            Key::Jump => {
                // Auto-repeat keydowns while held are not new jumps
                if !self.jump_held {
                    self.jump_queued = true;
                }
                self.jump_held = true;
            }
            Key::Drop => self.drop_queued = true,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            // Releases count as the most recent side too
            Key::Left => {
                self.left_pressed = false;
                self.last_pressed = Side::Left;
            }
            Key::Right => {
                self.right_pressed = false;
                self.last_pressed = Side::Right;
            }
            Key::Jump => self.jump_held = false,
            Key::Drop => {}
        }
    }

    #[inline]
    pub fn both_pressed(&self) -> bool {
        self.left_pressed && self.right_pressed
    }

    #[inline]
    pub fn none_pressed(&self) -> bool {
        !self.left_pressed && !self.right_pressed
    }

    #[inline]
    pub fn left_only(&self) -> bool {
        self.left_pressed && !self.right_pressed
    }

    /// Consume a pending jump edge
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_queued)
    }

    /// Consume a pending drop edge
    pub fn take_drop(&mut self) -> bool {
        std::mem::take(&mut self.drop_queued)
    }

    /// Forget held keys and pending edges (restart)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
