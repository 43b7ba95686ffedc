//! Input mapping
//!
//! Event handlers write into [`InputState`]; the frame driver turns it into a
//! [`TickInput`] once per frame. Unknown key identifiers never match anything.

use glam::Vec2;

use crate::sim::{MoveInput, TickInput};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` identifier. Case-sensitive, like the
    /// browser reports it.
    pub fn from_identifier(key: &str) -> Option<Self> {
        match key {
            "w" => Some(Key::W),
            "a" => Some(Key::A),
            "s" => Some(Key::S),
            "d" => Some(Key::D),
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Shared input state written by event handlers
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: [bool; 8],
    pending_clicks: Vec<Vec2>,
    restart: bool,
    pub autopilot: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false for identifiers the game ignores
    pub fn key_down(&mut self, identifier: &str) -> bool {
        self.set_key(identifier, true)
    }

    pub fn key_up(&mut self, identifier: &str) -> bool {
        self.set_key(identifier, false)
    }

    fn set_key(&mut self, identifier: &str, down: bool) -> bool {
        match Key::from_identifier(identifier) {
            Some(key) => {
                self.held[key.index()] = down;
                true
            }
            None => false,
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    /// Queue a click given in device coordinates. `origin` is the canvas's
    /// on-screen top-left corner. No bounds check.
    pub fn click(&mut self, client: Vec2, origin: Vec2) {
        self.pending_clicks.push(client - origin);
    }

    pub fn request_restart(&mut self) {
        self.restart = true;
    }

    /// Current movement: each direction is held if either of its keys is
    pub fn movement(&self) -> MoveInput {
        MoveInput {
            up: self.is_held(Key::W) || self.is_held(Key::ArrowUp),
            down: self.is_held(Key::S) || self.is_held(Key::ArrowDown),
            left: self.is_held(Key::A) || self.is_held(Key::ArrowLeft),
            right: self.is_held(Key::D) || self.is_held(Key::ArrowRight),
        }
    }

    /// Build this frame's input, consuming one-shot events (clicks, restart).
    /// Held keys persist.
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            movement: self.movement(),
            clicks: std::mem::take(&mut self.pending_clicks),
            restart: std::mem::take(&mut self.restart),
            autopilot: self.autopilot,
        }
    }
}
