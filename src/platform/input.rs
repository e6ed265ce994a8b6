//! Keyboard input
//!
//! Movement keys are level-triggered (held state). Start, fire and pause are
//! edge-triggered: latched on key-down and consumed by the next tick.

use crate::sim::TickInput;

/// A game action bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Start,
    Fire,
    Pause,
}

impl Action {
    /// Map a DOM `KeyboardEvent.code` to an action
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Action::MoveLeft),
            "ArrowRight" => Some(Action::MoveRight),
            "Space" => Some(Action::Fire),
            "Enter" | "NumpadEnter" => Some(Action::Start),
            "KeyP" | "Escape" => Some(Action::Pause),
            _ => None,
        }
    }
}

/// Accumulated keyboard state between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    start: bool,
    fire: bool,
    pause: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns true if the code is bound.
    pub fn key_down(&mut self, code: &str) -> bool {
        let Some(action) = Action::from_code(code) else {
            return false;
        };
        match action {
            Action::MoveLeft => self.left = true,
            Action::MoveRight => self.right = true,
            Action::Start => self.start = true,
            Action::Fire => self.fire = true,
            Action::Pause => self.pause = true,
        }
        true
    }

    /// Record a key release. Only held movement cares.
    pub fn key_up(&mut self, code: &str) -> bool {
        match Action::from_code(code) {
            Some(Action::MoveLeft) => self.left = false,
            Some(Action::MoveRight) => self.right = false,
            Some(_) => {}
            None => return false,
        }
        true
    }

    /// Latch a pause request (window blur, tab hidden)
    pub fn request_pause(&mut self) {
        self.pause = true;
    }

    /// Release every held key (focus loss drops key-up events)
    pub fn release_all(&mut self) {
        self.left = false;
        self.right = false;
    }

    /// Snapshot for the next tick, consuming the one-shot actions
    pub fn snapshot(&mut self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            start: std::mem::take(&mut self.start),
            fire: std::mem::take(&mut self.fire),
            pause: std::mem::take(&mut self.pause),
        }
    }
}
