//! Level-triggered keyboard state
//!
//! Tracks which of the three control actions are currently held. Key events
//! route through the configured bindings; unmapped codes are ignored. There
//! is no queueing: the simulation reads held/not-held once per tick.

use crate::config::KeyBindings;

/// Current held state of the three control actions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    bindings: KeyBindings,
    turn_left: bool,
    turn_right: bool,
    thrust: bool,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            turn_left: false,
            turn_right: false,
            thrust: false,
        }
    }

    /// Update one action flag from a key event. Codes outside the bindings
    /// are ignored.
    pub fn set_key(&mut self, code: u32, pressed: bool) {
        if code == self.bindings.turn_left {
            self.turn_left = pressed;
        } else if code == self.bindings.turn_right {
            self.turn_right = pressed;
        } else if code == self.bindings.thrust {
            self.thrust = pressed;
        }
    }

    pub fn turn_left(&self) -> bool {
        self.turn_left
    }

    pub fn turn_right(&self) -> bool {
        self.turn_right
    }

    pub fn thrust(&self) -> bool {
        self.thrust
    }

    /// Turn sign for the current held state: -1 left, +1 right, 0 neither.
    /// Left wins when both are held.
    pub fn turn_direction(&self) -> f32 {
        if self.turn_left {
            -1.0
        } else if self.turn_right {
            1.0
        } else {
            0.0
        }
    }
}
