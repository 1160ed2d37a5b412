//! Per-frame input snapshot
//!
//! Input devices are not modelled here. The host samples whatever it reads
//! keys from once per frame and hands over which logical actions are held.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use stomp_physics::HorizontalInput;

/// Logical player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Run left (A / Left by default)
    Left,
    /// Run right (D / Right by default)
    Right,
    /// Crouch (S / Down by default)
    Crouch,
    /// Jump or swim stroke (Space by default)
    Jump,
    /// Throw a fireball (F by default)
    Fire,
}

/// Which actions are held this frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: HashSet<InputAction>,
}

impl InputSnapshot {
    /// Create a snapshot with nothing held
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a snapshot with the given actions held
    pub fn holding(actions: impl IntoIterator<Item = InputAction>) -> Self {
        Self {
            held: actions.into_iter().collect(),
        }
    }

    pub fn press(&mut self, action: InputAction) {
        self.held.insert(action);
    }

    pub fn release(&mut self, action: InputAction) {
        self.held.remove(&action);
    }

    /// Check if an action is currently held
    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    /// Held now but not in the previous snapshot
    pub fn just_pressed(&self, previous: &InputSnapshot, action: InputAction) -> bool {
        self.is_held(action) && !previous.is_held(action)
    }

    /// Run directions for the physics integrator
    pub fn horizontal(&self) -> HorizontalInput {
        HorizontalInput {
            left: self.is_held(InputAction::Left),
            right: self.is_held(InputAction::Right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_just_pressed_is_an_edge() {
        let previous = InputSnapshot::new();
        let current = InputSnapshot::holding([InputAction::Jump, InputAction::Right]);

        assert!(current.just_pressed(&previous, InputAction::Jump));
        assert!(!current.just_pressed(&current, InputAction::Jump));
        assert!(!current.just_pressed(&previous, InputAction::Fire));
    }

    #[test]
    fn test_horizontal() {
        let mut input = InputSnapshot::new();
        input.press(InputAction::Left);
        assert_eq!(
            input.horizontal(),
            HorizontalInput {
                left: true,
                right: false
            }
        );
        input.release(InputAction::Left);
        assert!(!input.horizontal().any());
    }
}
