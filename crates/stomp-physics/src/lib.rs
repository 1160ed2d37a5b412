//! Stomp Physics - Frame-stepped platformer physics
//!
//! Provides the sub-pixel body, gravity and run integration, and the
//! width-versus-height collision resolution used against level geometry.

mod body;
pub mod collision;
mod integrator;

pub use body::Body;
pub use collision::{BlockContact, CollisionAxis, EnemyContact};
pub use integrator::{HorizontalInput, PhysicsIntegrator, SteerState};

use serde::{Deserialize, Serialize};

/// What the character is moving through. Water stages fall slower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Medium {
    Air,
    Water,
}

/// Physics tuning, in pixels per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Added to the vertical velocity every airborne frame
    pub gravity: f32,
    /// Fall speed cap on land stages
    pub max_fall_speed: f32,
    /// Fall speed cap on water stages
    pub max_water_fall_speed: f32,
    /// Horizontal speed cap
    pub run_speed: f32,
    /// Horizontal velocity change per frame, both speeding up and slowing down
    pub run_acceleration: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.3,
            max_fall_speed: 8.0,
            max_water_fall_speed: 4.5,
            run_speed: 4.0,
            run_acceleration: 0.1,
        }
    }
}

impl PhysicsConfig {
    /// Fall speed cap for the given medium
    pub fn max_fall_speed(&self, medium: Medium) -> f32 {
        match medium {
            Medium::Air => self.max_fall_speed,
            Medium::Water => self.max_water_fall_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_config_defaults() {
        let config = PhysicsConfig::default();
        assert_eq!(config.gravity, 0.3);
        assert_eq!(config.max_fall_speed(Medium::Air), 8.0);
        assert_eq!(config.max_fall_speed(Medium::Water), 4.5);
        assert_eq!(config.run_speed, 4.0);
    }
}
