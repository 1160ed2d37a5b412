//! Gravity and run integration

use glam::Vec2;

use crate::{Medium, PhysicsConfig};

/// Held horizontal directions for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HorizontalInput {
    pub left: bool,
    pub right: bool,
}

impl HorizontalInput {
    pub fn any(&self) -> bool {
        self.left || self.right
    }
}

/// Steering flags updated by [`PhysicsIntegrator::steer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SteerState {
    pub facing_right: bool,
    /// Pressing against the current direction of travel this frame
    pub sliding: bool,
}

impl Default for SteerState {
    fn default() -> Self {
        Self {
            facing_right: true,
            sliding: false,
        }
    }
}

/// Converts per-frame input and gravity into velocity.
///
/// Everything is in fixed per-frame increments; there is no delta time.
#[derive(Debug, Clone, Default)]
pub struct PhysicsIntegrator {
    pub config: PhysicsConfig,
}

impl PhysicsIntegrator {
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    /// Pull an airborne body down, capped at the medium's fall speed.
    /// A grounded body has no vertical velocity.
    pub fn apply_gravity(&self, velocity: &mut Vec2, grounded: bool, medium: Medium) {
        if grounded {
            velocity.y = 0.0;
            return;
        }
        velocity.y = (velocity.y + self.config.gravity).min(self.config.max_fall_speed(medium));
    }

    /// Next crouch state. A crouch can only start on the ground; in the air it
    /// is kept only while it was already held.
    pub fn crouch_state(can_crouch: bool, grounded: bool, held: bool, was_crouching: bool) -> bool {
        if !can_crouch {
            return false;
        }
        if grounded {
            held
        } else {
            held && was_crouching
        }
    }

    /// Apply run input to the horizontal velocity.
    ///
    /// `at_boundary` means the body is already past the scroll boundary: leftward
    /// input then stops it instead of accelerating.
    pub fn steer(
        &self,
        velocity_x: &mut f32,
        state: &mut SteerState,
        input: HorizontalInput,
        crouching: bool,
        at_boundary: bool,
    ) {
        let accel = self.config.run_acceleration;
        let speed = self.config.run_speed;

        if !crouching {
            if input.left {
                state.sliding = *velocity_x > 0.0;
                state.facing_right = false;
                if at_boundary {
                    *velocity_x = 0.0;
                } else {
                    *velocity_x = (*velocity_x - accel).max(-speed);
                }
            }
            if input.right {
                state.sliding = *velocity_x < 0.0;
                state.facing_right = true;
                *velocity_x = (*velocity_x + accel).min(speed);
            }
        }

        if !input.any() || crouching {
            state.sliding = false;
            *velocity_x = self.decelerate(*velocity_x);
        }
    }

    /// One step of friction toward zero, landing on exactly 0.0 instead of crossing it
    pub fn decelerate(&self, velocity_x: f32) -> f32 {
        let accel = self.config.run_acceleration;
        if velocity_x > 0.0 {
            (velocity_x - accel).max(0.0)
        } else if velocity_x < 0.0 {
            (velocity_x + accel).min(0.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RIGHT: HorizontalInput = HorizontalInput {
        left: false,
        right: true,
    };
    const LEFT: HorizontalInput = HorizontalInput {
        left: true,
        right: false,
    };
    const NONE: HorizontalInput = HorizontalInput {
        left: false,
        right: false,
    };

    #[test]
    fn test_fall_speed_never_exceeds_cap() {
        let integrator = PhysicsIntegrator::default();
        for medium in [Medium::Air, Medium::Water] {
            let cap = integrator.config.max_fall_speed(medium);
            let mut velocity = Vec2::ZERO;
            for _ in 0..200 {
                integrator.apply_gravity(&mut velocity, false, medium);
                assert!(velocity.y <= cap);
            }
            assert_eq!(velocity.y, cap);
        }
    }

    #[test]
    fn test_grounded_zeroes_vertical_velocity() {
        let integrator = PhysicsIntegrator::default();
        let mut velocity = Vec2::new(1.0, 5.0);
        integrator.apply_gravity(&mut velocity, true, Medium::Air);
        assert_eq!(velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_run_speed_is_capped() {
        let integrator = PhysicsIntegrator::default();
        let mut vx = 0.0;
        let mut state = SteerState::default();
        for _ in 0..100 {
            integrator.steer(&mut vx, &mut state, RIGHT, false, false);
            assert!(vx <= 4.0);
        }
        assert_eq!(vx, 4.0);

        for _ in 0..200 {
            integrator.steer(&mut vx, &mut state, LEFT, false, false);
            assert!(vx >= -4.0);
        }
        assert_eq!(vx, -4.0);
        assert!(!state.facing_right);
    }

    #[test]
    fn test_release_decelerates_to_exact_zero() {
        let integrator = PhysicsIntegrator::default();
        let mut state = SteerState::default();
        for start in [0.05_f32, 0.25, 1.33, -0.07, -3.9] {
            let mut vx = start;
            let sign = start.signum();
            for _ in 0..100 {
                integrator.steer(&mut vx, &mut state, NONE, false, false);
                assert!(vx == 0.0 || vx.signum() == sign);
            }
            assert_eq!(vx, 0.0);
        }
    }

    #[test]
    fn test_sliding_when_reversing() {
        let integrator = PhysicsIntegrator::default();
        let mut vx = 2.0;
        let mut state = SteerState::default();
        integrator.steer(&mut vx, &mut state, LEFT, false, false);
        assert!(state.sliding);
        assert!((vx - 1.9).abs() < 1e-6);

        integrator.steer(&mut vx, &mut state, NONE, false, false);
        assert!(!state.sliding);
    }

    #[test]
    fn test_crouch_locks_run_input() {
        let integrator = PhysicsIntegrator::default();
        let mut vx = 1.0;
        let mut state = SteerState::default();
        integrator.steer(&mut vx, &mut state, RIGHT, true, false);
        assert!((vx - 0.9).abs() < 1e-6);
        assert!(!state.sliding);
    }

    #[test]
    fn test_left_at_boundary_stops() {
        let integrator = PhysicsIntegrator::default();
        let mut vx = -2.0;
        let mut state = SteerState::default();
        integrator.steer(&mut vx, &mut state, LEFT, false, true);
        assert_eq!(vx, 0.0);
    }

    #[test]
    fn test_crouch_cannot_start_airborne() {
        assert!(PhysicsIntegrator::crouch_state(true, true, true, false));
        assert!(!PhysicsIntegrator::crouch_state(true, false, true, false));
        assert!(PhysicsIntegrator::crouch_state(true, false, true, true));
        assert!(!PhysicsIntegrator::crouch_state(true, false, false, true));
        assert!(!PhysicsIntegrator::crouch_state(false, true, true, true));
    }
}
