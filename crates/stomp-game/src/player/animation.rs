//! Animation selection
//!
//! The controller never touches sprites. It names the animation that fits the
//! current state and the renderer maps that name to frames (mirrored when the
//! player faces left).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{MotionFlags, PowerLevel};

/// Which animation the renderer should play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationId {
    Die,
    /// Fireball throw pose (Fire only)
    Throw,
    Crouch(PowerLevel),
    Swim(PowerLevel),
    Jump(PowerLevel),
    Slide(PowerLevel),
    Walk(PowerLevel),
    Idle(PowerLevel),
}

/// Pick the animation for a frame. First match wins: death, throw pose, crouch,
/// airborne (swim or jump), slide, walk, idle.
pub fn select_animation(
    power: PowerLevel,
    flags: &MotionFlags,
    dead: bool,
    swimming: bool,
    velocity: Vec2,
) -> AnimationId {
    if dead {
        return AnimationId::Die;
    }
    if flags.firing && power.can_fire() {
        return AnimationId::Throw;
    }
    if flags.crouching && power.can_crouch() {
        return AnimationId::Crouch(power);
    }

    if velocity.y != 0.0 {
        if swimming {
            AnimationId::Swim(power)
        } else {
            AnimationId::Jump(power)
        }
    } else if flags.sliding {
        AnimationId::Slide(power)
    } else if velocity.x != 0.0 {
        AnimationId::Walk(power)
    } else {
        AnimationId::Idle(power)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags() -> MotionFlags {
        MotionFlags::default()
    }

    #[test]
    fn test_death_overrides_everything() {
        let flags = MotionFlags {
            firing: true,
            crouching: true,
            ..flags()
        };
        assert_eq!(
            select_animation(PowerLevel::Fire, &flags, true, false, Vec2::new(1.0, 1.0)),
            AnimationId::Die
        );
    }

    #[test]
    fn test_throw_only_at_fire() {
        let flags = MotionFlags {
            firing: true,
            ..flags()
        };
        assert_eq!(
            select_animation(PowerLevel::Fire, &flags, false, false, Vec2::ZERO),
            AnimationId::Throw
        );
        assert_eq!(
            select_animation(PowerLevel::Big, &flags, false, false, Vec2::ZERO),
            AnimationId::Idle(PowerLevel::Big)
        );
    }

    #[test]
    fn test_crouch_beats_airborne() {
        let flags = MotionFlags {
            crouching: true,
            ..flags()
        };
        assert_eq!(
            select_animation(PowerLevel::Big, &flags, false, false, Vec2::new(0.0, 2.0)),
            AnimationId::Crouch(PowerLevel::Big)
        );
    }

    #[test]
    fn test_airborne_picks_swim_on_water() {
        let velocity = Vec2::new(3.0, -4.0);
        assert_eq!(
            select_animation(PowerLevel::Small, &flags(), false, true, velocity),
            AnimationId::Swim(PowerLevel::Small)
        );
        assert_eq!(
            select_animation(PowerLevel::Small, &flags(), false, false, velocity),
            AnimationId::Jump(PowerLevel::Small)
        );
    }

    #[test]
    fn test_ground_states() {
        let sliding = MotionFlags {
            sliding: true,
            ..flags()
        };
        assert_eq!(
            select_animation(PowerLevel::Big, &sliding, false, false, Vec2::new(1.0, 0.0)),
            AnimationId::Slide(PowerLevel::Big)
        );
        assert_eq!(
            select_animation(PowerLevel::Big, &flags(), false, false, Vec2::new(-0.1, 0.0)),
            AnimationId::Walk(PowerLevel::Big)
        );
        assert_eq!(
            select_animation(PowerLevel::Fire, &flags(), false, false, Vec2::ZERO),
            AnimationId::Idle(PowerLevel::Fire)
        );
    }
}
