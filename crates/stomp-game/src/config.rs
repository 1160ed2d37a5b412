//! Player tuning and its validation

use glam::Vec2;
use serde::{Deserialize, Serialize};
use stomp_physics::{Medium, PhysicsConfig};

use crate::player::PowerLevel;

/// Errors from loading or validating a [`PlayerConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse player config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("hit-box '{name}' has invalid size {width}x{height}")]
    InvalidHitbox {
        name: &'static str,
        width: i32,
        height: i32,
    },

    #[error("crouch hit-box ({crouch}px) is taller than the standing one ({standing}px)")]
    CrouchTooTall { crouch: i32, standing: i32 },
}

/// Width and height of a hit-box, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitboxSize {
    pub width: i32,
    pub height: i32,
}

impl HitboxSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Hit-box per body shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitboxConfig {
    pub small: HitboxSize,
    pub big: HitboxSize,
    pub crouch: HitboxSize,
}

impl Default for HitboxConfig {
    fn default() -> Self {
        Self {
            small: HitboxSize::new(16, 16),
            big: HitboxSize::new(16, 32),
            crouch: HitboxSize::new(16, 22),
        }
    }
}

impl HitboxConfig {
    /// Hit-box for a power level. Crouching only changes Big and Fire.
    pub fn for_power(&self, power: PowerLevel, crouching: bool) -> HitboxSize {
        match power {
            PowerLevel::Small => self.small,
            PowerLevel::Big | PowerLevel::Fire if crouching => self.crouch,
            PowerLevel::Big | PowerLevel::Fire => self.big,
        }
    }
}

/// Player controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Top-left corner at the start of every life and stage
    pub spawn: Vec2,
    pub physics: PhysicsConfig,
    pub hitboxes: HitboxConfig,
    /// Initial upward speed of a jump on land stages
    pub jump_power: f32,
    /// Upward speed of one swim stroke on water stages
    pub swim_power: f32,
    /// Upward speed after stomping an enemy
    pub stomp_bounce: f32,
    /// Upward speed of the death hop
    pub death_launch: f32,
    /// Star window length
    pub invincibility_ms: u64,
    /// Grace window after being hit
    pub invulnerability_ms: u64,
    /// How long the throw pose is held after firing
    pub throw_pose_ms: u64,
    /// Most fireballs on screen at once
    pub bullet_limit: usize,
    /// Stage indices that use swim physics
    pub water_stages: Vec<usize>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: Vec2::new(17.0, 0.0),
            physics: PhysicsConfig::default(),
            hitboxes: HitboxConfig::default(),
            jump_power: 8.0,
            swim_power: 4.5,
            stomp_bounce: 6.0,
            death_launch: 12.0,
            invincibility_ms: 10_000,
            invulnerability_ms: 1_500,
            throw_pose_ms: 150,
            bullet_limit: 2,
            water_stages: vec![2],
        }
    }
}

impl PlayerConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every tuning value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("physics.gravity", self.physics.gravity),
            ("physics.max_fall_speed", self.physics.max_fall_speed),
            ("physics.max_water_fall_speed", self.physics.max_water_fall_speed),
            ("physics.run_speed", self.physics.run_speed),
            ("physics.run_acceleration", self.physics.run_acceleration),
            ("jump_power", self.jump_power),
            ("swim_power", self.swim_power),
            ("stomp_bounce", self.stomp_bounce),
            ("death_launch", self.death_launch),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let hitboxes = [
            ("small", self.hitboxes.small),
            ("big", self.hitboxes.big),
            ("crouch", self.hitboxes.crouch),
        ];
        for (name, size) in hitboxes {
            if size.width <= 0 || size.height <= 0 {
                return Err(ConfigError::InvalidHitbox {
                    name,
                    width: size.width,
                    height: size.height,
                });
            }
        }

        if self.hitboxes.crouch.height > self.hitboxes.big.height {
            return Err(ConfigError::CrouchTooTall {
                crouch: self.hitboxes.crouch.height,
                standing: self.hitboxes.big.height,
            });
        }

        Ok(())
    }

    /// Medium for a stage index
    pub fn medium(&self, stage: usize) -> Medium {
        if self.water_stages.contains(&stage) {
            Medium::Water
        } else {
            Medium::Air
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PlayerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.spawn, Vec2::new(17.0, 0.0));
        assert_eq!(config.invincibility_ms, 10_000);
        assert_eq!(config.invulnerability_ms, 1_500);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = PlayerConfig::from_toml_str(
            r#"
            bullet_limit = 4
            water_stages = [1, 3]

            [physics]
            run_speed = 5.0
            "#,
        )
        .unwrap();

        assert_eq!(config.bullet_limit, 4);
        assert_eq!(config.physics.run_speed, 5.0);
        assert_eq!(config.physics.gravity, 0.3);
        assert_eq!(config.medium(3), Medium::Water);
        assert_eq!(config.medium(2), Medium::Air);
    }

    #[test]
    fn test_rejects_non_positive_tuning() {
        let err = PlayerConfig::from_toml_str("[physics]\ngravity = 0.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotPositive {
                field: "physics.gravity",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_tall_crouch() {
        let mut config = PlayerConfig::default();
        config.hitboxes.crouch = HitboxSize::new(16, 40);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CrouchTooTall { .. })
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            PlayerConfig::from_toml_str("bullet_limit = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_hitbox_for_power() {
        let hitboxes = HitboxConfig::default();
        assert_eq!(hitboxes.for_power(PowerLevel::Small, true), hitboxes.small);
        assert_eq!(hitboxes.for_power(PowerLevel::Big, false), hitboxes.big);
        assert_eq!(hitboxes.for_power(PowerLevel::Fire, true), hitboxes.crouch);
    }
}
