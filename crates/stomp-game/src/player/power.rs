//! Power levels and the transitions between them

use serde::{Deserialize, Serialize};

/// The player's power tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum PowerLevel {
    #[default]
    Small,
    Big,
    Fire,
}

/// Power-up items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUp {
    Mushroom,
    Flower,
}

impl PowerUp {
    /// Level this item grants
    pub fn grants(self) -> PowerLevel {
        match self {
            Self::Mushroom => PowerLevel::Big,
            Self::Flower => PowerLevel::Fire,
        }
    }
}

/// What taking a hit does at a given level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Shrinks back to Small and survives
    Demoted,
    /// Already Small: the hit is fatal
    Killed,
}

impl PowerLevel {
    /// Level after collecting `item`, or `None` if the item changes nothing.
    ///
    /// Items only ever move the level up.
    pub fn after_power_up(self, item: PowerUp) -> Option<PowerLevel> {
        let target = item.grants();
        (self < target).then_some(target)
    }

    /// Any hit above Small drops straight to Small, never one tier at a time
    pub fn after_damage(self) -> DamageOutcome {
        match self {
            Self::Small => DamageOutcome::Killed,
            Self::Big | Self::Fire => DamageOutcome::Demoted,
        }
    }

    /// Only the tall forms can crouch
    pub fn can_crouch(self) -> bool {
        self > Self::Small
    }

    /// Only Fire can throw fireballs
    pub fn can_fire(self) -> bool {
        self == Self::Fire
    }

    /// Whether head-butting a brick breaks it
    pub fn breaks_bricks(self) -> bool {
        self > Self::Small
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVELS: [PowerLevel; 3] = [PowerLevel::Small, PowerLevel::Big, PowerLevel::Fire];

    #[test]
    fn test_mushroom_only_from_small() {
        assert_eq!(
            PowerLevel::Small.after_power_up(PowerUp::Mushroom),
            Some(PowerLevel::Big)
        );
        assert_eq!(PowerLevel::Big.after_power_up(PowerUp::Mushroom), None);
        assert_eq!(PowerLevel::Fire.after_power_up(PowerUp::Mushroom), None);
    }

    #[test]
    fn test_flower_below_fire() {
        assert_eq!(
            PowerLevel::Small.after_power_up(PowerUp::Flower),
            Some(PowerLevel::Fire)
        );
        assert_eq!(
            PowerLevel::Big.after_power_up(PowerUp::Flower),
            Some(PowerLevel::Fire)
        );
        assert_eq!(PowerLevel::Fire.after_power_up(PowerUp::Flower), None);
    }

    #[test]
    fn test_power_ups_never_lower_the_level() {
        for level in LEVELS {
            for item in [PowerUp::Mushroom, PowerUp::Flower] {
                if let Some(next) = level.after_power_up(item) {
                    assert!(next > level);
                }
            }
        }
    }

    #[test]
    fn test_damage() {
        assert_eq!(PowerLevel::Small.after_damage(), DamageOutcome::Killed);
        assert_eq!(PowerLevel::Big.after_damage(), DamageOutcome::Demoted);
        assert_eq!(PowerLevel::Fire.after_damage(), DamageOutcome::Demoted);
    }

    #[test]
    fn test_abilities() {
        assert!(!PowerLevel::Small.can_crouch());
        assert!(PowerLevel::Big.can_crouch());
        assert!(!PowerLevel::Big.can_fire());
        assert!(PowerLevel::Fire.can_fire());
        assert!(PowerLevel::Fire.breaks_bricks());
    }
}
