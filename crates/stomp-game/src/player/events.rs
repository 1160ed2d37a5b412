use stomp_core::EntityId;

use crate::world::{Direction, PlatformTag};

use super::PowerLevel;

/// Something that happened to the player, reported back to the game loop.
///
/// Events raised by `jump`, `fire` and `get_hit` between frames are returned
/// together with the next `update`.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// A pickup was touched and consumed
    ItemCollected { platform: EntityId, tag: PlatformTag },
    PoweredUp { from: PowerLevel, to: PowerLevel },
    InvincibilityStarted,
    InvincibilityEnded,
    BrickBroken { platform: EntityId },
    EnemyDefeated {
        enemy: EntityId,
        points: u32,
        stomped: bool,
    },
    /// Demoted to Small by a hit
    Damaged { from: PowerLevel },
    FireballThrown { direction: Direction },
    Died,
    StageCleared { bonus: u64 },
    StageAdvanced { stage: usize },
    Respawned { lives_left: u32 },
    LifeAwarded { lives_left: u32 },
    GameOver,
}
