//! Contracts with the rest of the game
//!
//! The player controller reads level entities from per-frame snapshots and talks
//! to the stage manager, HUD, camera, and projectile factory through the traits
//! below. None of these calls can fail.

use serde::{Deserialize, Serialize};
use stomp_core::{EntityId, Rect};

/// What touching a platform does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformTag {
    /// Solid ground, pipes, hard blocks
    Normal,
    /// Solid, and breaks when hit from below above Small
    Brick,
    /// Mushroom: powers up to Big
    Item,
    /// Fire flower: powers up to Fire
    Flower,
    /// Starts the invincibility window
    Star,
    /// Goal pole: clears the stage
    Win,
}

impl PlatformTag {
    /// Whether the player is pushed out of it
    pub fn is_solid(self) -> bool {
        matches!(self, Self::Normal | Self::Brick)
    }
}

/// A platform or pickup in the current frame's snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub id: EntityId,
    pub rect: Rect,
    pub tag: PlatformTag,
    alive: bool,
}

impl Platform {
    pub fn new(rect: Rect, tag: PlatformTag) -> Self {
        Self {
            id: EntityId::new(),
            rect,
            tag,
            alive: true,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Remove it from play. Returns false if it was already gone.
    pub fn destroy(&mut self) -> bool {
        std::mem::replace(&mut self.alive, false)
    }
}

/// An enemy in the current frame's snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: EntityId,
    pub rect: Rect,
    /// Score awarded for defeating it
    pub point_value: u32,
    alive: bool,
}

impl Enemy {
    pub fn new(rect: Rect, point_value: u32) -> Self {
        Self {
            id: EntityId::new(),
            rect,
            point_value,
            alive: true,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Defeat it. Returns false if it was already defeated.
    pub fn die(&mut self) -> bool {
        std::mem::replace(&mut self.alive, false)
    }
}

/// Session counters that outlive a single life
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub score: u64,
    pub lives_left: u32,
    pub current_stage: usize,
}

impl Default for GameStats {
    fn default() -> Self {
        Self {
            score: 0,
            lives_left: 3,
            current_stage: 0,
        }
    }
}

/// Owns level layouts and background music
pub trait StageManager {
    /// Build the layout for a stage index and start its music
    fn load_stage(&mut self, index: usize);
    /// Rebuild the current stage from scratch (enemies and pickups respawn)
    /// and restart its music
    fn reset_current_stage(&mut self);
    fn time_limit_ms(&self) -> u64;
    fn time_elapsed_ms(&self) -> u64;
    fn play_music(&mut self);
    fn stop_music(&mut self);
}

/// Score and lives display. Notifications only; nothing is read back.
pub trait Hud {
    fn notify_score_changed(&mut self, score: u64);
    fn notify_lives_changed(&mut self, lives: u32);
}

/// The scrolling camera, as far as the player is concerned
pub trait Viewport {
    /// Whether the rect has gone past the left scroll boundary
    fn is_past_boundary(&self, rect: &Rect) -> bool;
    /// World x the player is pinned to while past the boundary
    fn boundary_x(&self) -> f32;
    /// Whether the rect has dropped below the visible screen
    fn is_below_screen(&self, rect: &Rect) -> bool;
    /// Scroll back to the start of the stage
    fn reset(&mut self);
}

/// Horizontal travel direction of a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// A live projectile. It owns its own motion; the player only keeps it until it
/// reports itself expired.
pub trait Projectile {
    fn update(&mut self, platforms: &mut [Platform], enemies: &mut [Enemy]);
    fn is_expired(&self) -> bool;
    fn rect(&self) -> Rect;
}

/// Creates projectiles at a spawn point
pub trait ProjectileSpawner {
    fn spawn(&mut self, direction: Direction, x: i32, y: i32) -> Box<dyn Projectile>;
}

/// Collaborators borrowed for the length of one controller call
pub struct FrameContext<'a> {
    pub stage: &'a mut dyn StageManager,
    pub hud: &'a mut dyn Hud,
    pub viewport: &'a mut dyn Viewport,
    pub stats: &'a mut GameStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destroy_is_idempotent() {
        let mut brick = Platform::new(Rect::new(0, 0, 16, 16), PlatformTag::Brick);
        assert!(brick.destroy());
        assert!(!brick.destroy());
        assert!(!brick.is_alive());

        let mut goomba = Enemy::new(Rect::new(0, 0, 16, 16), 100);
        assert!(goomba.die());
        assert!(!goomba.die());
    }

    #[test]
    fn test_tag_kinds() {
        assert!(PlatformTag::Brick.is_solid());
        assert!(!PlatformTag::Win.is_solid());
        assert!(!PlatformTag::Star.is_solid());
    }

    #[test]
    fn test_tag_names() {
        #[derive(Deserialize)]
        struct Tile {
            tag: PlatformTag,
        }

        let tile: Tile = toml::from_str(r#"tag = "flower""#).unwrap();
        assert_eq!(tile.tag, PlatformTag::Flower);
    }
}
