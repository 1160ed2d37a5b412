//! Stomp Game - Player controller for a side-scrolling platformer
//!
//! Provides the player controller, its configuration, the per-frame input
//! snapshot, and the contracts it expects from the rest of the game.

pub mod config;
pub mod input;
pub mod player;
pub mod world;

pub use config::{ConfigError, HitboxConfig, HitboxSize, PlayerConfig};
pub use input::{InputAction, InputSnapshot};
pub use player::{
    select_animation, AnimationId, DamageOutcome, LifecycleState, MotionFlags, PlayerController,
    PlayerEvent, PowerLevel, PowerUp, StatusEffectType, StatusManager, TimedWindow,
};
pub use world::{
    Direction, Enemy, FrameContext, GameStats, Hud, Platform, PlatformTag, Projectile,
    ProjectileSpawner, StageManager, Viewport,
};
