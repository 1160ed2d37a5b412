//! Player module
//!
//! The playable character: power levels, timed status effects, the lifecycle
//! state machine, and the per-frame controller that ties them together.

mod animation;
mod contacts;
mod controller;
mod events;
mod lifecycle;
mod power;
mod status;

pub use animation::{select_animation, AnimationId};
pub use controller::{MotionFlags, PlayerController};
pub use events::PlayerEvent;
pub use lifecycle::LifecycleState;
pub use power::{DamageOutcome, PowerLevel, PowerUp};
pub use status::{StatusEffectType, StatusManager, TimedWindow};
