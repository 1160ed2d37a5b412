//! Stomp Core - Core types and utilities shared by the Stomp crates
//!
//! This crate provides the foundational types used throughout the game:
//! - Mathematical primitives (re-exported from glam)
//! - Integer pixel rectangles used for hit-boxes and level geometry
//! - Monotonic clocks and the fixed-timestep frame timer

pub mod time;
pub mod types;

pub use glam::Vec2;
pub use time::{Clock, FrameTimer, ManualClock, SystemClock, TimeConfig};
pub use types::{EntityId, Rect};
