//! Stomp Audio - Named sound cues and the devices that play them
//!
//! The player controller never talks to a mixer directly. It plays, stops, and
//! polls named [`Cue`]s through the [`AudioDevice`] trait, which lets the host
//! plug in a real backend and lets tests plug in a [`CueLog`].

mod cue;
mod device;
mod log;
mod mixer;

pub use cue::Cue;
pub use device::AudioDevice;
pub use log::{CueCommand, CueLog};
pub use mixer::{CueDurations, TimedMixer};
