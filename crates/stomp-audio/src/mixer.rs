use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use stomp_core::Clock;
use tracing::debug;

use crate::cue::Cue;
use crate::device::AudioDevice;

/// Nominal lengths of the cues, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CueDurations {
    /// Death jingle; respawn waits on it
    pub die_ms: u64,
    /// Victory fanfare; the next stage waits on it
    pub stage_clear_ms: u64,
    pub game_over_ms: u64,
    /// Everything else
    pub effect_ms: u64,
}

impl Default for CueDurations {
    fn default() -> Self {
        Self {
            die_ms: 3_000,
            stage_clear_ms: 5_500,
            game_over_ms: 4_000,
            effect_ms: 400,
        }
    }
}

impl CueDurations {
    pub fn length_of(&self, cue: Cue) -> u64 {
        match cue {
            Cue::Die => self.die_ms,
            Cue::StageClear => self.stage_clear_ms,
            Cue::GameOver => self.game_over_ms,
            _ => self.effect_ms,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveCue {
    started_at: u64,
    looped: bool,
}

/// Silent mixer that tracks cue playback against a clock.
///
/// Used by headless runs: nothing is rendered, but `is_finished` answers the same
/// way a real mixer would once each cue's nominal length has elapsed.
pub struct TimedMixer {
    clock: Arc<dyn Clock>,
    durations: CueDurations,
    active: HashMap<Cue, ActiveCue>,
}

impl TimedMixer {
    pub fn new(clock: Arc<dyn Clock>, durations: CueDurations) -> Self {
        Self {
            clock,
            durations,
            active: HashMap::new(),
        }
    }

    /// Drop cues that have run out
    fn cleanup(&mut self) {
        let now = self.clock.now_ms();
        let durations = &self.durations;
        self.active.retain(|cue, a| {
            a.looped || now.saturating_sub(a.started_at) < durations.length_of(*cue)
        });
    }
}

impl AudioDevice for TimedMixer {
    fn play(&mut self, cue: Cue, looped: bool) {
        self.cleanup();
        debug!(?cue, looped, path = cue.asset_path(), "play cue");
        self.active.insert(
            cue,
            ActiveCue {
                started_at: self.clock.now_ms(),
                looped,
            },
        );
    }

    fn stop(&mut self, cue: Cue) {
        if self.active.remove(&cue).is_some() {
            debug!(?cue, "stop cue");
        }
    }

    fn stop_all(&mut self) {
        debug!(count = self.active.len(), "stop all cues");
        self.active.clear();
    }

    fn is_finished(&self, cue: Cue) -> bool {
        match self.active.get(&cue) {
            None => true,
            Some(a) if a.looped => false,
            Some(a) => {
                self.clock.now_ms().saturating_sub(a.started_at) >= self.durations.length_of(cue)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use stomp_core::ManualClock;

    use super::*;

    fn mixer() -> (Arc<ManualClock>, TimedMixer) {
        let clock = Arc::new(ManualClock::new(0));
        let mixer = TimedMixer::new(clock.clone(), CueDurations::default());
        (clock, mixer)
    }

    #[test]
    fn cue_finishes_after_its_length() {
        let (clock, mut mixer) = mixer();
        mixer.play(Cue::Die, false);
        clock.advance(2_999);
        assert!(!mixer.is_finished(Cue::Die));
        clock.advance(1);
        assert!(mixer.is_finished(Cue::Die));
    }

    #[test]
    fn looped_cue_runs_until_stopped() {
        let (clock, mut mixer) = mixer();
        mixer.play(Cue::Invincibility, true);
        clock.advance(60_000);
        mixer.cleanup();
        assert!(!mixer.is_finished(Cue::Invincibility));
        assert_eq!(mixer.active.len(), 1);

        mixer.stop(Cue::Invincibility);
        assert!(mixer.is_finished(Cue::Invincibility));
    }

    #[test]
    fn finished_cues_are_dropped_on_next_play() {
        let (clock, mut mixer) = mixer();
        mixer.play(Cue::Stomp, false);
        mixer.play(Cue::StageClear, false);
        clock.advance(500);
        mixer.play(Cue::Jump, false);
        assert!(!mixer.active.contains_key(&Cue::Stomp));
        assert_eq!(mixer.active.len(), 2);
    }
}
