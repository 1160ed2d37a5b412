use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::cue::Cue;
use crate::device::AudioDevice;

/// A single call made against a [`CueLog`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueCommand {
    Play { cue: Cue, looped: bool },
    Stop(Cue),
    StopAll,
}

#[derive(Debug, Default)]
struct CueLogState {
    commands: Vec<CueCommand>,
    playing: HashSet<Cue>,
}

/// Recording audio device.
///
/// Clones share the same log, so a test can hand one clone to the code under
/// test and keep another to inspect calls and to finish cues by hand.
#[derive(Debug, Clone, Default)]
pub struct CueLog {
    state: Arc<Mutex<CueLogState>>,
}

impl CueLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a cue as done playing
    pub fn finish(&self, cue: Cue) {
        self.state.lock().playing.remove(&cue);
    }

    /// Every call made so far, oldest first
    pub fn commands(&self) -> Vec<CueCommand> {
        self.state.lock().commands.clone()
    }

    /// How many times a cue was started
    pub fn play_count(&self, cue: Cue) -> usize {
        self.state
            .lock()
            .commands
            .iter()
            .filter(|c| matches!(c, CueCommand::Play { cue: played, .. } if *played == cue))
            .count()
    }

    pub fn is_playing(&self, cue: Cue) -> bool {
        self.state.lock().playing.contains(&cue)
    }
}

impl AudioDevice for CueLog {
    fn play(&mut self, cue: Cue, looped: bool) {
        let mut state = self.state.lock();
        state.commands.push(CueCommand::Play { cue, looped });
        state.playing.insert(cue);
    }

    fn stop(&mut self, cue: Cue) {
        let mut state = self.state.lock();
        state.commands.push(CueCommand::Stop(cue));
        state.playing.remove(&cue);
    }

    fn stop_all(&mut self) {
        let mut state = self.state.lock();
        state.commands.push(CueCommand::StopAll);
        state.playing.clear();
    }

    fn is_finished(&self, cue: Cue) -> bool {
        !self.state.lock().playing.contains(&cue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let log = CueLog::new();
        let mut device = log.clone();
        device.play(Cue::Die, false);

        assert!(log.is_playing(Cue::Die));
        assert!(!device.is_finished(Cue::Die));

        log.finish(Cue::Die);
        assert!(device.is_finished(Cue::Die));
        assert_eq!(log.play_count(Cue::Die), 1);
    }

    #[test]
    fn stop_all_finishes_everything() {
        let mut log = CueLog::new();
        log.play(Cue::Invincibility, true);
        log.play(Cue::Stomp, false);
        log.stop_all();

        assert!(log.is_finished(Cue::Invincibility));
        assert!(log.is_finished(Cue::Stomp));
        assert_eq!(log.commands().last(), Some(&CueCommand::StopAll));
    }

    #[test]
    fn never_played_counts_as_finished() {
        let log = CueLog::new();
        assert!(log.is_finished(Cue::StageClear));
    }
}
