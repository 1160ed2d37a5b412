use crate::cue::Cue;

/// Fire-and-forget cue playback.
///
/// Implementations own the actual mixer. Nothing here can fail from the caller's
/// point of view: a backend that cannot play a cue logs it and moves on.
pub trait AudioDevice {
    /// Start a cue. A looped cue keeps playing until stopped.
    fn play(&mut self, cue: Cue, looped: bool);

    /// Stop every playing instance of a cue.
    fn stop(&mut self, cue: Cue);

    /// Stop everything, music included.
    fn stop_all(&mut self);

    /// Whether the most recent instance of a cue is no longer playing.
    /// A cue that was never played counts as finished.
    fn is_finished(&self, cue: Cue) -> bool;
}
