//! Timed status effects
//!
//! Invincibility (from a star) and invulnerability (the grace period after a hit)
//! are independent windows measured against a monotonic millisecond clock.

use serde::{Deserialize, Serialize};

/// Types of status effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusEffectType {
    /// Enemies are defeated on any contact
    Invincible,
    /// Enemy contact does no damage
    Invulnerable,
}

/// A window that opens at `begin` and closes once more than `duration_ms` has passed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedWindow {
    pub duration_ms: u64,
    started_at: Option<u64>,
}

impl TimedWindow {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            started_at: None,
        }
    }

    /// Open the window at `now`, or restart it if already open.
    /// Returns true only if it was closed before.
    pub fn begin(&mut self, now: u64) -> bool {
        self.started_at.replace(now).is_none()
    }

    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    /// Open and strictly longer than the window has passed
    pub fn is_expired(&self, now: u64) -> bool {
        self.started_at
            .is_some_and(|start| now.saturating_sub(start) > self.duration_ms)
    }

    pub fn clear(&mut self) {
        self.started_at = None;
    }
}

/// Manages both status windows on the player
#[derive(Debug, Clone)]
pub struct StatusManager {
    invincible: TimedWindow,
    invulnerable: TimedWindow,
}

impl StatusManager {
    pub fn new(invincibility_ms: u64, invulnerability_ms: u64) -> Self {
        Self {
            invincible: TimedWindow::new(invincibility_ms),
            invulnerable: TimedWindow::new(invulnerability_ms),
        }
    }

    fn window(&self, effect: StatusEffectType) -> &TimedWindow {
        match effect {
            StatusEffectType::Invincible => &self.invincible,
            StatusEffectType::Invulnerable => &self.invulnerable,
        }
    }

    fn window_mut(&mut self, effect: StatusEffectType) -> &mut TimedWindow {
        match effect {
            StatusEffectType::Invincible => &mut self.invincible,
            StatusEffectType::Invulnerable => &mut self.invulnerable,
        }
    }

    /// Start an effect. Re-applying an active effect restarts its window instead
    /// of stacking. Returns true only when the effect was not already active.
    pub fn apply(&mut self, effect: StatusEffectType, now: u64) -> bool {
        self.window_mut(effect).begin(now)
    }

    /// Close every window that has run out. Each expiry is reported exactly once.
    pub fn update(&mut self, now: u64) -> Vec<StatusEffectType> {
        let mut expired = Vec::new();
        for effect in [StatusEffectType::Invincible, StatusEffectType::Invulnerable] {
            let window = self.window_mut(effect);
            if window.is_expired(now) {
                window.clear();
                expired.push(effect);
            }
        }
        expired
    }

    /// Check if a specific status type is active
    pub fn has_effect(&self, effect: StatusEffectType) -> bool {
        self.window(effect).is_active()
    }

    /// Remove all effects
    pub fn clear(&mut self) {
        self.invincible.clear();
        self.invulnerable.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_expires_strictly_after_duration() {
        let mut window = TimedWindow::new(1_500);
        assert!(window.begin(1_000));
        assert!(!window.is_expired(2_500));
        assert!(window.is_expired(2_501));
    }

    #[test]
    fn test_star_window() {
        let mut status = StatusManager::new(10_000, 1_500);
        assert!(status.apply(StatusEffectType::Invincible, 5_000));

        assert!(status.update(15_000).is_empty());
        assert!(status.has_effect(StatusEffectType::Invincible));

        assert_eq!(status.update(15_001), vec![StatusEffectType::Invincible]);
        assert!(!status.has_effect(StatusEffectType::Invincible));

        // Reported once only
        assert!(status.update(20_000).is_empty());
    }

    #[test]
    fn test_reapply_restarts_without_stacking() {
        let mut status = StatusManager::new(10_000, 1_500);
        assert!(status.apply(StatusEffectType::Invincible, 0));
        assert!(!status.apply(StatusEffectType::Invincible, 8_000));

        // Measured from the restart, not the first start
        assert!(status.update(12_000).is_empty());
        assert!(status.update(18_000).is_empty());
        assert_eq!(status.update(18_001), vec![StatusEffectType::Invincible]);
    }

    #[test]
    fn test_windows_are_independent() {
        let mut status = StatusManager::new(10_000, 1_500);
        status.apply(StatusEffectType::Invincible, 0);
        status.apply(StatusEffectType::Invulnerable, 0);

        assert_eq!(status.update(2_000), vec![StatusEffectType::Invulnerable]);
        assert!(status.has_effect(StatusEffectType::Invincible));
    }

    #[test]
    fn test_clear_is_silent() {
        let mut status = StatusManager::new(10_000, 1_500);
        status.apply(StatusEffectType::Invincible, 0);
        status.apply(StatusEffectType::Invulnerable, 0);
        status.clear();
        assert!(status.update(20_000).is_empty());
        assert!(!status.has_effect(StatusEffectType::Invincible));
    }
}
