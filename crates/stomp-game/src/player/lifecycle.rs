//! Death, respawn, stage clear, and reset

use serde::{Deserialize, Serialize};
use stomp_audio::Cue;
use stomp_physics::collision::goal_bonus;
use tracing::info;

use crate::world::{FrameContext, GameStats, Hud, Platform, StageManager, Viewport};

use super::{MotionFlags, PlayerController, PlayerEvent, PowerLevel};

/// Top-level state of the player. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LifecycleState {
    /// Normal play: input, physics and collisions all run
    #[default]
    Playing,
    /// Goal touched; frozen until the stage-clear cue finishes
    StageClearing,
    /// Falling off screen on the death arc; waits for the die cue
    Dead,
    /// Out of lives. Nothing happens until a new session starts.
    GameOver,
}

impl LifecycleState {
    /// Whether input and collisions are processed
    pub fn is_playing(self) -> bool {
        self == Self::Playing
    }
}

impl PlayerController {
    /// Kill the player: stop all audio including the stage music, play the die
    /// cue and launch the death hop.
    pub fn die(&mut self, stage: &mut dyn StageManager) {
        if matches!(self.lifecycle, LifecycleState::Dead | LifecycleState::GameOver) {
            return;
        }

        self.audio.stop_all();
        stage.stop_music();
        self.audio.play(Cue::Die, false);
        self.lifecycle = LifecycleState::Dead;
        self.status.clear();
        self.throw_pose.clear();
        self.bullets.clear();
        self.flags.grounded = false;
        self.flags.firing = false;
        self.body.velocity.x = 0.0;
        self.body.launch(-self.config.death_launch);

        info!(power = ?self.power, "Player died");
        self.events.push(PlayerEvent::Died);
    }

    /// Spend a life and restart the stage, or end the game when none are left.
    pub fn respawn(&mut self, ctx: &mut FrameContext<'_>) {
        if self.lifecycle == LifecycleState::GameOver {
            return;
        }

        if ctx.stats.lives_left == 0 {
            self.lifecycle = LifecycleState::GameOver;
            self.audio.play(Cue::GameOver, false);
            info!(score = ctx.stats.score, "Game over");
            self.events.push(PlayerEvent::GameOver);
            return;
        }

        ctx.stats.lives_left -= 1;
        self.power = PowerLevel::Small;
        self.flags.crouching = false;
        self.apply_hitbox();
        ctx.hud.notify_lives_changed(ctx.stats.lives_left);
        self.reset(ctx.viewport);
        ctx.stage.reset_current_stage();

        info!(lives_left = ctx.stats.lives_left, "Player respawned");
        self.events.push(PlayerEvent::Respawned {
            lives_left: ctx.stats.lives_left,
        });
    }

    /// Put the player back at the spawn point, at rest and Playing.
    /// Power level, lives and score are untouched.
    pub fn reset(&mut self, viewport: &mut dyn Viewport) {
        self.lifecycle = LifecycleState::Playing;
        self.flags = MotionFlags::default();
        self.status.clear();
        self.throw_pose.clear();
        self.apply_hitbox();
        viewport.reset();
        self.body.place(self.config.spawn);
    }

    /// Start over from the first stage with fresh stats. The only way out of
    /// [`LifecycleState::GameOver`].
    pub fn new_session(&mut self, ctx: &mut FrameContext<'_>) {
        *ctx.stats = GameStats::default();
        self.audio.stop_all();
        self.bullets.clear();
        self.power = PowerLevel::Small;
        self.flags.crouching = false;
        self.apply_hitbox();
        self.reset(ctx.viewport);
        ctx.stage.load_stage(ctx.stats.current_stage);
        ctx.hud.notify_score_changed(ctx.stats.score);
        ctx.hud.notify_lives_changed(ctx.stats.lives_left);
        info!("New session started");
    }

    /// Extra life
    pub fn award_life(&mut self, stats: &mut GameStats, hud: &mut dyn Hud) {
        stats.lives_left += 1;
        self.audio.play(Cue::OneUp, false);
        hud.notify_lives_changed(stats.lives_left);
        self.events.push(PlayerEvent::LifeAwarded {
            lives_left: stats.lives_left,
        });
    }

    /// Goal touched: freeze, play the stage-clear cue and bank the bonus.
    pub(super) fn begin_stage_clear(&mut self, goal: &Platform, ctx: &mut FrameContext<'_>) {
        let bonus = goal_bonus(
            &goal.rect,
            &self.body.rect,
            ctx.stage.time_limit_ms(),
            ctx.stage.time_elapsed_ms(),
        );

        self.audio.stop_all();
        ctx.stage.stop_music();
        self.audio.play(Cue::StageClear, false);
        self.lifecycle = LifecycleState::StageClearing;
        ctx.stats.score += bonus;
        ctx.hud.notify_score_changed(ctx.stats.score);

        info!(stage = ctx.stats.current_stage, bonus, "Stage cleared");
        self.events.push(PlayerEvent::StageCleared { bonus });
    }

    /// Load the next stage once the stage-clear cue is done
    pub(super) fn advance_stage(&mut self, ctx: &mut FrameContext<'_>) {
        ctx.stats.current_stage += 1;
        ctx.stage.load_stage(ctx.stats.current_stage);
        self.reset(ctx.viewport);

        info!(stage = ctx.stats.current_stage, "Advanced to next stage");
        self.events.push(PlayerEvent::StageAdvanced {
            stage: ctx.stats.current_stage,
        });
    }
}
