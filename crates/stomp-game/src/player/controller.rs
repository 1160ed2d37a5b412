//! Player controller: one `update` per frame

use std::sync::Arc;

use glam::Vec2;
use stomp_audio::{AudioDevice, Cue};
use stomp_core::{Clock, Rect};
use stomp_physics::{Body, Medium, PhysicsIntegrator, SteerState};
use tracing::{debug, info};

use crate::config::PlayerConfig;
use crate::input::{InputAction, InputSnapshot};
use crate::world::{
    Direction, Enemy, FrameContext, GameStats, Platform, Projectile, ProjectileSpawner,
    StageManager, Viewport,
};

use super::{
    select_animation, AnimationId, DamageOutcome, LifecycleState, PlayerEvent, PowerLevel,
    StatusEffectType, StatusManager, TimedWindow,
};

/// Per-frame motion flags. Reset to defaults whenever the player is reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionFlags {
    /// Landed on a block during this frame's collision pass
    pub grounded: bool,
    /// Pressing against the direction of travel
    pub sliding: bool,
    pub crouching: bool,
    /// Holding the throw pose after a fireball
    pub firing: bool,
}

/// The playable character
pub struct PlayerController {
    pub(super) config: PlayerConfig,
    pub(super) integrator: PhysicsIntegrator,
    pub(super) body: Body,
    pub(super) power: PowerLevel,
    pub(super) facing_right: bool,
    pub(super) flags: MotionFlags,
    pub(super) lifecycle: LifecycleState,
    pub(super) status: StatusManager,
    pub(super) throw_pose: TimedWindow,
    pub(super) bullets: Vec<Box<dyn Projectile>>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) audio: Box<dyn AudioDevice>,
    pub(super) spawner: Box<dyn ProjectileSpawner>,
    pub(super) events: Vec<PlayerEvent>,
}

impl PlayerController {
    /// Create a Small player at the spawn point, Playing
    pub fn new(
        config: PlayerConfig,
        clock: Arc<dyn Clock>,
        audio: Box<dyn AudioDevice>,
        spawner: Box<dyn ProjectileSpawner>,
    ) -> Self {
        let size = config.hitboxes.small;
        Self {
            integrator: PhysicsIntegrator::new(config.physics.clone()),
            body: Body::new(config.spawn, size.width, size.height),
            power: PowerLevel::Small,
            facing_right: true,
            flags: MotionFlags::default(),
            lifecycle: LifecycleState::Playing,
            status: StatusManager::new(config.invincibility_ms, config.invulnerability_ms),
            throw_pose: TimedWindow::new(config.throw_pose_ms),
            bullets: Vec::with_capacity(config.bullet_limit),
            clock,
            audio,
            spawner,
            events: Vec::new(),
            config,
        }
    }

    /// Advance one frame.
    ///
    /// Order: lifecycle gate, status expiry, collisions against last frame's
    /// rect, physics, position commit, projectiles. Returns everything that
    /// happened since the previous call.
    pub fn update(
        &mut self,
        input: &InputSnapshot,
        platforms: &mut [Platform],
        enemies: &mut [Enemy],
        ctx: &mut FrameContext<'_>,
    ) -> Vec<PlayerEvent> {
        if self.lifecycle == LifecycleState::GameOver {
            return self.take_events();
        }

        if self.lifecycle == LifecycleState::StageClearing {
            if !self.audio.is_finished(Cue::StageClear) {
                self.body.velocity = Vec2::ZERO;
                return self.take_events();
            }
            self.advance_stage(ctx);
        }

        if ctx.viewport.is_below_screen(&self.body.rect) {
            match self.lifecycle {
                LifecycleState::Playing => self.die(&mut *ctx.stage),
                LifecycleState::Dead if self.audio.is_finished(Cue::Die) => self.respawn(ctx),
                _ => {}
            }
            if self.lifecycle == LifecycleState::GameOver {
                return self.take_events();
            }
        }

        let now = self.clock.now_ms();
        self.expire_status(now, ctx);

        self.flags.grounded = false;
        if self.lifecycle.is_playing() {
            self.collide_platforms(platforms, ctx);
            self.collide_enemies(enemies, ctx);
        }

        self.integrate(input, ctx);
        self.commit(&*ctx.viewport);

        for bullet in &mut self.bullets {
            bullet.update(platforms, enemies);
        }
        self.bullets.retain(|bullet| !bullet.is_expired());

        self.take_events()
    }

    /// Jump on the frame the jump button goes down, fire on the frame the fire
    /// button goes down
    pub fn handle_presses(
        &mut self,
        current: &InputSnapshot,
        previous: &InputSnapshot,
        stats: &GameStats,
    ) {
        if current.just_pressed(previous, InputAction::Jump) {
            self.jump(stats);
        }
        if current.just_pressed(previous, InputAction::Fire) {
            self.fire();
        }
    }

    /// Jump, or take a swim stroke on a water stage. Land jumps need solid
    /// ground; swim strokes work anywhere. Returns whether it happened.
    pub fn jump(&mut self, stats: &GameStats) -> bool {
        if !self.lifecycle.is_playing() {
            return false;
        }

        let power = match self.config.medium(stats.current_stage) {
            Medium::Water => self.config.swim_power,
            Medium::Air => {
                if !self.flags.grounded {
                    return false;
                }
                let cue = if self.power > PowerLevel::Small {
                    Cue::BigJump
                } else {
                    Cue::Jump
                };
                self.audio.play(cue, false);
                self.config.jump_power
            }
        };

        self.body.launch(-power);
        self.flags.grounded = false;
        true
    }

    /// Throw a fireball from the leading edge. Silently ignored unless at Fire
    /// power with fewer than `bullet_limit` fireballs out.
    pub fn fire(&mut self) -> bool {
        if !self.lifecycle.is_playing()
            || !self.power.can_fire()
            || self.bullets.len() >= self.config.bullet_limit
        {
            return false;
        }

        self.audio.play(Cue::Fire, false);
        let rect = self.body.rect;
        let (direction, x) = if self.facing_right {
            (Direction::Right, rect.right())
        } else {
            (Direction::Left, rect.left())
        };
        let bullet = self.spawner.spawn(direction, x, rect.center_y());
        self.bullets.push(bullet);

        if !self.flags.crouching {
            self.flags.firing = true;
            self.throw_pose.begin(self.clock.now_ms());
        }

        self.events.push(PlayerEvent::FireballThrown { direction });
        true
    }

    /// Take damage: drop to Small with a grace window, or die if already Small.
    /// Ignored while invulnerable or not Playing.
    pub fn get_hit(&mut self, stage: &mut dyn StageManager) {
        if !self.lifecycle.is_playing() || self.status.has_effect(StatusEffectType::Invulnerable) {
            return;
        }

        match self.power.after_damage() {
            DamageOutcome::Demoted => {
                let from = self.power;
                let now = self.clock.now_ms();
                self.power = PowerLevel::Small;
                self.flags.crouching = false;
                self.flags.firing = false;
                self.throw_pose.clear();
                self.apply_hitbox();
                self.status.apply(StatusEffectType::Invulnerable, now);

                info!(?from, now, "Player hit, demoted to Small");
                self.events.push(PlayerEvent::Damaged { from });
            }
            DamageOutcome::Killed => self.die(stage),
        }
    }

    /// Force a power level, resizing the hit-box
    pub fn set_power(&mut self, power: PowerLevel) {
        self.power = power;
        if !power.can_crouch() {
            self.flags.crouching = false;
        }
        self.apply_hitbox();
    }

    /// Match the hit-box to the power level and crouch state, keeping the feet put
    pub(super) fn apply_hitbox(&mut self) {
        let size = self.config.hitboxes.for_power(self.power, self.flags.crouching);
        self.body.resize(size.width, size.height);
    }

    fn expire_status(&mut self, now: u64, ctx: &mut FrameContext<'_>) {
        for effect in self.status.update(now) {
            match effect {
                StatusEffectType::Invincible => {
                    self.audio.stop(Cue::Invincibility);
                    ctx.stage.play_music();
                    info!(now, "Invincibility ended");
                    self.events.push(PlayerEvent::InvincibilityEnded);
                }
                StatusEffectType::Invulnerable => debug!(now, "Invulnerability ended"),
            }
        }

        if self.throw_pose.is_expired(now) {
            self.throw_pose.clear();
            self.flags.firing = false;
        }
    }

    fn integrate(&mut self, input: &InputSnapshot, ctx: &mut FrameContext<'_>) {
        if self.lifecycle == LifecycleState::StageClearing {
            self.body.velocity = Vec2::ZERO;
            return;
        }

        let medium = self.config.medium(ctx.stats.current_stage);
        self.integrator
            .apply_gravity(&mut self.body.velocity, self.flags.grounded, medium);

        if !self.lifecycle.is_playing() {
            return;
        }

        let crouching = PhysicsIntegrator::crouch_state(
            self.power.can_crouch(),
            self.flags.grounded,
            input.is_held(InputAction::Crouch),
            self.flags.crouching,
        );
        if crouching != self.flags.crouching {
            self.flags.crouching = crouching;
            self.apply_hitbox();
        }

        let mut steer = SteerState {
            facing_right: self.facing_right,
            sliding: self.flags.sliding,
        };
        let at_boundary = ctx.viewport.is_past_boundary(&self.body.rect);
        self.integrator.steer(
            &mut self.body.velocity.x,
            &mut steer,
            input.horizontal(),
            self.flags.crouching,
            at_boundary,
        );
        self.facing_right = steer.facing_right;
        self.flags.sliding = steer.sliding;
    }

    fn commit(&mut self, viewport: &dyn Viewport) {
        self.body.position.y += self.body.velocity.y;
        if viewport.is_past_boundary(&self.body.rect) {
            self.body.position.x = viewport.boundary_x();
            self.body.velocity.x = 0.0;
        } else {
            self.body.position.x += self.body.velocity.x;
        }
        self.body.commit();
    }

    fn take_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Animation for the current state
    pub fn animation(&self, stats: &GameStats) -> AnimationId {
        select_animation(
            self.power,
            &self.flags,
            self.lifecycle == LifecycleState::Dead,
            self.config.medium(stats.current_stage) == Medium::Water,
            self.body.velocity,
        )
    }

    /// False on the off-beat of the invulnerability blink
    pub fn blink_visible(&self) -> bool {
        !(self.status.has_effect(StatusEffectType::Invulnerable) && self.on_beat())
    }

    /// Whether to draw the invincibility tint this frame
    pub fn tinted(&self) -> bool {
        self.status.has_effect(StatusEffectType::Invincible) && self.on_beat()
    }

    fn on_beat(&self) -> bool {
        (self.clock.now_ms() / 100) % 2 == 0
    }

    pub fn rect(&self) -> Rect {
        self.body.rect
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    pub fn power(&self) -> PowerLevel {
        self.power
    }

    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    pub fn flags(&self) -> MotionFlags {
        self.flags
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    pub fn is_invincible(&self) -> bool {
        self.status.has_effect(StatusEffectType::Invincible)
    }

    pub fn is_invulnerable(&self) -> bool {
        self.status.has_effect(StatusEffectType::Invulnerable)
    }

    pub fn bullet_count(&self) -> usize {
        self.bullets.len()
    }
}
