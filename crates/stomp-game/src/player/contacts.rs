//! Platform and enemy contacts
//!
//! Contacts are checked against the rect as it stood at the end of the previous
//! frame, one entity at a time in snapshot order. Each resolution moves the rect,
//! so later entities see the corrected position. Handling stops as soon as a
//! contact takes the player out of [`Playing`](super::LifecycleState::Playing).

use stomp_audio::Cue;
use stomp_physics::collision::{classify_enemy, resolve_block};
use stomp_physics::{BlockContact, EnemyContact};
use tracing::{debug, info};

use crate::world::{Enemy, FrameContext, Platform, PlatformTag};

use super::{PlayerController, PlayerEvent, PowerUp, StatusEffectType};

impl PlayerController {
    pub(super) fn collide_platforms(
        &mut self,
        platforms: &mut [Platform],
        ctx: &mut FrameContext<'_>,
    ) {
        for platform in platforms.iter_mut() {
            if !self.lifecycle.is_playing() {
                break;
            }
            if !platform.is_alive() || !self.body.rect.intersects(&platform.rect) {
                continue;
            }

            match platform.tag {
                PlatformTag::Normal | PlatformTag::Brick => self.collide_block(platform),
                PlatformTag::Item => self.collect_power_up(platform, PowerUp::Mushroom),
                PlatformTag::Flower => self.collect_power_up(platform, PowerUp::Flower),
                PlatformTag::Star => self.collect_star(platform, ctx),
                PlatformTag::Win => self.begin_stage_clear(platform, ctx),
            }
        }
    }

    pub(super) fn collide_enemies(
        &mut self,
        enemies: &mut [Enemy],
        ctx: &mut FrameContext<'_>,
    ) {
        for enemy in enemies.iter_mut() {
            if !self.lifecycle.is_playing() {
                break;
            }
            if !enemy.is_alive() {
                continue;
            }

            let invincible = self.status.has_effect(StatusEffectType::Invincible);
            let Some(contact) = classify_enemy(
                &self.body.rect,
                &enemy.rect,
                self.body.velocity.y,
                invincible,
            ) else {
                continue;
            };

            match contact {
                EnemyContact::Trample => self.defeat(enemy, false, ctx),
                EnemyContact::Stomp => {
                    self.audio.play(Cue::Stomp, false);
                    self.defeat(enemy, true, ctx);
                    self.body.launch(-self.config.stomp_bounce);
                }
                EnemyContact::Hurt => self.get_hit(&mut *ctx.stage),
            }
        }
    }

    fn collide_block(&mut self, platform: &mut Platform) {
        match resolve_block(&mut self.body, &platform.rect) {
            Some(BlockContact::Landed) => self.flags.grounded = true,
            Some(BlockContact::HeadBump)
                if platform.tag == PlatformTag::Brick && self.power.breaks_bricks() =>
            {
                if platform.destroy() {
                    self.audio.play(Cue::BreakBrick, false);
                    self.events.push(PlayerEvent::BrickBroken {
                        platform: platform.id,
                    });
                }
            }
            _ => {}
        }
    }

    /// Consume the pickup whether or not it raises the power level
    fn collect_power_up(&mut self, platform: &mut Platform, item: PowerUp) {
        if !platform.destroy() {
            return;
        }
        self.events.push(PlayerEvent::ItemCollected {
            platform: platform.id,
            tag: platform.tag,
        });

        if let Some(next) = self.power.after_power_up(item) {
            let from = self.power;
            self.power = next;
            self.apply_hitbox();
            self.audio.play(Cue::PowerUp, false);

            info!(?from, to = ?next, "Powered up");
            self.events.push(PlayerEvent::PoweredUp { from, to: next });
        }
    }

    fn collect_star(&mut self, platform: &mut Platform, ctx: &mut FrameContext<'_>) {
        if !platform.destroy() {
            return;
        }
        self.events.push(PlayerEvent::ItemCollected {
            platform: platform.id,
            tag: platform.tag,
        });

        let now = self.clock.now_ms();
        if self.status.apply(StatusEffectType::Invincible, now) {
            ctx.stage.stop_music();
            self.audio.play(Cue::Invincibility, true);
            info!(now, "Invincibility started");
            self.events.push(PlayerEvent::InvincibilityStarted);
        } else {
            debug!(now, "Invincibility restarted");
        }
    }

    fn defeat(&mut self, enemy: &mut Enemy, stomped: bool, ctx: &mut FrameContext<'_>) {
        if !enemy.die() {
            return;
        }
        ctx.stats.score += u64::from(enemy.point_value);
        ctx.hud.notify_score_changed(ctx.stats.score);

        debug!(points = enemy.point_value, stomped, "Enemy defeated");
        self.events.push(PlayerEvent::EnemyDefeated {
            enemy: enemy.id,
            points: enemy.point_value,
            stomped,
        });
    }
}
