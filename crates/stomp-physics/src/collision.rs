//! AABB collision resolution against platforms and enemies
//!
//! Every contact is resolved along exactly one axis, picked from the shape of the
//! overlap rectangle: at least as wide as it is tall means a vertical contact,
//! otherwise a horizontal one.

use stomp_core::Rect;

use crate::body::Body;

/// Axis a contact is resolved along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionAxis {
    Vertical,
    Horizontal,
}

impl CollisionAxis {
    /// Axis for an overlap rectangle. Ties go to vertical.
    pub fn of(overlap: &Rect) -> Self {
        if overlap.w >= overlap.h {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }
}

/// Outcome of pushing a body out of a solid block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockContact {
    /// Came down on top; the body now stands on the block
    Landed,
    /// Hit the underside while rising
    HeadBump,
    /// Pushed out to the left of the block
    PushedLeft,
    /// Pushed out to the right of the block
    PushedRight,
    /// Overlapping, but no rule applied (e.g. a vertical contact from below while falling)
    Unresolved,
}

/// Push `body` out of `block`.
///
/// Returns `None` when the two do not overlap. Landing leaves the body sunk one
/// pixel into the block so it keeps touching it, and stays grounded, next frame.
pub fn resolve_block(body: &mut Body, block: &Rect) -> Option<BlockContact> {
    let overlap = body.rect.clip(block)?;

    let contact = match CollisionAxis::of(&overlap) {
        CollisionAxis::Vertical => {
            if body.velocity.y >= 0.0 && body.rect.top() < block.top() {
                body.rect.set_bottom(block.top() + 1);
                body.sync_y_from_rect();
                body.velocity.y = 0.0;
                BlockContact::Landed
            } else if body.velocity.y < 0.0 {
                body.rect.set_top(block.bottom());
                body.sync_y_from_rect();
                body.velocity.y = 0.0;
                BlockContact::HeadBump
            } else {
                BlockContact::Unresolved
            }
        }
        CollisionAxis::Horizontal => {
            let rect = body.rect;
            if rect.right() > block.left() && block.left() > rect.left() {
                body.velocity.x = -1.0;
                body.rect.set_right(block.left());
                body.sync_x_from_rect();
                BlockContact::PushedLeft
            } else if rect.left() < block.right() && block.right() < rect.right() {
                body.velocity.x = 1.0;
                body.rect.set_left(block.right());
                body.sync_x_from_rect();
                BlockContact::PushedRight
            } else {
                BlockContact::Unresolved
            }
        }
    };

    Some(contact)
}

/// How an enemy contact plays out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyContact {
    /// Invincible: the enemy is defeated whatever the angle
    Trample,
    /// Came down on top of it
    Stomp,
    /// Anything else hurts the player
    Hurt,
}

/// Classify an enemy contact. Returns `None` when the rects do not overlap.
///
/// `player` is the rect as already corrected by this frame's earlier contacts,
/// so an enemy the player was pushed clear of is skipped rather than hurting it.
pub fn classify_enemy(
    player: &Rect,
    enemy: &Rect,
    velocity_y: f32,
    invincible: bool,
) -> Option<EnemyContact> {
    let overlap = player.clip(enemy)?;
    if invincible {
        return Some(EnemyContact::Trample);
    }
    if overlap.w > overlap.h && velocity_y > 0.0 {
        Some(EnemyContact::Stomp)
    } else {
        Some(EnemyContact::Hurt)
    }
}

/// Score for touching the goal: height on the goal pole plus time left.
///
/// `|goal.bottom - player.bottom| * 10 + floor(remaining_ms / 1000) * 10`, with
/// the remaining time saturating at zero once the limit has passed.
pub fn goal_bonus(goal: &Rect, player: &Rect, time_limit_ms: u64, time_elapsed_ms: u64) -> u64 {
    let height = (goal.bottom() - player.bottom()).unsigned_abs() as u64;
    let remaining_secs = time_limit_ms.saturating_sub(time_elapsed_ms) / 1000;
    height * 10 + remaining_secs * 10
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    fn body_at(x: f32, y: f32, w: i32, h: i32, velocity: Vec2) -> Body {
        let mut body = Body::new(Vec2::new(x, y), w, h);
        body.velocity = velocity;
        body
    }

    #[test]
    fn test_axis_tie_goes_vertical() {
        assert_eq!(CollisionAxis::of(&Rect::new(0, 0, 4, 4)), CollisionAxis::Vertical);
        assert_eq!(CollisionAxis::of(&Rect::new(0, 0, 3, 4)), CollisionAxis::Horizontal);
    }

    #[test]
    fn test_wide_shallow_overlap_lands() {
        // Overlap 20 wide, 3 tall, falling at 4 px/frame
        let mut body = body_at(100.0, 83.0, 20, 20, Vec2::new(0.0, 4.0));
        let ground = Rect::new(90, 100, 64, 16);

        assert_eq!(body.rect.clip(&ground), Some(Rect::new(100, 100, 20, 3)));
        assert_eq!(resolve_block(&mut body, &ground), Some(BlockContact::Landed));
        assert_eq!(body.velocity.y, 0.0);
        assert_eq!(body.rect.bottom(), 101);
        assert_eq!(body.position.y, 81.0);
    }

    #[test]
    fn test_head_bump() {
        let mut body = body_at(100.0, 114.0, 16, 16, Vec2::new(0.0, -5.0));
        let block = Rect::new(96, 100, 32, 16);

        assert_eq!(resolve_block(&mut body, &block), Some(BlockContact::HeadBump));
        assert_eq!(body.rect.top(), 116);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn test_side_push_out() {
        // Walking right into a wall: overlap 2 wide, 16 tall
        let mut body = body_at(86.0, 100.0, 16, 16, Vec2::new(3.0, 0.0));
        let wall = Rect::new(100, 60, 16, 80);
        assert_eq!(resolve_block(&mut body, &wall), Some(BlockContact::PushedLeft));
        assert_eq!(body.rect.right(), 100);
        assert_eq!(body.velocity.x, -1.0);
        assert_eq!(body.position.x, 84.0);

        let mut body = body_at(114.0, 100.0, 16, 16, Vec2::new(-3.0, 0.0));
        assert_eq!(resolve_block(&mut body, &wall), Some(BlockContact::PushedRight));
        assert_eq!(body.rect.left(), 116);
        assert_eq!(body.velocity.x, 1.0);
    }

    #[test]
    fn test_no_overlap() {
        let mut body = body_at(0.0, 0.0, 16, 16, Vec2::ZERO);
        assert_eq!(resolve_block(&mut body, &Rect::new(100, 100, 16, 16)), None);
    }

    #[test]
    fn test_enemy_stomp_needs_downward_motion() {
        let player = Rect::new(100, 86, 16, 16);
        let enemy = Rect::new(100, 100, 16, 16);

        assert_eq!(
            classify_enemy(&player, &enemy, 2.0, false),
            Some(EnemyContact::Stomp)
        );
        assert_eq!(
            classify_enemy(&player, &enemy, 0.0, false),
            Some(EnemyContact::Hurt)
        );
        assert_eq!(
            classify_enemy(&player, &enemy, -2.0, true),
            Some(EnemyContact::Trample)
        );
    }

    #[test]
    fn test_enemy_side_contact_hurts() {
        let player = Rect::new(90, 100, 16, 16);
        let enemy = Rect::new(100, 100, 16, 16);
        assert_eq!(
            classify_enemy(&player, &enemy, 3.0, false),
            Some(EnemyContact::Hurt)
        );
    }

    #[test]
    fn test_goal_bonus() {
        let goal = Rect::new(500, 40, 8, 160);
        let player = Rect::new(496, 179, 16, 16);
        assert_eq!(goal_bonus(&goal, &player, 300_000, 250_000), 5 * 10 + 50 * 10);
        assert_eq!(goal_bonus(&goal, &player, 300_000, 400_000), 50);
    }
}
