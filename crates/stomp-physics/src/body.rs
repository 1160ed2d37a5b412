//! Sub-pixel character body

use glam::Vec2;
use stomp_core::Rect;

/// A moving hit-box.
///
/// `position` accumulates fractional pixels; `rect` is the whole-pixel box used
/// for collision and drawing, refreshed from `position` on every commit.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Top-left corner, sub-pixel
    pub position: Vec2,
    /// Pixels per frame
    pub velocity: Vec2,
    /// Whole-pixel hit-box
    pub rect: Rect,
}

impl Body {
    /// Create a body at rest with its top-left corner at `position`
    pub fn new(position: Vec2, width: i32, height: i32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            rect: Rect::new(
                position.x.floor() as i32,
                position.y.floor() as i32,
                width,
                height,
            ),
        }
    }

    /// Copy the sub-pixel position into the rect
    pub fn commit(&mut self) {
        self.rect.x = self.position.x.floor() as i32;
        self.rect.y = self.position.y.floor() as i32;
    }

    /// Re-derive the vertical position after the rect was moved directly
    pub fn sync_y_from_rect(&mut self) {
        self.position.y = self.rect.y as f32;
    }

    /// Re-derive the horizontal position after the rect was moved directly
    pub fn sync_x_from_rect(&mut self) {
        self.position.x = self.rect.x as f32;
    }

    /// Swap the hit-box size while keeping the feet where they are.
    ///
    /// The new rect takes its x from the floored position and its bottom from the
    /// old rect; the sub-pixel y is then re-derived from the new top. Returns
    /// whether the size changed.
    pub fn resize(&mut self, width: i32, height: i32) -> bool {
        if self.rect.w == width && self.rect.h == height {
            return false;
        }
        let bottom = self.rect.bottom();
        self.rect = Rect::new(self.position.x.floor() as i32, 0, width, height);
        self.rect.set_bottom(bottom);
        self.sync_y_from_rect();
        true
    }

    /// Set the vertical velocity and apply it to the position right away.
    ///
    /// Used for jumps, stomp bounces and the death hop, which must clear the
    /// surface they start from before the next collision pass.
    pub fn launch(&mut self, velocity_y: f32) {
        self.velocity.y = velocity_y;
        self.position.y += velocity_y;
        self.rect.y = self.position.y.floor() as i32;
    }

    /// Teleport and stop
    pub fn place(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.commit();
    }
}
