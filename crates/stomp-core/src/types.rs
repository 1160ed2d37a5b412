//! Core types used throughout the Stomp crates

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for level entities (platforms, enemies)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new random entity ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Axis-aligned rectangle in whole screen pixels.
///
/// `y` grows downward, so `top() < bottom()` for any non-empty rect.
/// `right()` and `bottom()` are exclusive edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    /// Move the rect so its left edge sits at `left`
    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    /// Move the rect so its right edge sits at `right`
    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.w;
    }

    /// Move the rect so its top edge sits at `top`
    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    /// Move the rect so its bottom edge sits at `bottom`
    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.h;
    }

    /// Whether the two rects share any area. Touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.w > 0
            && self.h > 0
            && other.w > 0
            && other.h > 0
            && self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// The overlapping area of two rects, if any
    pub fn clip(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let rect = Rect::new(10, 20, 16, 32);
        assert_eq!(rect.right(), 26);
        assert_eq!(rect.bottom(), 52);
        assert_eq!(rect.center_y(), 36);
    }

    #[test]
    fn test_set_bottom_keeps_size() {
        let mut rect = Rect::new(0, 0, 16, 32);
        rect.set_bottom(100);
        assert_eq!(rect.top(), 68);
        assert_eq!(rect.h, 32);
    }

    #[test]
    fn test_clip_overlap() {
        let a = Rect::new(0, 0, 20, 20);
        let b = Rect::new(15, 17, 20, 20);
        assert_eq!(a.clip(&b), Some(Rect::new(15, 17, 5, 3)));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert!(!a.intersects(&b));
        assert_eq!(a.clip(&b), None);
    }
}
