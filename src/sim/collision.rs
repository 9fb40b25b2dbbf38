//! Axis-aligned collision detection
//!
//! Screen coordinates: origin at the top-left of the field, y grows downward.
//! Hitboxes are shrunk by a padding margin before testing so that sprites
//! whose transparent corners touch do not end the run.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Shrink every side inward by `pad`
    pub fn inset(&self, pad: f32) -> Self {
        Self {
            pos: self.pos + Vec2::splat(pad),
            size: self.size - Vec2::splat(pad * 2.0),
        }
    }

    /// Strict overlap test. Rectangles that only share an edge do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }

    /// Inclusive point test (a tap exactly on the border counts)
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.pos.x && p.x <= self.right() && p.y >= self.pos.y && p.y <= self.bottom()
    }
}

/// Overlap test after insetting both rectangles by `pad`
pub fn padded_overlap(a: &Rect, b: &Rect, pad: f32) -> bool {
    a.inset(pad).intersects(&b.inset(pad))
}

/// Index of the first obstacle whose padded hitbox overlaps the player's.
///
/// Stops at the first hit; later obstacles are not examined.
pub fn first_hit<I>(player: &Rect, obstacles: I, pad: f32) -> Option<usize>
where
    I: IntoIterator<Item = Rect>,
{
    let player = player.inset(pad);
    obstacles
        .into_iter()
        .position(|obstacle| player.intersects(&obstacle.inset(pad)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_rects_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_edge_touching_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // a.x + a.w == b.x
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        // a.y + a.h == b.y
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
        assert!(!right.intersects(&a));
    }

    #[test]
    fn test_padding_forgives_near_miss() {
        // Raw rectangles overlap by 20px horizontally
        let raft = Rect::new(120.0, 370.0, 80.0, 80.0);
        let rock = Rect::new(180.0, 370.0, 70.0, 70.0);
        assert!(raft.intersects(&rock));
        // 12px inset on both sides eats 24px of the 20px overlap
        assert!(!padded_overlap(&raft, &rock, 12.0));
    }

    #[test]
    fn test_padded_edges_touching_is_not_a_hit() {
        // Padded raft spans x 132..188; padded rock starts at exactly 188
        let raft = Rect::new(120.0, 370.0, 80.0, 80.0);
        let rock = Rect::new(176.0, 370.0, 70.0, 70.0);
        assert!(!padded_overlap(&raft, &rock, 12.0));
        // One pixel further left overlaps
        let rock = Rect::new(175.0, 370.0, 70.0, 70.0);
        assert!(padded_overlap(&raft, &rock, 12.0));
    }

    #[test]
    fn test_first_hit_reports_earliest_index() {
        let raft = Rect::new(120.0, 370.0, 80.0, 80.0);
        let rocks = [
            Rect::new(0.0, 0.0, 70.0, 70.0),
            Rect::new(125.0, 375.0, 70.0, 70.0),
            Rect::new(130.0, 380.0, 70.0, 70.0),
        ];
        assert_eq!(first_hit(&raft, rocks, 12.0), Some(1));
        assert_eq!(first_hit(&raft, [rocks[0]], 12.0), None);
    }

    #[test]
    fn test_contains_point_is_inclusive() {
        let button = Rect::new(80.0, 260.0, 160.0, 48.0);
        assert!(button.contains_point(Vec2::new(80.0, 260.0)));
        assert!(button.contains_point(Vec2::new(240.0, 308.0)));
        assert!(button.contains_point(Vec2::new(160.0, 280.0)));
        assert!(!button.contains_point(Vec2::new(79.9, 280.0)));
        assert!(!button.contains_point(Vec2::new(160.0, 308.1)));
    }
}
