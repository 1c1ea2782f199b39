use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Unique identifier for an entity in the world.
///
/// Ids are sequential and assigned by the world in spawn order, so iterating
/// a `BTreeMap<EntityId, _>` visits entities in insertion order. Draw-order
/// tie-breaking depends on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// A handle referencing a sprite asset. The kernel never interprets it;
/// the draw sink is the only consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteHandle(pub u64);

/// Axis-aligned rectangle: world-space top-left plus size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Bottom-right corner.
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Clamp this rect into `bounds`, each axis independently against
    /// `[bounds.min, bounds.max - size]`. A rect larger than the bounds on
    /// an axis is pinned to the bounds' min edge on that axis.
    pub fn clamp_into(&mut self, bounds: &Rect) {
        let lo = bounds.min;
        let hi = (bounds.max() - self.size).max(lo);
        self.min = self.min.clamp(lo, hi);
    }

    /// True when this rect lies fully within `bounds`.
    pub fn contained_in(&self, bounds: &Rect) -> bool {
        self.min.x >= bounds.min.x
            && self.min.y >= bounds.min.y
            && self.max().x <= bounds.max().x
            && self.max().y <= bounds.max().y
    }
}

/// Viewport dimensions, fixed for the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn half(&self) -> Vec2 {
        self.size() * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_center_and_max() {
        let r = Rect::new(Vec2::new(10.0, 20.0), Vec2::new(4.0, 6.0));
        assert_eq!(r.max(), Vec2::new(14.0, 26.0));
        assert_eq!(r.center(), Vec2::new(12.0, 23.0));
    }

    #[test]
    fn clamp_into_pulls_rect_inside() {
        let bounds = Rect::new(Vec2::ZERO, Vec2::new(100.0, 100.0));
        let mut r = Rect::new(Vec2::new(95.0, -10.0), Vec2::new(10.0, 10.0));
        r.clamp_into(&bounds);
        assert_eq!(r.min, Vec2::new(90.0, 0.0));
        assert!(r.contained_in(&bounds));
    }

    #[test]
    fn clamp_into_leaves_interior_rect_untouched() {
        let bounds = Rect::new(Vec2::ZERO, Vec2::new(100.0, 100.0));
        let mut r = Rect::new(Vec2::new(40.0, 40.0), Vec2::new(10.0, 10.0));
        r.clamp_into(&bounds);
        assert_eq!(r.min, Vec2::new(40.0, 40.0));
    }

    #[test]
    fn clamp_into_oversized_rect_pins_to_min() {
        let bounds = Rect::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let mut r = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(50.0, 50.0));
        r.clamp_into(&bounds);
        assert_eq!(r.min, Vec2::ZERO);
    }

    #[test]
    fn viewport_half() {
        let v = Viewport::new(800.0, 600.0);
        assert_eq!(v.half(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn entity_ids_order_by_value() {
        let a = EntityId(1);
        let b = EntityId(2);
        assert!(a < b);
    }
}
