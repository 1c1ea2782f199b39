use glam::Vec2;
use scrollspace_common::Rect;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Velocity-magnitude limits for an integrated body.
///
/// The soft cap bounds velocity before friction is applied, the hard cap
/// after. The reference behavior sets both to 10.0, but they are kept as
/// separate values so divergent caps layer predictably.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionLimits {
    soft_cap: f32,
    max_speed: f32,
    friction: f32,
}

impl MotionLimits {
    pub fn new(soft_cap: f32, max_speed: f32, friction: f32) -> Result<Self, ConfigError> {
        if !(soft_cap > 0.0) {
            return Err(ConfigError::SoftCap(soft_cap));
        }
        if !(max_speed > 0.0) {
            return Err(ConfigError::MaxSpeed(max_speed));
        }
        if !(friction >= 0.0 && friction < 1.0) {
            return Err(ConfigError::Friction(friction));
        }
        Ok(Self {
            soft_cap,
            max_speed,
            friction,
        })
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }
}

impl Default for MotionLimits {
    /// Reference limits: both caps at 10 units/tick, 5% friction.
    fn default() -> Self {
        Self {
            soft_cap: 10.0,
            max_speed: 10.0,
            friction: 0.05,
        }
    }
}

/// Per-entity integrator state. Position lives on the owning entity's rect;
/// the body carries velocity and the per-tick force accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsBody {
    pub velocity: Vec2,
    acceleration: Vec2,
    limits: MotionLimits,
}

impl PhysicsBody {
    pub fn new(limits: MotionLimits) -> Self {
        Self {
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            limits,
        }
    }

    pub fn limits(&self) -> MotionLimits {
        self.limits
    }

    /// Accumulate a force for the upcoming integration step. Forces applied
    /// this tick affect this tick's velocity only; the accumulator is
    /// consumed and cleared by `integrate`.
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    /// Advance one tick and confine the owning rect to world bounds.
    ///
    /// Order matters: accumulated forces, then the soft cap, then friction,
    /// then the hard cap, then the position update and per-axis clamp. Both
    /// caps rescale only when the velocity exceeds them, so a zero-length
    /// velocity is never normalized.
    pub fn integrate(&mut self, rect: &mut Rect, bounds: &Rect) {
        self.velocity += self.acceleration;
        self.velocity = self.velocity.clamp_length_max(self.limits.soft_cap);
        self.velocity += self.velocity * -self.limits.friction;
        self.velocity = self.velocity.clamp_length_max(self.limits.max_speed);
        rect.min += self.velocity;
        rect.clamp_into(bounds);
        self.acceleration = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide_bounds() -> Rect {
        Rect::new(Vec2::new(-1e6, -1e6), Vec2::new(2e6, 2e6))
    }

    fn body(soft: f32, max: f32, friction: f32) -> PhysicsBody {
        PhysicsBody::new(MotionLimits::new(soft, max, friction).unwrap())
    }

    #[test]
    fn limits_validation() {
        assert!(MotionLimits::new(10.0, 10.0, 0.0).is_ok());
        assert!(matches!(
            MotionLimits::new(0.0, 10.0, 0.0),
            Err(ConfigError::SoftCap(_))
        ));
        assert!(matches!(
            MotionLimits::new(10.0, -1.0, 0.0),
            Err(ConfigError::MaxSpeed(_))
        ));
        assert!(matches!(
            MotionLimits::new(10.0, 10.0, 1.0),
            Err(ConfigError::Friction(_))
        ));
        assert!(matches!(
            MotionLimits::new(10.0, 10.0, -0.1),
            Err(ConfigError::Friction(_))
        ));
    }

    #[test]
    fn speed_never_exceeds_max_under_sustained_input() {
        let mut b = body(10.0, 10.0, 0.05);
        let mut rect = Rect::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        let bounds = wide_bounds();
        for _ in 0..1000 {
            b.apply_force(Vec2::new(50.0, 35.0));
            b.integrate(&mut rect, &bounds);
            assert!(b.velocity.length() <= 10.0 + 1e-4);
        }
    }

    #[test]
    fn friction_decays_velocity_toward_zero() {
        let mut b = body(10.0, 10.0, 0.05);
        b.velocity = Vec2::new(3.0, 4.0);
        let mut rect = Rect::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        let bounds = wide_bounds();
        let mut previous = b.velocity.length();
        for _ in 0..200 {
            b.integrate(&mut rect, &bounds);
            let speed = b.velocity.length();
            if previous > 1e-4 {
                assert!(speed < previous, "speed did not decrease: {speed} >= {previous}");
            }
            previous = speed;
        }
        assert!(previous < 1e-3);
    }

    #[test]
    fn zero_friction_preserves_speed() {
        let mut b = body(10.0, 10.0, 0.0);
        b.velocity = Vec2::new(2.0, 0.0);
        let mut rect = Rect::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        b.integrate(&mut rect, &wide_bounds());
        assert_eq!(b.velocity, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn force_does_not_persist_to_next_tick() {
        let mut b = body(100.0, 100.0, 0.0);
        let mut rect = Rect::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        let bounds = wide_bounds();

        b.apply_force(Vec2::new(1.0, 0.0));
        b.integrate(&mut rect, &bounds);
        assert_eq!(b.velocity, Vec2::new(1.0, 0.0));

        // No new force: velocity is unchanged, so the old force is gone.
        b.integrate(&mut rect, &bounds);
        assert_eq!(b.velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn soft_cap_applies_before_friction() {
        // soft 10, hard 20, friction 0.5: a 40-unit impulse is first cut to
        // 10, then friction halves it. Friction-before-soft-cap would end at
        // 10 instead of 5.
        let mut b = body(10.0, 20.0, 0.5);
        let mut rect = Rect::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        b.apply_force(Vec2::new(40.0, 0.0));
        b.integrate(&mut rect, &wide_bounds());
        assert!((b.velocity.x - 5.0).abs() < 1e-5);
    }

    #[test]
    fn hard_cap_applies_after_friction() {
        let mut b = body(10.0, 2.0, 0.0);
        b.velocity = Vec2::new(8.0, 0.0);
        let mut rect = Rect::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        b.integrate(&mut rect, &wide_bounds());
        assert!((b.velocity.x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn zero_velocity_stays_zero() {
        let mut b = body(10.0, 10.0, 0.05);
        let mut rect = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(1.0, 1.0));
        b.integrate(&mut rect, &wide_bounds());
        assert_eq!(b.velocity, Vec2::ZERO);
        assert!(b.velocity.x.is_finite() && b.velocity.y.is_finite());
        assert_eq!(rect.min, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn rect_stays_inside_bounds() {
        let bounds = Rect::new(Vec2::ZERO, Vec2::new(100.0, 80.0));
        let mut b = body(10.0, 10.0, 0.0);
        let mut rect = Rect::new(Vec2::new(50.0, 40.0), Vec2::new(4.0, 4.0));
        for i in 0..500 {
            let push = if i % 2 == 0 {
                Vec2::new(30.0, -12.0)
            } else {
                Vec2::new(-7.0, 25.0)
            };
            b.apply_force(push);
            b.integrate(&mut rect, &bounds);
            assert!(rect.contained_in(&bounds), "escaped at tick {i}: {rect:?}");
        }
    }
}
