use glam::Vec2;
use scrollspace_common::Rect;
use serde::{Deserialize, Serialize};

/// Ticks a projectile survives after spawn. Expiry fires on the tick its
/// life counter first exceeds this.
pub const LIFE_LIMIT: u32 = 180;

/// Constant-velocity projectile with a finite lifetime.
///
/// Projectiles accumulate no forces: no steering, no friction, no speed
/// caps. They pass through every other entity; collision is a collaborator
/// concern, not the kernel's.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub velocity: Vec2,
    life: u32,
}

impl Projectile {
    /// Spawn velocity is the raw displacement from origin to aim point, so
    /// speed scales with aim distance. Reference behavior, kept as-is.
    pub fn new(origin: Vec2, aim: Vec2) -> Self {
        Self {
            velocity: aim - origin,
            life: 0,
        }
    }

    pub fn life(&self) -> u32 {
        self.life
    }

    /// Advance one tick. Returns true once the projectile has outlived
    /// `LIFE_LIMIT` and should be removed from the active set.
    pub fn advance(&mut self, rect: &mut Rect) -> bool {
        self.life += 1;
        rect.min += self.velocity;
        self.life > LIFE_LIMIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_velocity_is_raw_displacement() {
        let p = Projectile::new(Vec2::new(10.0, 10.0), Vec2::new(13.0, 14.0));
        assert_eq!(p.velocity, Vec2::new(3.0, 4.0));
        // Magnitude equals spawn-time distance to the aim point.
        assert!((p.velocity.length() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn advance_moves_by_velocity() {
        let mut p = Projectile::new(Vec2::ZERO, Vec2::new(2.0, -1.0));
        let mut rect = Rect::new(Vec2::new(100.0, 100.0), Vec2::new(4.0, 4.0));
        p.advance(&mut rect);
        assert_eq!(rect.min, Vec2::new(102.0, 99.0));
    }

    #[test]
    fn expires_on_the_181st_advance() {
        let mut p = Projectile::new(Vec2::ZERO, Vec2::new(1.0, 0.0));
        let mut rect = Rect::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        for call in 1..=LIFE_LIMIT {
            assert!(!p.advance(&mut rect), "expired early at call {call}");
        }
        assert_eq!(p.life(), LIFE_LIMIT);
        assert!(p.advance(&mut rect));
    }
}
