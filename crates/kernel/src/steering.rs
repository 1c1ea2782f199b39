use glam::Vec2;
use scrollspace_common::EntityId;
use serde::{Deserialize, Serialize};

use crate::body::PhysicsBody;
use crate::config::ConfigError;

/// Seek/chase parameters for a pursuit agent.
///
/// The agent chases the referenced target entity; the target is observed by
/// id and never owned, so a despawned target simply stops the pursuit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Steering {
    pub target: EntityId,
    max_force: f32,
    max_seek_speed: f32,
}

impl Steering {
    pub fn new(target: EntityId, max_force: f32, max_seek_speed: f32) -> Result<Self, ConfigError> {
        if !(max_force > 0.0) {
            return Err(ConfigError::MaxForce(max_force));
        }
        if !(max_seek_speed > 0.0) {
            return Err(ConfigError::SeekSpeed(max_seek_speed));
        }
        Ok(Self {
            target,
            max_force,
            max_seek_speed,
        })
    }

    pub fn max_force(&self) -> f32 {
        self.max_force
    }

    /// Accumulate a bounded steering force driving `body` toward
    /// `target_position`. Runs once per frame, before `integrate`.
    ///
    /// When the agent sits exactly on the target the desired velocity is the
    /// zero vector and the steering force reduces to bounded deceleration.
    pub fn seek(&self, body: &mut PhysicsBody, position: Vec2, target_position: Vec2) {
        let desired = (target_position - position).normalize_or_zero() * self.max_seek_speed;
        let steer = (desired - body.velocity).clamp_length_max(self.max_force);
        body.apply_force(steer);
    }
}
