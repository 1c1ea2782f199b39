use glam::Vec2;
use scrollspace_common::{Rect, SpriteHandle};
use serde::{Deserialize, Serialize};

/// Errors from world and entity configuration.
///
/// Configuration is validated at construction, before the frame loop begins.
/// Nothing here is recoverable mid-session.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("world size must be positive, got {width}x{height}")]
    WorldSize { width: f32, height: f32 },
    #[error("max speed must be positive, got {0}")]
    MaxSpeed(f32),
    #[error("soft speed cap must be positive, got {0}")]
    SoftCap(f32),
    #[error("friction coefficient must be in [0, 1), got {0}")]
    Friction(f32),
    #[error("max steering force must be positive, got {0}")]
    MaxForce(f32),
    #[error("max seek speed must be positive, got {0}")]
    SeekSpeed(f32),
    #[error("parallax factor must be in (0, 1], got {0}")]
    Parallax(f32),
}

/// Spawn parameters shared by every projectile emitter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProjectileParams {
    pub extent: Vec2,
    pub sprite: SpriteHandle,
}

/// World configuration, fixed at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Rectangle all entities and the camera are confined to.
    pub bounds: Rect,
    /// Force applied per axis of held movement input on the controlled entity.
    pub control_force: f32,
    pub projectile: ProjectileParams,
}

impl WorldConfig {
    /// Reject invalid configuration before the frame loop starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // The negated comparison also rejects NaN.
        if !(self.bounds.size.x > 0.0 && self.bounds.size.y > 0.0) {
            return Err(ConfigError::WorldSize {
                width: self.bounds.size.x,
                height: self.bounds.size.y,
            });
        }
        Ok(())
    }
}

/// Parallax factors live in (0, 1]; 1.0 is the near plane.
pub(crate) fn check_parallax(factor: f32) -> Result<f32, ConfigError> {
    if factor > 0.0 && factor <= 1.0 {
        Ok(factor)
    } else {
        Err(ConfigError::Parallax(factor))
    }
}
