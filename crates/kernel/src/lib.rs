//! Simulation kernel: authoritative world state and the per-tick step.
//!
//! # Invariants
//! - One step per rendered frame; all per-frame work completes synchronously.
//! - After every integration step, `|velocity| <= max_speed` and every
//!   integrated entity rect lies inside world bounds.
//! - Entity removal is mark-then-compact; the entity collection is never
//!   mutated while it is being iterated.

pub mod body;
pub mod config;
pub mod projectile;
pub mod steering;
pub mod world;

pub use body::{MotionLimits, PhysicsBody};
pub use config::{ConfigError, ProjectileParams, WorldConfig};
pub use projectile::{LIFE_LIMIT, Projectile};
pub use steering::Steering;
pub use world::{EntityData, Motion, World, WorldSummary};
