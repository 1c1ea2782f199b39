use glam::Vec2;
use scrollspace_common::{EntityId, Rect, SpriteHandle};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::body::{MotionLimits, PhysicsBody};
use crate::config::{ConfigError, WorldConfig, check_parallax};
use crate::projectile::Projectile;
use crate::steering::Steering;

/// How (and whether) an entity moves.
///
/// A tagged variant instead of per-entity capability probing: every entity
/// states up front which update passes apply to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Motion {
    /// Scenery: never moves.
    Static,
    /// Input-driven mover.
    Body(PhysicsBody),
    /// Pursuit agent chasing another entity.
    Steered { body: PhysicsBody, steering: Steering },
    /// Constant-velocity projectile with a finite lifetime.
    Projectile(Projectile),
}

/// Per-entity data stored in the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityData {
    /// World-space top-left plus extent.
    pub rect: Rect,
    pub sprite: SpriteHandle,
    /// Camera-offset multiplier in (0, 1]; 1.0 is the near plane and moves
    /// fully with the camera.
    pub parallax: f32,
    pub motion: Motion,
    /// Mark-for-removal flag; set during the update pass, compacted at end
    /// of frame so the collection is never mutated mid-iteration.
    dead: bool,
}

impl EntityData {
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    /// Vertical draw anchor: entities paint back-to-front in ascending
    /// anchor order.
    pub fn anchor_y(&self) -> f32 {
        self.rect.min.y + self.rect.size.y * 0.5
    }
}

/// A spawn request captured at fire time and applied at end of step.
#[derive(Debug, Clone, Copy)]
struct ProjectileRequest {
    origin: Vec2,
    aim: Vec2,
}

/// Summary of world state for tooling and the CLI.
#[derive(Debug, Clone, Copy)]
pub struct WorldSummary {
    pub tick: u64,
    pub entity_count: usize,
    pub projectile_count: usize,
}

/// The authoritative world state.
///
/// All mutations go through explicit operations; renderers and tooling only
/// read. Entities live in a BTreeMap keyed by sequential id, so iteration is
/// deterministic and follows spawn order (draw-order tie-breaking relies on
/// this).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    config: WorldConfig,
    entities: BTreeMap<EntityId, EntityData>,
    next_id: u64,
    tick: u64,
    /// Entity driven by the per-frame input sample, if any.
    controlled: Option<EntityId>,
    #[serde(skip)]
    pending_projectiles: Vec<ProjectileRequest>,
}

impl World {
    /// Create an empty world. Invalid configuration is fatal here, before
    /// the frame loop begins.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            entities: BTreeMap::new(),
            next_id: 0,
            tick: 0,
            controlled: None,
            pending_projectiles: Vec::new(),
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn bounds(&self) -> Rect {
        self.config.bounds
    }

    /// Current simulation tick.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Read-only access to all entities, in spawn order.
    pub fn entities(&self) -> &BTreeMap<EntityId, EntityData> {
        &self.entities
    }

    pub fn get(&self, id: EntityId) -> Option<&EntityData> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut EntityData> {
        self.entities.get_mut(&id)
    }

    /// Mark the entity the input sample drives.
    pub fn set_controlled(&mut self, id: EntityId) {
        self.controlled = Some(id);
    }

    pub fn controlled(&self) -> Option<EntityId> {
        self.controlled
    }

    pub fn summary(&self) -> WorldSummary {
        WorldSummary {
            tick: self.tick,
            entity_count: self.entities.len(),
            projectile_count: self
                .entities
                .values()
                .filter(|e| matches!(e.motion, Motion::Projectile(_)))
                .count(),
        }
    }

    /// Spawn a non-moving entity with the given parallax factor.
    pub fn spawn_scenery(
        &mut self,
        min: Vec2,
        size: Vec2,
        sprite: SpriteHandle,
        parallax: f32,
    ) -> Result<EntityId, ConfigError> {
        let parallax = check_parallax(parallax)?;
        Ok(self.insert(Rect::new(min, size), sprite, parallax, Motion::Static))
    }

    /// Spawn an input-drivable entity on the near plane.
    pub fn spawn_mover(
        &mut self,
        min: Vec2,
        size: Vec2,
        sprite: SpriteHandle,
        limits: MotionLimits,
    ) -> EntityId {
        self.insert(
            Rect::new(min, size),
            sprite,
            1.0,
            Motion::Body(PhysicsBody::new(limits)),
        )
    }

    /// Spawn a pursuit agent on the near plane.
    pub fn spawn_chaser(
        &mut self,
        min: Vec2,
        size: Vec2,
        sprite: SpriteHandle,
        limits: MotionLimits,
        steering: Steering,
    ) -> EntityId {
        self.insert(
            Rect::new(min, size),
            sprite,
            1.0,
            Motion::Steered {
                body: PhysicsBody::new(limits),
                steering,
            },
        )
    }

    /// Spawn a projectile immediately, centered on `origin`, flying at the
    /// raw displacement toward `aim`. Emitters normally go through
    /// `queue_projectile` instead.
    pub fn spawn_projectile(&mut self, origin: Vec2, aim: Vec2) -> EntityId {
        let extent = self.config.projectile.extent;
        let sprite = self.config.projectile.sprite;
        self.insert(
            Rect::new(origin - extent * 0.5, extent),
            sprite,
            1.0,
            Motion::Projectile(Projectile::new(origin, aim)),
        )
    }

    /// Request a projectile spawn. The world owns the projectile from the
    /// moment it enters the active set at the end of the current step; the
    /// emitter retains nothing.
    pub fn queue_projectile(&mut self, origin: Vec2, aim: Vec2) {
        self.pending_projectiles.push(ProjectileRequest { origin, aim });
    }

    /// Remove an entity. Returns its data if it existed.
    pub fn despawn(&mut self, id: EntityId) -> Option<EntityData> {
        let removed = self.entities.remove(&id);
        if removed.is_some() {
            tracing::debug!(?id, "despawned entity");
        }
        removed
    }

    /// Advance the simulation by one tick.
    ///
    /// `axis` is the movement direction for the controlled entity (components
    /// in {-1, 0, 1}); `fire` carries the world-space aim point on frames the
    /// fire button is pressed. Passes run in a fixed order: input, steering,
    /// integration, compaction, pending spawns.
    pub fn step(&mut self, axis: Vec2, fire: Option<Vec2>) {
        self.tick += 1;
        let _span = tracing::trace_span!("world_step", tick = self.tick).entered();

        self.apply_input(axis, fire);
        self.apply_steering();
        self.advance_motion();

        // Compaction: everything marked dead during the passes above.
        self.entities.retain(|_, e| !e.dead);

        let pending = std::mem::take(&mut self.pending_projectiles);
        for request in pending {
            self.spawn_projectile(request.origin, request.aim);
        }

        tracing::trace!(
            tick = self.tick,
            entities = self.entities.len(),
            "step complete"
        );
    }

    fn apply_input(&mut self, axis: Vec2, fire: Option<Vec2>) {
        let Some(id) = self.controlled else { return };
        let Some(origin) = self.entities.get(&id).map(|e| e.center()) else {
            return;
        };
        if let Some(aim) = fire {
            self.queue_projectile(origin, aim);
        }
        if let Some(entity) = self.entities.get_mut(&id) {
            if let Motion::Body(body) | Motion::Steered { body, .. } = &mut entity.motion {
                body.apply_force(axis * self.config.control_force);
            }
        }
    }

    fn apply_steering(&mut self) {
        // Resolve target centers first; a dangling target id skips the seek.
        let seeks: Vec<(EntityId, Vec2)> = self
            .entities
            .iter()
            .filter_map(|(id, e)| match &e.motion {
                Motion::Steered { steering, .. } => self
                    .entities
                    .get(&steering.target)
                    .map(|target| (*id, target.center())),
                _ => None,
            })
            .collect();

        for (id, target_center) in seeks {
            if let Some(entity) = self.entities.get_mut(&id) {
                let position = entity.center();
                if let Motion::Steered { body, steering } = &mut entity.motion {
                    steering.seek(body, position, target_center);
                }
            }
        }
    }

    fn advance_motion(&mut self) {
        let bounds = self.config.bounds;
        for (id, entity) in self.entities.iter_mut() {
            match &mut entity.motion {
                Motion::Static => {}
                Motion::Body(body) | Motion::Steered { body, .. } => {
                    body.integrate(&mut entity.rect, &bounds);
                }
                Motion::Projectile(projectile) => {
                    if projectile.advance(&mut entity.rect) {
                        entity.dead = true;
                        tracing::debug!(?id, "projectile expired");
                    }
                }
            }
        }
    }

    fn insert(
        &mut self,
        mut rect: Rect,
        sprite: SpriteHandle,
        parallax: f32,
        motion: Motion,
    ) -> EntityId {
        // Out-of-bounds spawn positions are neutralized, not rejected.
        rect.clamp_into(&self.config.bounds);
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(
            id,
            EntityData {
                rect,
                sprite,
                parallax,
                motion,
                dead: false,
            },
        );
        tracing::debug!(?id, "spawned entity");
        id
    }
}
