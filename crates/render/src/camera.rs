use glam::Vec2;
use scrollspace_common::{EntityId, Rect, Viewport};
use scrollspace_kernel::World;

/// How the camera tracks its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FollowMode {
    /// Exactly centered on the target every frame.
    Instant,
    /// First-order exponential smoothing of the view center toward the
    /// target center; `speed = 1.0` degenerates to `Instant`.
    Smoothed { speed: f32 },
}

/// Errors from camera configuration. Fatal at construction, before the
/// frame loop begins.
#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    #[error("viewport must be positive, got {width}x{height}")]
    Viewport { width: f32, height: f32 },
    #[error("smoothing speed must be in (0, 1], got {0}")]
    SmoothingSpeed(f32),
}

/// A scrolling camera over a bounded world.
///
/// `offset` is the world-space top-left of the viewport. The camera observes
/// its target entity by id and never owns it; a despawned target freezes the
/// view where it is.
#[derive(Debug, Clone)]
pub struct Camera {
    offset: Vec2,
    viewport: Viewport,
    mode: FollowMode,
    target: EntityId,
    bounds: Rect,
}

impl Camera {
    /// Create a camera confined to `bounds`, starting at the world origin.
    pub fn new(
        viewport: Viewport,
        mode: FollowMode,
        target: EntityId,
        bounds: Rect,
    ) -> Result<Self, CameraError> {
        if !(viewport.width > 0.0 && viewport.height > 0.0) {
            return Err(CameraError::Viewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if let FollowMode::Smoothed { speed } = mode {
            if !(speed > 0.0 && speed <= 1.0) {
                return Err(CameraError::SmoothingSpeed(speed));
            }
        }
        Ok(Self {
            offset: bounds.min,
            viewport,
            mode,
            target,
            bounds,
        })
    }

    /// World-space top-left of the viewport.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// World-space center of the viewport.
    pub fn view_center(&self) -> Vec2 {
        self.offset + self.viewport.half()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn target(&self) -> EntityId {
        self.target
    }

    pub fn set_target(&mut self, target: EntityId) {
        self.target = target;
    }

    /// Re-center on the target for this frame, then confine the view to
    /// world bounds. A missing target leaves the offset unchanged.
    pub fn update(&mut self, world: &World) {
        let Some(target) = world.get(self.target) else {
            return;
        };
        let target_center = target.center();
        match self.mode {
            FollowMode::Instant => {
                self.offset = target_center - self.viewport.half();
            }
            FollowMode::Smoothed { speed } => {
                self.offset += (target_center - self.view_center()) * speed;
            }
        }
        self.clamp_to_bounds();
        tracing::trace!(offset = ?self.offset, "camera updated");
    }

    /// Project a world position to screen space. Pure; parallax scales how
    /// much of the camera offset applies (1.0 = near plane, moves fully
    /// with the camera).
    pub fn project(&self, world_pos: Vec2, parallax: f32) -> Vec2 {
        world_pos - self.offset * parallax
    }

    /// Per-axis clamp of the camera rect into world bounds. An axis where
    /// the world is smaller than the viewport is left unclamped; the view
    /// may show out-of-world margin there.
    fn clamp_to_bounds(&mut self) {
        let max = self.bounds.max() - self.viewport.size();
        if self.bounds.size.x >= self.viewport.width {
            self.offset.x = self.offset.x.clamp(self.bounds.min.x, max.x);
        }
        if self.bounds.size.y >= self.viewport.height {
            self.offset.y = self.offset.y.clamp(self.bounds.min.y, max.y);
        }
    }
}
