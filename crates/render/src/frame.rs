use glam::Vec2;
use scrollspace_common::SpriteHandle;
use scrollspace_kernel::{EntityData, World};

use crate::camera::Camera;

/// A single draw instruction: screen-space position plus sprite handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub screen_pos: Vec2,
    pub sprite: SpriteHandle,
}

/// Draw sink collaborator. Receives commands in back-to-front order and has
/// no opinion about world coordinates.
pub trait DrawSink {
    fn submit(&mut self, command: DrawCommand);
}

/// Build this frame's draw queue: every entity, in ascending vertical-anchor
/// order, projected through the camera with its parallax factor.
///
/// The sort is stable, so entities with equal anchors keep their spawn
/// order and never flicker. The returned iterator is finite, rebuilt from
/// scratch each frame, and meant to be consumed exactly once.
pub fn draw_queue<'a>(
    world: &'a World,
    camera: &'a Camera,
) -> impl Iterator<Item = DrawCommand> + 'a {
    let mut ordered: Vec<&EntityData> = world.entities().values().collect();
    ordered.sort_by(|a, b| a.anchor_y().total_cmp(&b.anchor_y()));
    ordered.into_iter().map(|entity| DrawCommand {
        screen_pos: camera.project(entity.rect.min, entity.parallax),
        sprite: entity.sprite,
    })
}

/// Drain the frame's draw queue into a sink.
pub fn render_frame(world: &World, camera: &Camera, sink: &mut impl DrawSink) {
    let mut submitted = 0usize;
    for command in draw_queue(world, camera) {
        sink.submit(command);
        submitted += 1;
    }
    tracing::trace!(submitted, "frame rendered");
}

/// Debug sink that renders commands as text lines. Useful for CLI output
/// and for testing the sink interface without a GPU backend.
#[derive(Debug, Default)]
pub struct TextSink {
    lines: Vec<String>,
}

impl TextSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_text(self) -> String {
        self.lines.join("\n")
    }
}

impl DrawSink for TextSink {
    fn submit(&mut self, command: DrawCommand) {
        self.lines.push(format!(
            "sprite {:>3} at ({:8.2}, {:8.2})",
            command.sprite.0, command.screen_pos.x, command.screen_pos.y
        ));
    }
}
