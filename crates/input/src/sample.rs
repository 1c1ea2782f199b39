use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One frame's worth of sampled input.
///
/// The platform layer fills this once per frame from whatever device it
/// polls. The simulation consumes `axis()` and `fire_aim()`, never the raw
/// booleans, so rebinding or adding devices does not touch world logic.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputSample {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire button held this frame.
    pub fire: bool,
    /// Aim point in world coordinates.
    pub aim: Vec2,
}

impl InputSample {
    /// Movement direction with components in {-1, 0, 1}. Y grows downward.
    /// Diagonals are deliberately not normalized; opposite directions cancel.
    pub fn axis(&self) -> Vec2 {
        let x = (self.right as i8 - self.left as i8) as f32;
        let y = (self.down as i8 - self.up as i8) as f32;
        Vec2::new(x, y)
    }

    /// The aim point, on frames the fire button is held.
    pub fn fire_aim(&self) -> Option<Vec2> {
        self.fire.then_some(self.aim)
    }
}
