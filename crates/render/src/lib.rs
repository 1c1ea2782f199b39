//! Rendering adapter: camera projection and the depth-sorted draw queue.
//!
//! # Invariants
//! - Rendering reads world state and never mutates it.
//! - The draw queue is rebuilt from scratch every frame; nothing persists
//!   across frames.

pub mod camera;
pub mod frame;

pub use camera::{Camera, CameraError, FollowMode};
pub use frame::{DrawCommand, DrawSink, TextSink, draw_queue, render_frame};
