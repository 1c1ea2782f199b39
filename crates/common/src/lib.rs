//! Shared value types for the scrollspace workspace.
//!
//! # Invariants
//! - `Rect` and `Viewport` carry no behavior beyond geometry; simulation
//!   rules live in the kernel.
//! - Entity ids are assigned by the world and never reused within a session.

pub mod types;

pub use types::{EntityId, Rect, SpriteHandle, Viewport};
