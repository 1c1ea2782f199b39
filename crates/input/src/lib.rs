//! Per-frame input sampling.
//!
//! # Invariants
//! - The kernel consumes the derived movement axis and aim point, never raw
//!   input events.
//! - One sample per frame; a sample is immutable once taken.

pub mod sample;

pub use sample::InputSample;
