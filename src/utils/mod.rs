//! # Utilities Module
//!
//! Shortest-path solving and text rendering on top of the grid model.

pub mod pathfinding;
pub mod render;

pub use pathfinding::*;
pub use render::*;
