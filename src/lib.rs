//! # Amazeing
//!
//! Generation, solving, encoding and independent verification of rectangular
//! grid mazes.
//!
//! ## Architecture Overview
//!
//! The crate is organised around a small number of components, leaves first:
//!
//! - **Grid Model**: cells stored as 4-bit wall masks, plus coordinate and
//!   adjacency queries
//! - **Generation System**: seeded spanning-tree carving, optional extra
//!   passages and the closed-cell "42" pattern
//! - **Solver**: breadth-first shortest path from entry to exit
//! - **Encoding**: the hex-row output file format
//! - **Validation**: re-derives every structural rule from a decoded maze and
//!   reports each violation it finds
//!
//! ## Data Flow
//!
//! ```text
//! MazeConfig -> MazeGenerator -> Maze -> solver -> Path -> encoder -> file
//! file -> decoder -> (Maze, Path) -> MazeValidator -> ValidationResult
//! ```

pub mod encoding;
pub mod generation;
pub mod grid;
pub mod utils;
pub mod validation;

pub use encoding::*;
pub use generation::*;
pub use grid::*;
pub use utils::*;
pub use validation::*;

/// Core error type for the maze toolkit.
#[derive(thiserror::Error, Debug)]
pub enum MazeError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration is malformed or semantically invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generation failed or was used out of order
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// No path exists between entry and exit
    #[error("Solving failed: {0}")]
    SolveFailed(String),

    /// Output file structure could not be decoded
    #[error("Malformed output file: {0}")]
    MalformedOutput(String),
}

/// Result type used throughout the crate.
pub type MazeResult<T> = Result<T, MazeError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generation defaults and fixed geometry.
pub mod defaults {
    /// Share of non-pattern cells that receive an extra passage in imperfect mode
    pub const EXTRA_PASSAGE_RATIO: f64 = 0.1;

    /// Side length of the forbidden fully open square
    pub const OPEN_AREA_SIDE: usize = 3;

    /// Width of the "42" glyph in cells
    pub const PATTERN_WIDTH: usize = 7;

    /// Height of the "42" glyph in cells
    pub const PATTERN_HEIGHT: usize = 5;

    /// Free cells required on every side of the glyph
    pub const PATTERN_MARGIN: usize = 1;
}
