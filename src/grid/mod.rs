//! # Grid Module
//!
//! Coordinates, directions and the wall-mask grid that every other component
//! operates on.
//!
//! The grid is row-major with its origin at the top-left corner: `x` grows to
//! the east and `y` grows to the south.

pub mod cell;
pub mod maze;
pub mod path;

pub use cell::*;
pub use maze::*;
pub use path::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a 2D coordinate on the grid.
///
/// Coordinates are signed so that stepping off the edge of the grid yields a
/// representable point which [`Maze::in_bounds`] can then reject.
///
/// # Examples
///
/// ```
/// use amazeing::Point;
///
/// let p = Point::new(3, 4);
/// assert_eq!(p.x, 3);
/// assert_eq!(p.y, 4);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Creates a new point with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring point one step in `direction`.
    ///
    /// # Examples
    ///
    /// ```
    /// use amazeing::{Direction, Point};
    ///
    /// assert_eq!(Point::new(2, 2).step(Direction::North), Point::new(2, 1));
    /// assert_eq!(Point::new(0, 0).step(Direction::West), Point::new(-1, 0));
    /// ```
    pub fn step(self, direction: Direction) -> Point {
        self + direction.to_delta()
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// The four cardinal directions.
///
/// Each direction owns one bit of a [`Cell`] wall mask: North is bit 0, East
/// bit 1, South bit 2 and West bit 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions in visitation order. Every neighbour scan in the crate
    /// iterates in this order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Bit position of this direction inside a wall mask.
    pub fn bit(self) -> u8 {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// Converts a direction to a unit point delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use amazeing::{Direction, Point};
    ///
    /// let delta = Direction::North.to_delta();
    /// assert_eq!(delta, Point::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Point {
        match self {
            Direction::North => Point::new(0, -1),
            Direction::East => Point::new(1, 0),
            Direction::South => Point::new(0, 1),
            Direction::West => Point::new(-1, 0),
        }
    }

    /// Converts a unit delta back into a direction.
    ///
    /// Returns None if the delta is not a single cardinal step.
    pub fn from_delta(delta: Point) -> Option<Direction> {
        match (delta.x, delta.y) {
            (0, -1) => Some(Direction::North),
            (1, 0) => Some(Direction::East),
            (0, 1) => Some(Direction::South),
            (-1, 0) => Some(Direction::West),
            _ => None,
        }
    }

    /// Returns the direction pointing the other way.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Single-letter symbol used in path strings.
    pub fn symbol(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }

    /// Parses a path symbol. Only uppercase `N`, `E`, `S` and `W` are accepted.
    pub fn from_symbol(symbol: char) -> Option<Direction> {
        match symbol {
            'N' => Some(Direction::North),
            'E' => Some(Direction::East),
            'S' => Some(Direction::South),
            'W' => Some(Direction::West),
            _ => None,
        }
    }

    /// Upper-case name, as used in violation messages.
    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "NORTH",
            Direction::East => "EAST",
            Direction::South => "SOUTH",
            Direction::West => "WEST",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
