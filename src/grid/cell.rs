//! # Cell Wall Masks
//!
//! A cell is a 4-bit set of walls. A set bit means the wall is present.

use super::Direction;
use serde::{Deserialize, Serialize};

/// Mask with every wall present.
pub const ALL_WALLS: u8 = 0b1111;

/// A single grid cell stored as a wall mask.
///
/// The default cell is fully enclosed, which is the state every cell starts in
/// before carving.
///
/// # Examples
///
/// ```
/// use amazeing::{Cell, Direction};
///
/// let mut cell = Cell::default();
/// assert!(cell.is_fully_closed());
///
/// cell.open(Direction::East);
/// assert!(!cell.has_wall(Direction::East));
/// assert_eq!(cell.to_hex_digit(), 'D');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    walls: u8,
}

impl Default for Cell {
    fn default() -> Self {
        Self { walls: ALL_WALLS }
    }
}

impl Cell {
    /// Creates a cell from a raw mask. Bits above bit 3 are discarded.
    pub fn from_mask(mask: u8) -> Self {
        Self {
            walls: mask & ALL_WALLS,
        }
    }

    /// Creates a cell with no walls at all.
    pub fn open_all() -> Self {
        Self { walls: 0 }
    }

    /// Raw wall mask in `0..=15`.
    pub fn walls(self) -> u8 {
        self.walls
    }

    /// Whether the wall on `direction` is present.
    pub fn has_wall(self, direction: Direction) -> bool {
        self.walls & (1 << direction.bit()) != 0
    }

    /// Removes the wall on `direction`.
    ///
    /// This only touches one side of the shared edge. Use
    /// [`Maze::open_wall`](crate::Maze::open_wall) to keep neighbours coherent.
    pub fn open(&mut self, direction: Direction) {
        self.walls &= !(1 << direction.bit());
    }

    /// Puts the wall on `direction` back.
    pub fn close(&mut self, direction: Direction) {
        self.walls |= 1 << direction.bit();
    }

    /// Whether all four walls are present.
    pub fn is_fully_closed(self) -> bool {
        self.walls == ALL_WALLS
    }

    /// Renders the mask as one uppercase hexadecimal digit.
    pub fn to_hex_digit(self) -> char {
        // walls is always <= 15
        char::from_digit(self.walls as u32, 16)
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('F')
    }

    /// Parses a single hexadecimal digit (either case).
    pub fn from_hex_digit(digit: char) -> Option<Self> {
        digit.to_digit(16).map(|v| Self::from_mask(v as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_fully_closed() {
        let cell = Cell::default();
        assert_eq!(cell.walls(), 0b1111);
        assert!(cell.is_fully_closed());
        assert_eq!(cell.to_hex_digit(), 'F');
    }

    #[test]
    fn test_open_and_close_single_walls() {
        let mut cell = Cell::default();
        cell.open(Direction::North);
        cell.open(Direction::South);
        assert_eq!(cell.walls(), 0b1010);
        assert!(!cell.has_wall(Direction::North));
        assert!(cell.has_wall(Direction::East));

        cell.close(Direction::North);
        assert_eq!(cell.walls(), 0b1011);
    }

    #[test]
    fn test_hex_digits() {
        assert_eq!(Cell::open_all().to_hex_digit(), '0');
        assert_eq!(Cell::from_mask(0xA).to_hex_digit(), 'A');
        assert_eq!(Cell::from_hex_digit('c'), Some(Cell::from_mask(12)));
        assert_eq!(Cell::from_hex_digit('G'), None);
        assert_eq!(Cell::from_mask(0xFF).walls(), 0xF);
    }
}
