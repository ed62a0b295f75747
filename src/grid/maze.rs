//! # Maze Grid
//!
//! The maze owns its cells and answers every coordinate and adjacency query
//! the generator, solver and validator need.

use super::{Cell, Direction, Point};
use crate::defaults::OPEN_AREA_SIDE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A rectangular maze of wall-mask cells with an entry and an exit.
///
/// `Maze::new` does not check that entry and exit are distinct or in bounds.
/// A decoded maze may legitimately violate those rules and the validator is
/// the component that reports it. Configuration checks happen in
/// [`MazeConfig::validate`](crate::MazeConfig::validate) before generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Where every path starts
    pub entry: Point,
    /// Where every path must end
    pub exit: Point,
    /// Row-major cells
    cells: Vec<Cell>,
}

impl Maze {
    /// Creates a maze with every cell fully enclosed.
    ///
    /// # Examples
    ///
    /// ```
    /// use amazeing::{Maze, Point};
    ///
    /// let maze = Maze::new(4, 3, Point::new(0, 0), Point::new(3, 2));
    /// assert_eq!(maze.cell_count(), 12);
    /// assert!(maze.cells().iter().all(|c| c.is_fully_closed()));
    /// ```
    pub fn new(width: usize, height: usize, entry: Point, exit: Point) -> Self {
        Self {
            width,
            height,
            entry,
            exit,
            cells: vec![Cell::default(); width * height],
        }
    }

    /// Builds a maze from row-major cells.
    ///
    /// Returns None unless `cells` holds exactly `width * height` entries.
    pub fn from_cells(
        width: usize,
        height: usize,
        entry: Point,
        exit: Point,
        cells: Vec<Cell>,
    ) -> Option<Self> {
        if width.checked_mul(height) != Some(cells.len()) {
            return None;
        }
        Some(Self {
            width,
            height,
            entry,
            exit,
            cells,
        })
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// True iff `0 <= x < width` and `0 <= y < height`.
    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    fn index(&self, p: Point) -> Option<usize> {
        if self.in_bounds(p) {
            Some(p.y as usize * self.width + p.x as usize)
        } else {
            None
        }
    }

    /// Gets the cell at `p`, or None when `p` is outside the grid.
    pub fn cell(&self, p: Point) -> Option<Cell> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Gets a mutable reference to the cell at `p`.
    pub fn cell_mut(&mut self, p: Point) -> Option<&mut Cell> {
        match self.index(p) {
            Some(i) => Some(&mut self.cells[i]),
            None => None,
        }
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterates over the grid one row at a time.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks() panics on 0, and a zero-width maze has no rows anyway
        self.cells.chunks(self.width.max(1))
    }

    /// Every point of the grid in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| Point::new(x, y)))
    }

    /// In-bounds neighbours of `p`, in North, East, South, West order.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = (Direction, Point)> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |d| (d, p.step(d)))
            .filter(move |(_, n)| self.in_bounds(*n))
    }

    /// Whether there is a passage from `a` to its neighbour in `direction`.
    ///
    /// Both sides of the shared edge must be open and the neighbour must be
    /// inside the grid. This is the only definition of connectivity used in
    /// the crate.
    pub fn open_between(&self, a: Point, direction: Direction) -> bool {
        let b = a.step(direction);
        match (self.cell(a), self.cell(b)) {
            (Some(ca), Some(cb)) => {
                !ca.has_wall(direction) && !cb.has_wall(direction.opposite())
            }
            _ => false,
        }
    }

    /// Opens the wall between `a` and its neighbour on both sides.
    ///
    /// Returns false and leaves the grid untouched if either cell is outside
    /// the grid, so border walls can never be opened.
    pub fn open_wall(&mut self, a: Point, direction: Direction) -> bool {
        self.set_wall_pair(a, direction, false)
    }

    /// Closes the wall between `a` and its neighbour on both sides.
    pub fn close_wall(&mut self, a: Point, direction: Direction) -> bool {
        self.set_wall_pair(a, direction, true)
    }

    fn set_wall_pair(&mut self, a: Point, direction: Direction, closed: bool) -> bool {
        let b = a.step(direction);
        let (Some(ia), Some(ib)) = (self.index(a), self.index(b)) else {
            return false;
        };
        if closed {
            self.cells[ia].close(direction);
            self.cells[ib].close(direction.opposite());
        } else {
            self.cells[ia].open(direction);
            self.cells[ib].open(direction.opposite());
        }
        true
    }

    /// Whether the 3x3 block with top-left corner `top_left` lies inside the
    /// grid and has all twelve internal passages open.
    pub fn is_open_area(&self, top_left: Point) -> bool {
        let side = OPEN_AREA_SIDE as i32;
        let far = Point::new(top_left.x + side - 1, top_left.y + side - 1);
        if !self.in_bounds(top_left) || !self.in_bounds(far) {
            return false;
        }

        let horizontal = (0..side).all(|dy| {
            (0..side - 1).all(|dx| {
                self.open_between(
                    Point::new(top_left.x + dx, top_left.y + dy),
                    Direction::East,
                )
            })
        });

        horizontal
            && (0..side - 1).all(|dy| {
                (0..side).all(|dx| {
                    self.open_between(
                        Point::new(top_left.x + dx, top_left.y + dy),
                        Direction::South,
                    )
                })
            })
    }
}

/// Cells that must stay fully walled and are excluded from connectivity.
///
/// Iteration is ordered by `(x, y)` so every report built from a pattern is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedPattern {
    cells: BTreeSet<Point>,
}

impl ClosedPattern {
    /// Creates an empty pattern.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a cell to the pattern.
    pub fn insert(&mut self, p: Point) {
        self.cells.insert(p);
    }

    /// Whether `p` belongs to the pattern.
    pub fn contains(&self, p: Point) -> bool {
        self.cells.contains(&p)
    }

    /// Number of pattern cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the pattern is empty.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over pattern cells.
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells.iter().copied()
    }

    /// Whether any cell of the 3x3 block at `top_left` is a pattern cell.
    pub fn overlaps_block(&self, top_left: Point) -> bool {
        let side = OPEN_AREA_SIDE as i32;
        (0..side).any(|dy| {
            (0..side).any(|dx| self.contains(Point::new(top_left.x + dx, top_left.y + dy)))
        })
    }
}

impl FromIterator<Point> for ClosedPattern {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_open_interior(width: usize, height: usize) -> Maze {
        let mut maze = Maze::new(width, height, Point::new(0, 0), Point::new(1, 0));
        let points: Vec<Point> = maze.points().collect();
        for p in points {
            maze.open_wall(p, Direction::East);
            maze.open_wall(p, Direction::South);
        }
        maze
    }

    #[test]
    fn test_bounds() {
        let maze = Maze::new(5, 3, Point::new(0, 0), Point::new(4, 2));
        assert!(maze.in_bounds(Point::new(0, 0)));
        assert!(maze.in_bounds(Point::new(4, 2)));
        assert!(!maze.in_bounds(Point::new(5, 2)));
        assert!(!maze.in_bounds(Point::new(4, 3)));
        assert!(!maze.in_bounds(Point::new(-1, 0)));
        assert!(maze.cell(Point::new(5, 0)).is_none());
    }

    #[test]
    fn test_from_cells_checks_cell_count() {
        let (entry, exit) = (Point::new(0, 0), Point::new(1, 0));
        let maze = Maze::from_cells(2, 1, entry, exit, vec![Cell::from_mask(0xD), Cell::from_mask(0x7)])
            .unwrap();
        assert!(!maze.cell(entry).unwrap().has_wall(Direction::East));

        assert!(Maze::from_cells(3, 1, entry, exit, vec![Cell::default(); 2]).is_none());
        assert!(Maze::from_cells(usize::MAX, 2, entry, exit, Vec::new()).is_none());
    }

    #[test]
    fn test_points_are_row_major() {
        let maze = Maze::new(2, 2, Point::new(0, 0), Point::new(1, 1));
        let points: Vec<Point> = maze.points().collect();
        assert_eq!(
            points,
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(0, 1),
                Point::new(1, 1)
            ]
        );
        assert_eq!(maze.rows().count(), 2);
    }

    #[test]
    fn test_neighbors_respect_bounds_and_order() {
        let maze = Maze::new(3, 3, Point::new(0, 0), Point::new(2, 2));
        let corner: Vec<Direction> = maze.neighbors(Point::new(0, 0)).map(|(d, _)| d).collect();
        assert_eq!(corner, vec![Direction::East, Direction::South]);

        let center: Vec<Direction> = maze.neighbors(Point::new(1, 1)).map(|(d, _)| d).collect();
        assert_eq!(center, Direction::ALL.to_vec());
    }

    #[test]
    fn test_open_wall_is_paired() {
        let mut maze = Maze::new(3, 3, Point::new(0, 0), Point::new(2, 2));
        assert!(maze.open_wall(Point::new(1, 1), Direction::North));

        let cell = maze.cell(Point::new(1, 1)).unwrap();
        let above = maze.cell(Point::new(1, 0)).unwrap();
        assert!(!cell.has_wall(Direction::North));
        assert!(!above.has_wall(Direction::South));
        assert!(maze.open_between(Point::new(1, 1), Direction::North));
        assert!(maze.open_between(Point::new(1, 0), Direction::South));

        assert!(maze.close_wall(Point::new(1, 0), Direction::South));
        assert!(!maze.open_between(Point::new(1, 1), Direction::North));
        assert!(maze.cell(Point::new(1, 1)).unwrap().is_fully_closed());
    }

    #[test]
    fn test_border_walls_cannot_be_opened() {
        let mut maze = Maze::new(2, 2, Point::new(0, 0), Point::new(1, 1));
        assert!(!maze.open_wall(Point::new(0, 0), Direction::North));
        assert!(!maze.open_wall(Point::new(1, 1), Direction::East));
        assert!(maze.cells().iter().all(|c| c.is_fully_closed()));
    }

    #[test]
    fn test_open_between_requires_both_sides() {
        let mut maze = Maze::new(2, 1, Point::new(0, 0), Point::new(1, 0));
        maze.cell_mut(Point::new(0, 0)).unwrap().open(Direction::East);
        assert!(!maze.open_between(Point::new(0, 0), Direction::East));
        assert!(!maze.open_between(Point::new(1, 0), Direction::West));

        maze.cell_mut(Point::new(1, 0)).unwrap().open(Direction::West);
        assert!(maze.open_between(Point::new(0, 0), Direction::East));
    }

    #[test]
    fn test_open_area_detection() {
        let mut maze = all_open_interior(4, 4);
        assert!(maze.is_open_area(Point::new(0, 0)));
        assert!(maze.is_open_area(Point::new(1, 1)));
        assert!(!maze.is_open_area(Point::new(2, 2)));

        maze.close_wall(Point::new(1, 1), Direction::South);
        assert!(!maze.is_open_area(Point::new(0, 0)));
        assert!(!maze.is_open_area(Point::new(1, 0)));
        assert!(!maze.is_open_area(Point::new(1, 1)));
    }

    #[test]
    fn test_closed_pattern_queries() {
        let pattern: ClosedPattern = [Point::new(4, 4), Point::new(1, 1)].into_iter().collect();
        assert_eq!(pattern.len(), 2);
        assert!(pattern.contains(Point::new(1, 1)));
        assert!(!pattern.contains(Point::new(0, 0)));
        assert_eq!(pattern.iter().next(), Some(Point::new(1, 1)));
        assert!(pattern.overlaps_block(Point::new(0, 0)));
        assert!(pattern.overlaps_block(Point::new(2, 2)));
        assert!(!pattern.overlaps_block(Point::new(5, 5)));
    }
}
