//! # Validation Module
//!
//! Independent verification of decoded mazes and paths.
//!
//! Nothing here trusts the generator. Every rule is re-derived from the cell
//! masks, and every broken rule is collected into a [`ValidationResult`]
//! rather than stopping at the first one.

pub mod violations;

pub use violations::*;

use crate::defaults::OPEN_AREA_SIDE;
use crate::{encoding, ClosedPattern, DecodedMaze, Direction, Maze, MazeResult, Point};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Outcome of a validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True iff no violation was found
    pub ok: bool,
    /// Every violation, in check order
    pub violations: Vec<Violation>,
}

impl ValidationResult {
    fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            ok: violations.is_empty(),
            violations,
        }
    }

    /// Human-readable messages, one per violation.
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    /// Whether any violation is of the given kind.
    pub fn has(&self, kind: ViolationKind) -> bool {
        self.violations.iter().any(|v| v.kind() == kind)
    }
}

/// What the maze is expected to satisfy beyond the unconditional rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOptions {
    /// Require the open passages to form a spanning tree
    pub perfect: bool,
    /// Cells that must be fully walled. When set, no other cell may be.
    pub expected_closed: Option<ClosedPattern>,
}

/// Checks mazes, paths and output files.
#[derive(Debug, Clone, Copy, Default)]
pub struct MazeValidator;

impl MazeValidator {
    /// Creates a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Checks every structural rule of `maze`.
    ///
    /// Checks run in this order: dimensions, entry and exit, border walls,
    /// wall coherence, closed pattern, reachability, open areas and, for
    /// perfect mazes, the spanning-tree edge count. Non-positive dimensions
    /// stop the run because no other check is meaningful.
    ///
    /// # Examples
    ///
    /// ```
    /// use amazeing::{Maze, MazeValidator, Point, ValidationOptions, ViolationKind};
    ///
    /// let maze = Maze::new(2, 2, Point::new(0, 0), Point::new(1, 1));
    /// let report = MazeValidator::new().validate_maze(&maze, &ValidationOptions::default());
    /// assert!(!report.ok);
    /// assert!(report.has(ViolationKind::Connectivity));
    /// ```
    pub fn validate_maze(&self, maze: &Maze, options: &ValidationOptions) -> ValidationResult {
        let mut violations = Vec::new();

        if maze.width == 0 || maze.height == 0 {
            violations.push(Violation::NonPositiveDimensions {
                width: maze.width,
                height: maze.height,
            });
            return ValidationResult::from_violations(violations);
        }

        check_endpoints(maze, &mut violations);
        check_borders(maze, &mut violations);
        check_coherence(maze, &mut violations);

        let empty = ClosedPattern::new();
        let blocked = options.expected_closed.as_ref().unwrap_or(&empty);
        if let Some(expected) = &options.expected_closed {
            check_pattern(maze, expected, &mut violations);
        }

        let distances = bfs_distances(maze, maze.entry, blocked);
        let free_cells = maze.points().filter(|p| !blocked.contains(*p)).count();
        if distances.len() != free_cells {
            violations.push(Violation::Unreachable {
                reachable: distances.len(),
                expected: free_cells,
            });
        }

        check_open_areas(maze, options.expected_closed.as_ref(), &mut violations);

        if options.perfect {
            if distances.is_empty() {
                violations.push(Violation::PerfectEntryUnreachable);
            } else {
                let edges = count_undirected_edges(maze, blocked);
                if edges + 1 != free_cells {
                    violations.push(Violation::NotPerfect {
                        expected_edges: free_cells.saturating_sub(1),
                        edges,
                    });
                }
            }
        }

        debug!(
            "Validated {}x{} maze: {} violation(s)",
            maze.width,
            maze.height,
            violations.len()
        );
        ValidationResult::from_violations(violations)
    }

    /// Checks that `path` is a legal walk from entry to exit and as short as
    /// the breadth-first distance between them.
    ///
    /// Invalid symbols are reported before anything is replayed. The replay
    /// stops at the first step that crosses a wall or enters a pattern cell.
    /// The length comparison only runs when the walk itself is legal.
    pub fn validate_path_is_shortest(
        &self,
        maze: &Maze,
        path: &str,
        expected_closed: Option<&ClosedPattern>,
    ) -> ValidationResult {
        let mut violations = Vec::new();
        let empty = ClosedPattern::new();
        let blocked = expected_closed.unwrap_or(&empty);

        let mut steps = Vec::new();
        for (index, symbol) in path.trim().chars().enumerate() {
            match Direction::from_symbol(symbol) {
                Some(d) => steps.push(d),
                None => violations.push(Violation::InvalidPathCharacter { index, symbol }),
            }
        }
        if !violations.is_empty() {
            return ValidationResult::from_violations(violations);
        }

        let mut current = maze.entry;
        for (step, &direction) in steps.iter().enumerate() {
            if !maze.open_between(current, direction) {
                violations.push(Violation::WallCrossed {
                    step,
                    from: current,
                    direction,
                });
                break;
            }
            current = current.step(direction);
            if blocked.contains(current) {
                violations.push(Violation::BlockedStep { step, at: current });
                break;
            }
        }

        if violations.is_empty() && current != maze.exit {
            violations.push(Violation::PathEndsElsewhere {
                ended: current,
                expected: maze.exit,
            });
        }

        if violations.is_empty() {
            let distances = bfs_distances(maze, maze.entry, blocked);
            match distances.get(&maze.exit) {
                None => violations.push(Violation::ExitUnreachable),
                Some(&shortest) if shortest != steps.len() => {
                    violations.push(Violation::NotShortest {
                        length: steps.len(),
                        shortest,
                    })
                }
                Some(_) => {}
            }
        }

        ValidationResult::from_violations(violations)
    }

    /// Reads and decodes an output file with declared dimensions.
    ///
    /// Structural problems in the file are returned as
    /// [`MazeError::MalformedOutput`](crate::MazeError::MalformedOutput).
    pub fn validate_output_file(
        &self,
        file: impl AsRef<std::path::Path>,
        width: usize,
        height: usize,
    ) -> MazeResult<DecodedMaze> {
        encoding::read_file(file, width, height)
    }
}

fn check_endpoints(maze: &Maze, violations: &mut Vec<Violation>) {
    if !maze.in_bounds(maze.entry) {
        violations.push(Violation::EntryOutOfBounds(maze.entry));
    }
    if !maze.in_bounds(maze.exit) {
        violations.push(Violation::ExitOutOfBounds(maze.exit));
    }
    if maze.entry == maze.exit {
        violations.push(Violation::EntryEqualsExit(maze.entry));
    }
}

fn check_borders(maze: &Maze, violations: &mut Vec<Violation>) {
    let (w, h) = (maze.width as i32, maze.height as i32);
    let mut require = |at: Point, side: Direction| {
        if maze.cell(at).map_or(false, |c| !c.has_wall(side)) {
            violations.push(Violation::MissingBorderWall { at, side });
        }
    };

    for x in 0..w {
        require(Point::new(x, 0), Direction::North);
        require(Point::new(x, h - 1), Direction::South);
    }
    for y in 0..h {
        require(Point::new(0, y), Direction::West);
        require(Point::new(w - 1, y), Direction::East);
    }
}

/// Each adjacency is inspected once, from its west or north cell.
fn check_coherence(maze: &Maze, violations: &mut Vec<Violation>) {
    for p in maze.points() {
        for side in [Direction::East, Direction::South] {
            let neighbor = p.step(side);
            if let (Some(a), Some(b)) = (maze.cell(p), maze.cell(neighbor)) {
                if a.has_wall(side) != b.has_wall(side.opposite()) {
                    violations.push(Violation::IncoherentWall {
                        at: p,
                        side,
                        neighbor,
                    });
                }
            }
        }
    }
}

fn check_pattern(maze: &Maze, expected: &ClosedPattern, violations: &mut Vec<Violation>) {
    for p in expected.iter() {
        match maze.cell(p) {
            None => violations.push(Violation::PatternOutOfBounds(p)),
            Some(cell) if !cell.is_fully_closed() => {
                violations.push(Violation::PatternCellOpen {
                    at: p,
                    walls: cell.walls(),
                })
            }
            Some(_) => {}
        }
    }

    for p in maze.points() {
        if !expected.contains(p) && maze.cell(p).map_or(false, |c| c.is_fully_closed()) {
            violations.push(Violation::UnexpectedClosedCell(p));
        }
    }

    if expected.contains(maze.entry) {
        violations.push(Violation::EntryInPattern(maze.entry));
    }
    if expected.contains(maze.exit) {
        violations.push(Violation::ExitInPattern(maze.exit));
    }
}

fn check_open_areas(
    maze: &Maze,
    expected_closed: Option<&ClosedPattern>,
    violations: &mut Vec<Violation>,
) {
    let side = OPEN_AREA_SIDE as i32;
    for y in 0..=(maze.height as i32 - side) {
        for x in 0..=(maze.width as i32 - side) {
            let top_left = Point::new(x, y);
            if expected_closed.map_or(false, |c| c.overlaps_block(top_left)) {
                continue;
            }
            if maze.is_open_area(top_left) {
                violations.push(Violation::OpenArea { top_left });
            }
        }
    }
}

/// Breadth-first distances from `start`, never entering `blocked` cells.
///
/// Returns an empty map when `start` itself is blocked or off the grid.
pub fn bfs_distances(maze: &Maze, start: Point, blocked: &ClosedPattern) -> HashMap<Point, usize> {
    let mut distances = HashMap::new();
    if !maze.in_bounds(start) || blocked.contains(start) {
        return distances;
    }

    distances.insert(start, 0);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        let next_distance = distances[&current] + 1;
        for (d, next) in maze.neighbors(current) {
            if blocked.contains(next) || distances.contains_key(&next) {
                continue;
            }
            if maze.open_between(current, d) {
                distances.insert(next, next_distance);
                queue.push_back(next);
            }
        }
    }
    distances
}

/// Open passages between unblocked cells, each counted once via East/South.
pub fn count_undirected_edges(maze: &Maze, blocked: &ClosedPattern) -> usize {
    maze.points()
        .filter(|p| !blocked.contains(*p))
        .map(|p| {
            [Direction::East, Direction::South]
                .into_iter()
                .filter(|&d| {
                    let n = p.step(d);
                    maze.in_bounds(n) && !blocked.contains(n) && maze.open_between(p, d)
                })
                .count()
        })
        .sum()
}
