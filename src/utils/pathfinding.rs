//! # Pathfinding
//!
//! Breadth-first shortest path from a maze's entry to its exit.

use crate::{Direction, Maze, MazeError, MazeResult, Path, Point};
use ::pathfinding::prelude::bfs;

/// Open neighbours of `p`, in North, East, South, West order.
fn successors(maze: &Maze, p: Point) -> Vec<Point> {
    maze.neighbors(p)
        .filter(|(d, _)| maze.open_between(p, *d))
        .map(|(_, n)| n)
        .collect()
}

/// Computes a shortest direction path from entry to exit.
///
/// Neighbours are expanded North, East, South, West, so ties between equal
/// length paths always resolve the same way for a given maze.
///
/// # Examples
///
/// ```
/// use amazeing::{solve_shortest_path, Direction, Maze, Point};
///
/// let mut maze = Maze::new(2, 2, Point::new(0, 0), Point::new(1, 1));
/// maze.open_wall(Point::new(0, 0), Direction::East);
/// maze.open_wall(Point::new(1, 0), Direction::South);
///
/// assert_eq!(solve_shortest_path(&maze).unwrap().to_string(), "ES");
/// ```
pub fn solve_shortest_path(maze: &Maze) -> MazeResult<Path> {
    if !maze.in_bounds(maze.entry) || !maze.in_bounds(maze.exit) {
        return Err(MazeError::SolveFailed(format!(
            "entry {} or exit {} lies outside the {}x{} grid",
            maze.entry, maze.exit, maze.width, maze.height
        )));
    }

    let exit = maze.exit;
    let points = bfs(&maze.entry, |p| successors(maze, *p), |p| *p == exit).ok_or_else(|| {
        MazeError::SolveFailed(format!(
            "exit {} is unreachable from entry {}",
            maze.exit, maze.entry
        ))
    })?;

    points
        .windows(2)
        .map(|pair| {
            Direction::from_delta(pair[1] - pair[0]).ok_or_else(|| {
                MazeError::SolveFailed(format!("non-adjacent step {} -> {}", pair[0], pair[1]))
            })
        })
        .collect()
}
