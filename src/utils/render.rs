//! # ASCII Rendering
//!
//! Human-readable drawing of a maze for terminal output.

use crate::{ClosedPattern, Direction, Maze, Path, Point};
use std::collections::HashSet;

/// Draws `maze` with `+---+` corners and `|` side walls.
///
/// The entry is marked `E`, the exit `X`, cells on `path` (walked from the
/// entry) `*`, and closed pattern cells are filled with `###`.
///
/// # Examples
///
/// ```
/// use amazeing::{render_ascii, ClosedPattern, Direction, Maze, Point};
///
/// let mut maze = Maze::new(2, 1, Point::new(0, 0), Point::new(1, 0));
/// maze.open_wall(Point::new(0, 0), Direction::East);
///
/// let text = render_ascii(&maze, &ClosedPattern::new(), None);
/// assert_eq!(text, "+---+---+\n| E   X |\n+---+---+\n");
/// ```
pub fn render_ascii(maze: &Maze, closed: &ClosedPattern, path: Option<&Path>) -> String {
    let on_path: HashSet<Point> = path
        .map(|p| p.trace(maze.entry).into_iter().collect())
        .unwrap_or_default();

    let mut out = String::new();
    for y in 0..maze.height as i32 {
        // North walls of this row
        for x in 0..maze.width as i32 {
            out.push('+');
            out.push_str(if has_wall(maze, Point::new(x, y), Direction::North) {
                "---"
            } else {
                "   "
            });
        }
        out.push_str("+\n");

        for x in 0..maze.width as i32 {
            let p = Point::new(x, y);
            out.push(if has_wall(maze, p, Direction::West) { '|' } else { ' ' });
            out.push_str(&cell_body(maze, closed, &on_path, p));
        }
        let last = Point::new(maze.width as i32 - 1, y);
        out.push(if has_wall(maze, last, Direction::East) { '|' } else { ' ' });
        out.push('\n');
    }

    let bottom = maze.height as i32 - 1;
    for x in 0..maze.width as i32 {
        out.push('+');
        out.push_str(if has_wall(maze, Point::new(x, bottom), Direction::South) {
            "---"
        } else {
            "   "
        });
    }
    out.push_str("+\n");
    out
}

fn has_wall(maze: &Maze, p: Point, direction: Direction) -> bool {
    maze.cell(p).map_or(true, |c| c.has_wall(direction))
}

fn cell_body(maze: &Maze, closed: &ClosedPattern, on_path: &HashSet<Point>, p: Point) -> String {
    let mark = if p == maze.entry {
        'E'
    } else if p == maze.exit {
        'X'
    } else if closed.contains(p) {
        return "###".to_string();
    } else if on_path.contains(&p) {
        '*'
    } else {
        ' '
    };
    format!(" {mark} ")
}
