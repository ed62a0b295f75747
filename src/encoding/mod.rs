//! # Encoding Module
//!
//! The output file format:
//!
//! ```text
//! <height rows of exactly width hex digits>
//! <blank line>
//! entry.x,entry.y
//! exit.x,exit.y
//! <path of N/E/S/W symbols>
//! ```
//!
//! Each hex digit is a cell's wall mask (bit 0 North, bit 1 East, bit 2 South,
//! bit 3 West; a set bit is a wall).

use crate::{Cell, Maze, MazeError, MazeResult, Path, Point};
use log::debug;

/// A maze and path read back from the output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMaze {
    pub maze: Maze,
    pub path: Path,
}

/// Renders a maze and its path in the output format.
///
/// The text always ends with a newline after the path line.
///
/// # Examples
///
/// ```
/// use amazeing::{encode, Direction, Maze, Path, Point};
///
/// let mut maze = Maze::new(2, 1, Point::new(0, 0), Point::new(1, 0));
/// maze.open_wall(Point::new(0, 0), Direction::East);
/// let path: Path = "E".parse().unwrap();
///
/// assert_eq!(encode(&maze, &path), "D7\n\n0,0\n1,0\nE\n");
/// ```
pub fn encode(maze: &Maze, path: &Path) -> String {
    let mut lines: Vec<String> = maze
        .rows()
        .take(maze.height)
        .map(|row| row.iter().map(|c| c.to_hex_digit()).collect())
        .collect();
    lines.push(String::new());
    lines.push(format!("{},{}", maze.entry.x, maze.entry.y));
    lines.push(format!("{},{}", maze.exit.x, maze.exit.y));
    lines.push(path.to_string());

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Decodes text whose dimensions are known in advance.
///
/// Fails if the row count differs from `height`, if any row is not exactly
/// `width` characters long, or on any malformed hex digit, point or path.
pub fn decode_with_dimensions(text: &str, width: usize, height: usize) -> MazeResult<DecodedMaze> {
    let sections = split_sections(text)?;
    decode_sections(&sections, width, height)
}

/// Decodes text, taking the width from the first row and the height from the
/// number of rows.
///
/// Since row 0 defines the width, a first row of the wrong length is reported
/// against the first later row that disagrees with it. Use
/// [`decode_with_dimensions`] when the dimensions are known.
pub fn decode(text: &str) -> MazeResult<DecodedMaze> {
    let sections = split_sections(text)?;
    let width = sections
        .rows
        .first()
        .map(|row| row.chars().count())
        .ok_or_else(|| MazeError::MalformedOutput("no grid rows before the separator".to_string()))?;
    let height = sections.rows.len();
    decode_sections(&sections, width, height)
}

/// Writes the encoded maze to `file`.
pub fn write_file(file: impl AsRef<std::path::Path>, maze: &Maze, path: &Path) -> MazeResult<()> {
    std::fs::write(file, encode(maze, path))?;
    Ok(())
}

/// Reads and decodes `file` with known dimensions.
pub fn read_file(
    file: impl AsRef<std::path::Path>,
    width: usize,
    height: usize,
) -> MazeResult<DecodedMaze> {
    let text = std::fs::read_to_string(file)?;
    decode_with_dimensions(&text, width, height)
}

/// The raw lines of an output file, split at the blank separator line.
struct Sections<'a> {
    rows: Vec<&'a str>,
    entry: &'a str,
    exit: &'a str,
    path: &'a str,
}

fn split_sections(text: &str) -> MazeResult<Sections<'_>> {
    let lines: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
    let separator = lines
        .iter()
        .position(|line| line.trim().is_empty())
        .ok_or_else(|| {
            MazeError::MalformedOutput("missing empty line separator before tail".to_string())
        })?;

    let tail = &lines[separator + 1..];
    if tail.len() < 3 {
        return Err(MazeError::MalformedOutput(format!(
            "tail must hold entry, exit and path lines, found {} line(s)",
            tail.len()
        )));
    }

    Ok(Sections {
        rows: lines[..separator].iter().map(|l| l.trim()).collect(),
        entry: tail[0],
        exit: tail[1],
        path: tail[2],
    })
}

fn decode_sections(sections: &Sections<'_>, width: usize, height: usize) -> MazeResult<DecodedMaze> {
    if sections.rows.len() != height {
        return Err(MazeError::MalformedOutput(format!(
            "expected {height} grid rows, got {}",
            sections.rows.len()
        )));
    }

    let entry = parse_point_line(sections.entry, "entry")?;
    let exit = parse_point_line(sections.exit, "exit")?;

    // rows are checked against the declared width before anything is sized from it
    let mut cells = Vec::new();
    for (y, row) in sections.rows.iter().enumerate() {
        let length = row.chars().count();
        if length != width {
            return Err(MazeError::MalformedOutput(format!(
                "row {y} expected length {width}, got {length}"
            )));
        }
        for ch in row.chars() {
            cells.push(Cell::from_hex_digit(ch).ok_or_else(|| {
                MazeError::MalformedOutput(format!("invalid hex char {ch:?} in row {y}"))
            })?);
        }
    }

    let maze = Maze::from_cells(width, height, entry, exit, cells).ok_or_else(|| {
        MazeError::MalformedOutput(format!("{width}x{height} does not match the grid rows"))
    })?;
    let path: Path = sections.path.parse()?;
    debug!("Decoded {width}x{height} maze with a {}-step path", path.len());
    Ok(DecodedMaze { maze, path })
}

fn parse_point_line(line: &str, label: &str) -> MazeResult<Point> {
    let invalid = || MazeError::MalformedOutput(format!("invalid {label} line {line:?}"));
    let (xs, ys) = line.split_once(',').ok_or_else(invalid)?;
    let x = xs.trim().parse::<i32>().map_err(|_| invalid())?;
    let y = ys.trim().parse::<i32>().map_err(|_| invalid())?;
    Ok(Point::new(x, y))
}
