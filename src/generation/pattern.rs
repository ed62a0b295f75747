//! # Closed-Cell Pattern
//!
//! Places the "42" glyph of fully walled cells in the middle of the grid and
//! checks that the placement leaves a usable maze around it.

use crate::defaults::{PATTERN_HEIGHT, PATTERN_MARGIN, PATTERN_WIDTH};
use crate::{ClosedPattern, MazeConfig, MazeError, MazeResult, Point};
use std::collections::{HashSet, VecDeque};

/// The glyph, one string per row. `#` marks a closed cell.
const GLYPH: [&str; PATTERN_HEIGHT] = [
    "#.#.###",
    "#.#...#",
    "###.###",
    "..#.#..",
    "..#.###",
];

/// Smallest grid that can hold the glyph with a free ring around it.
pub fn minimum_pattern_size() -> (usize, usize) {
    (
        PATTERN_WIDTH + 2 * PATTERN_MARGIN,
        PATTERN_HEIGHT + 2 * PATTERN_MARGIN,
    )
}

/// Cells of the "42" glyph centred in a `width` x `height` grid.
///
/// Returns None when the grid is too small for the glyph and its margin.
///
/// # Examples
///
/// ```
/// use amazeing::generation::pattern::forty_two;
///
/// assert!(forty_two(8, 20).is_none());
/// let pattern = forty_two(9, 7).unwrap();
/// assert_eq!(pattern.len(), 20);
/// ```
pub fn forty_two(width: usize, height: usize) -> Option<ClosedPattern> {
    let (min_width, min_height) = minimum_pattern_size();
    if width < min_width || height < min_height {
        return None;
    }

    let left = ((width - PATTERN_WIDTH) / 2) as i32;
    let top = ((height - PATTERN_HEIGHT) / 2) as i32;

    Some(
        GLYPH
            .iter()
            .enumerate()
            .flat_map(|(dy, row)| {
                row.chars()
                    .enumerate()
                    .filter(|(_, c)| *c == '#')
                    .map(move |(dx, _)| Point::new(left + dx as i32, top + dy as i32))
            })
            .collect(),
    )
}

/// Rejects pattern placements that would make a conformant maze impossible.
///
/// The entry and exit must stay outside the pattern, at least one cell must
/// stay free, and the free cells must form one 4-connected region.
pub fn check_placement(pattern: &ClosedPattern, config: &MazeConfig) -> MazeResult<()> {
    if pattern.contains(config.entry) {
        return Err(MazeError::GenerationFailed(format!(
            "entry {} lies inside the closed-cell pattern",
            config.entry
        )));
    }
    if pattern.contains(config.exit) {
        return Err(MazeError::GenerationFailed(format!(
            "exit {} lies inside the closed-cell pattern",
            config.exit
        )));
    }

    let in_grid = |p: Point| {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < config.width && (p.y as usize) < config.height
    };
    let free_cells = config.width * config.height
        - pattern.iter().filter(|p| in_grid(*p)).count();
    if free_cells == 0 {
        return Err(MazeError::GenerationFailed(
            "the closed-cell pattern covers the whole grid".to_string(),
        ));
    }

    // Flood fill over grid adjacency, ignoring walls.
    let mut seen = HashSet::from([config.entry]);
    let mut queue = VecDeque::from([config.entry]);
    while let Some(p) = queue.pop_front() {
        for d in crate::Direction::ALL {
            let n = p.step(d);
            if in_grid(n) && !pattern.contains(n) && seen.insert(n) {
                queue.push_back(n);
            }
        }
    }

    if seen.len() != free_cells {
        return Err(MazeError::GenerationFailed(format!(
            "the closed-cell pattern isolates {} cell(s) from the entry",
            free_cells - seen.len()
        )));
    }
    Ok(())
}
