//! # Direction Paths
//!
//! A path is an ordered walk of directions starting at the maze entry,
//! written as a string of `N`, `E`, `S` and `W` symbols.

use super::{Direction, Point};
use crate::{MazeError, MazeResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An ordered sequence of moves.
///
/// # Examples
///
/// ```
/// use amazeing::{Direction, Path};
///
/// let path: Path = "NNE".parse().unwrap();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.directions()[2], Direction::East);
/// assert_eq!(path.to_string(), "NNE");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path {
    steps: Vec<Direction>,
}

impl Path {
    /// Creates a path from a list of moves.
    pub fn new(steps: Vec<Direction>) -> Self {
        Self { steps }
    }

    /// Number of moves.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the path has no moves.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The moves in order.
    pub fn directions(&self) -> &[Direction] {
        &self.steps
    }

    /// Points visited when walking from `start`, including `start` itself.
    ///
    /// Walls are not consulted.
    pub fn trace(&self, start: Point) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.steps.len() + 1);
        let mut current = start;
        points.push(current);
        for &d in &self.steps {
            current = current.step(d);
            points.push(current);
        }
        points
    }
}

impl FromIterator<Direction> for Path {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl FromStr for Path {
    type Err = MazeError;

    fn from_str(s: &str) -> MazeResult<Self> {
        s.trim()
            .chars()
            .enumerate()
            .map(|(i, c)| {
                Direction::from_symbol(c).ok_or_else(|| {
                    MazeError::MalformedOutput(format!(
                        "path contains invalid character {c:?} at position {i} (expected N/E/S/W)"
                    ))
                })
            })
            .collect()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.steps {
            write!(f, "{}", d.symbol())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let path: Path = "NNEESW".parse().unwrap();
        assert_eq!(path.len(), 6);
        assert_eq!(path.to_string(), "NNEESW");
        assert_eq!(path.directions()[5], Direction::West);
    }

    #[test]
    fn test_empty_path() {
        let path: Path = "".parse().unwrap();
        assert!(path.is_empty());
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_invalid_symbol_is_rejected() {
        let err = "NEQ".parse::<Path>().unwrap_err();
        assert!(matches!(err, MazeError::MalformedOutput(_)));
        assert!(err.to_string().contains("'Q'"));
    }

    #[test]
    fn test_trace() {
        let path: Path = "ES".parse().unwrap();
        assert_eq!(
            path.trace(Point::new(1, 1)),
            vec![Point::new(1, 1), Point::new(2, 1), Point::new(2, 2)]
        );
    }
}
