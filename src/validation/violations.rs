//! # Violations
//!
//! Typed descriptions of every rule a maze or path can break.

use crate::{Direction, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad category of a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    Dimensions,
    Endpoints,
    Borders,
    Coherence,
    Pattern,
    Connectivity,
    OpenArea,
    Perfect,
    PathCharacter,
    PathMove,
    PathEnd,
    PathShortest,
}

/// A single broken rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "violation")]
pub enum Violation {
    NonPositiveDimensions { width: usize, height: usize },
    EntryOutOfBounds(Point),
    ExitOutOfBounds(Point),
    EntryEqualsExit(Point),
    MissingBorderWall { at: Point, side: Direction },
    IncoherentWall { at: Point, side: Direction, neighbor: Point },
    PatternOutOfBounds(Point),
    PatternCellOpen { at: Point, walls: u8 },
    UnexpectedClosedCell(Point),
    EntryInPattern(Point),
    ExitInPattern(Point),
    Unreachable { reachable: usize, expected: usize },
    OpenArea { top_left: Point },
    PerfectEntryUnreachable,
    NotPerfect { expected_edges: usize, edges: usize },
    InvalidPathCharacter { index: usize, symbol: char },
    WallCrossed { step: usize, from: Point, direction: Direction },
    BlockedStep { step: usize, at: Point },
    PathEndsElsewhere { ended: Point, expected: Point },
    ExitUnreachable,
    NotShortest { length: usize, shortest: usize },
}

impl Violation {
    /// The category this violation belongs to.
    pub fn kind(&self) -> ViolationKind {
        use Violation::*;
        match self {
            NonPositiveDimensions { .. } => ViolationKind::Dimensions,
            EntryOutOfBounds(_) | ExitOutOfBounds(_) | EntryEqualsExit(_) => {
                ViolationKind::Endpoints
            }
            MissingBorderWall { .. } => ViolationKind::Borders,
            IncoherentWall { .. } => ViolationKind::Coherence,
            PatternOutOfBounds(_)
            | PatternCellOpen { .. }
            | UnexpectedClosedCell(_)
            | EntryInPattern(_)
            | ExitInPattern(_) => ViolationKind::Pattern,
            Unreachable { .. } => ViolationKind::Connectivity,
            OpenArea { .. } => ViolationKind::OpenArea,
            PerfectEntryUnreachable | NotPerfect { .. } => ViolationKind::Perfect,
            InvalidPathCharacter { .. } => ViolationKind::PathCharacter,
            WallCrossed { .. } | BlockedStep { .. } => ViolationKind::PathMove,
            PathEndsElsewhere { .. } => ViolationKind::PathEnd,
            ExitUnreachable | NotShortest { .. } => ViolationKind::PathShortest,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Violation::*;
        match self {
            NonPositiveDimensions { width, height } => {
                write!(f, "Maze: width/height must be positive, got {width}x{height}")
            }
            EntryOutOfBounds(p) => write!(f, "Maze: entry out of bounds: {p}"),
            ExitOutOfBounds(p) => write!(f, "Maze: exit out of bounds: {p}"),
            EntryEqualsExit(p) => write!(f, "Maze: entry and exit must be different, both are {p}"),
            MissingBorderWall { at, side } => write!(f, "Borders: missing {side} wall at {at}"),
            IncoherentWall { at, side, neighbor } => write!(
                f,
                "Coherence: mismatch {at} {side} vs {neighbor} {}",
                side.opposite()
            ),
            PatternOutOfBounds(p) => write!(f, "42: expected closed cell {p} is out of bounds"),
            PatternCellOpen { at, walls } => write!(
                f,
                "42: cell {at} expected fully closed (0b1111), got 0b{walls:04b}"
            ),
            UnexpectedClosedCell(p) => {
                write!(f, "42: found fully-closed cell outside expected pattern at {p}")
            }
            EntryInPattern(p) => write!(f, "42: entry {p} is inside the closed pattern cells"),
            ExitInPattern(p) => write!(f, "42: exit {p} is inside the closed pattern cells"),
            Unreachable {
                reachable,
                expected,
            } => write!(
                f,
                "Connectivity: reachable={reachable} but expected={expected} (some cells isolated)"
            ),
            OpenArea { top_left } => write!(
                f,
                "OpenArea: found forbidden 3x3 open area at top-left {top_left}"
            ),
            PerfectEntryUnreachable => write!(f, "Perfect: entry unreachable"),
            NotPerfect {
                expected_edges,
                edges,
            } => write!(
                f,
                "Perfect: expected edges=nodes-1 => {expected_edges}, got {edges} (cycle or disconnect)"
            ),
            InvalidPathCharacter { index, symbol } => write!(
                f,
                "Path: invalid character {symbol:?} at position {index} (expected N/E/S/W)"
            ),
            WallCrossed {
                step,
                from,
                direction,
            } => write!(
                f,
                "Path: invalid move at step {step}: from {from} to {direction} (wall closed)"
            ),
            BlockedStep { step, at } => {
                write!(f, "Path: stepped into closed pattern cell at step {step}: {at}")
            }
            PathEndsElsewhere { ended, expected } => write!(
                f,
                "Path: does not end at exit. Ended at {ended}, expected {expected}"
            ),
            ExitUnreachable => write!(f, "Path: exit not reachable according to BFS"),
            NotShortest { length, shortest } => write!(
                f,
                "Path: not shortest. len(path)={length} shortest={shortest}"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let v = Violation::IncoherentWall {
            at: Point::new(1, 1),
            side: Direction::East,
            neighbor: Point::new(2, 1),
        };
        assert_eq!(v.to_string(), "Coherence: mismatch (1,1) EAST vs (2,1) WEST");

        let v = Violation::PatternCellOpen {
            at: Point::new(4, 2),
            walls: 0b0111,
        };
        assert_eq!(
            v.to_string(),
            "42: cell (4,2) expected fully closed (0b1111), got 0b0111"
        );
    }

    #[test]
    fn test_path_kinds_are_distinct() {
        let end = Violation::PathEndsElsewhere {
            ended: Point::new(0, 0),
            expected: Point::new(1, 1),
        };
        let short = Violation::NotShortest {
            length: 6,
            shortest: 4,
        };
        assert_eq!(end.kind(), ViolationKind::PathEnd);
        assert_eq!(short.kind(), ViolationKind::PathShortest);
        assert_ne!(end.kind(), short.kind());
    }

    #[test]
    fn test_serializes_with_tag() {
        let json = serde_json::to_string(&Violation::OpenArea {
            top_left: Point::new(2, 3),
        })
        .unwrap();
        assert_eq!(json, r#"{"violation":"OpenArea","top_left":{"x":2,"y":3}}"#);
    }
}
