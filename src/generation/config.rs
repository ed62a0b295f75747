//! # Maze Configuration
//!
//! `KEY=VALUE` configuration files and their validation.

use crate::{MazeError, MazeResult, Point};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

/// Which spanning-tree strategy carves the maze.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarverKind {
    /// Randomized depth-first search from the entry
    #[default]
    Backtracker,
    /// Shuffled walls joined through a disjoint-set forest
    Kruskal,
}

impl FromStr for CarverKind {
    type Err = MazeError;

    fn from_str(s: &str) -> MazeResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "backtracker" | "dfs" => Ok(CarverKind::Backtracker),
            "kruskal" => Ok(CarverKind::Kruskal),
            other => Err(MazeError::InvalidConfig(format!(
                "ALGORITHM must be 'backtracker' or 'kruskal', got '{other}'"
            ))),
        }
    }
}

/// Configuration for one generation run.
///
/// # Examples
///
/// ```
/// use amazeing::{MazeConfig, Point};
///
/// let config: MazeConfig = "WIDTH=10\nHEIGHT=8\nENTRY=0,0\nEXIT=9,7\n\
///                           OUTPUT_FILE=maze.txt\nPERFECT=True"
///     .parse()
///     .unwrap();
/// assert_eq!(config.width, 10);
/// assert_eq!(config.exit, Point::new(9, 7));
/// assert!(config.perfect);
/// assert!(config.seed.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeConfig {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Entry cell
    pub entry: Point,
    /// Exit cell
    pub exit: Point,
    /// Where the encoded maze is written
    pub output_file: PathBuf,
    /// Whether the passages must form a spanning tree
    pub perfect: bool,
    /// Random seed for reproducible generation
    pub seed: Option<u64>,
    /// Whether to draw the closed-cell "42" pattern when it fits
    pub pattern: bool,
    /// Spanning-tree strategy
    pub algorithm: CarverKind,
}

impl MazeConfig {
    /// Creates a perfect maze configuration with the pattern enabled and no seed.
    pub fn new(width: usize, height: usize, entry: Point, exit: Point) -> Self {
        Self {
            width,
            height,
            entry,
            exit,
            output_file: PathBuf::from("maze.txt"),
            perfect: true,
            seed: None,
            pattern: true,
            algorithm: CarverKind::default(),
        }
    }

    /// Creates a seeded 20x15 configuration for tests.
    pub fn for_testing(seed: u64) -> Self {
        Self::new(20, 15, Point::new(0, 0), Point::new(19, 14)).with_seed(seed)
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the perfect flag.
    pub fn with_perfect(mut self, perfect: bool) -> Self {
        self.perfect = perfect;
        self
    }

    /// Enables or disables the closed-cell pattern.
    pub fn with_pattern(mut self, pattern: bool) -> Self {
        self.pattern = pattern;
        self
    }

    /// Selects the carving strategy.
    pub fn with_algorithm(mut self, algorithm: CarverKind) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the output file.
    pub fn with_output_file(mut self, output_file: impl Into<PathBuf>) -> Self {
        self.output_file = output_file.into();
        self
    }

    /// Reads and validates a configuration file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> MazeResult<Self> {
        let text = std::fs::read_to_string(path)?;
        text.parse()
    }

    /// Checks dimensions and entry/exit placement.
    pub fn validate(&self) -> MazeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MazeError::InvalidConfig(
                "WIDTH and HEIGHT must be positive".to_string(),
            ));
        }
        if self.width > i32::MAX as usize || self.height > i32::MAX as usize {
            return Err(MazeError::InvalidConfig(format!(
                "WIDTH and HEIGHT must not exceed {}",
                i32::MAX
            )));
        }
        if self.entry == self.exit {
            return Err(MazeError::InvalidConfig(format!(
                "ENTRY and EXIT must be different, both are {}",
                self.entry
            )));
        }
        if !self.contains(self.entry) {
            return Err(MazeError::InvalidConfig(format!(
                "ENTRY {} is out of bounds for a {}x{} maze",
                self.entry, self.width, self.height
            )));
        }
        if !self.contains(self.exit) {
            return Err(MazeError::InvalidConfig(format!(
                "EXIT {} is out of bounds for a {}x{} maze",
                self.exit, self.width, self.height
            )));
        }
        Ok(())
    }

    fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }
}

impl FromStr for MazeConfig {
    type Err = MazeError;

    fn from_str(text: &str) -> MazeResult<Self> {
        let mut kv = parse_key_values(text)?;

        let width = parse_dimension(&kv, "WIDTH")?;
        let height = parse_dimension(&kv, "HEIGHT")?;
        let entry = parse_point(required(&kv, "ENTRY")?, "ENTRY")?;
        let exit = parse_point(required(&kv, "EXIT")?, "EXIT")?;
        let output_file = PathBuf::from(required(&kv, "OUTPUT_FILE")?);
        let perfect = parse_bool(required(&kv, "PERFECT")?, "PERFECT")?;

        let seed = match optional(&kv, "SEED")? {
            Some(raw) => Some(raw.parse::<u64>().map_err(|_| {
                MazeError::InvalidConfig(format!(
                    "SEED must be a non-negative integer, got '{raw}'"
                ))
            })?),
            None => None,
        };
        let pattern = match optional(&kv, "PATTERN")? {
            Some(raw) => parse_bool(raw, "PATTERN")?,
            None => true,
        };
        let algorithm = match optional(&kv, "ALGORITHM")? {
            Some(raw) => raw.parse()?,
            None => CarverKind::default(),
        };

        for key in KNOWN_KEYS {
            kv.remove(*key);
        }
        let mut unknown: Vec<&String> = kv.keys().collect();
        unknown.sort();
        for key in unknown {
            warn!("Ignoring unknown configuration key {key}");
        }

        let config = MazeConfig {
            width,
            height,
            entry,
            exit,
            output_file,
            perfect,
            seed,
            pattern,
            algorithm,
        };
        config.validate()?;
        Ok(config)
    }
}

const KNOWN_KEYS: &[&str] = &[
    "WIDTH",
    "HEIGHT",
    "ENTRY",
    "EXIT",
    "OUTPUT_FILE",
    "PERFECT",
    "SEED",
    "PATTERN",
    "ALGORITHM",
];

/// Splits configuration text into upper-cased keys and trimmed values.
fn parse_key_values(text: &str) -> MazeResult<HashMap<String, String>> {
    let mut kv = HashMap::new();
    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(MazeError::InvalidConfig(format!(
                "Bad line (expected KEY=VALUE): '{raw}'"
            )));
        };
        let key = key.trim().to_uppercase();
        if key.is_empty() {
            return Err(MazeError::InvalidConfig(format!("Empty key in line: '{raw}'")));
        }
        kv.insert(key, value.trim().to_string());
    }
    Ok(kv)
}

fn required<'a>(kv: &'a HashMap<String, String>, key: &str) -> MazeResult<&'a str> {
    match kv.get(key) {
        None => Err(MazeError::InvalidConfig(format!("Missing required key: {key}"))),
        Some(v) if v.is_empty() => {
            Err(MazeError::InvalidConfig(format!("Empty value for key: {key}")))
        }
        Some(v) => Ok(v),
    }
}

fn optional<'a>(kv: &'a HashMap<String, String>, key: &str) -> MazeResult<Option<&'a str>> {
    if kv.contains_key(key) {
        required(kv, key).map(Some)
    } else {
        Ok(None)
    }
}

fn parse_int(raw: &str, key: &str) -> MazeResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| MazeError::InvalidConfig(format!("{key} must be an integer, got '{raw}'")))
}

fn parse_dimension(kv: &HashMap<String, String>, key: &str) -> MazeResult<usize> {
    let value = parse_int(required(kv, key)?, key)?;
    if value <= 0 {
        return Err(MazeError::InvalidConfig(format!(
            "{key} must be positive, got {value}"
        )));
    }
    usize::try_from(value)
        .map_err(|_| MazeError::InvalidConfig(format!("{key} is too large: {value}")))
}

fn parse_bool(raw: &str, key: &str) -> MazeResult<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        _ => Err(MazeError::InvalidConfig(format!(
            "{key} must be a boolean (True/False), got '{raw}'"
        ))),
    }
}

fn parse_point(raw: &str, key: &str) -> MazeResult<Point> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return Err(MazeError::InvalidConfig(format!(
            "{key} must be 'x,y', got '{raw}'"
        )));
    }
    let x = parse_int(parts[0], key)?;
    let y = parse_int(parts[1], key)?;
    let coord = |v: i64| {
        i32::try_from(v)
            .map_err(|_| MazeError::InvalidConfig(format!("{key} coordinate out of range: {v}")))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}
