//! # Generation Module
//!
//! Seeded maze generation.
//!
//! A run starts from a fully walled grid, optionally reserves the closed-cell
//! pattern, carves a spanning tree over the remaining cells and, for
//! imperfect mazes, opens a bounded number of extra walls. The result is
//! re-validated before it is handed back so a defective maze is reported as
//! an error instead of being written out.

pub mod carvers;
pub mod config;
pub mod pattern;

pub use carvers::*;
pub use config::*;

use crate::defaults::EXTRA_PASSAGE_RATIO;
use crate::{
    encoding, ClosedPattern, Direction, Maze, MazeError, MazeResult, MazeValidator, Path, Point,
    ValidationOptions,
};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Drives one generation run and owns its random number generator.
///
/// # Examples
///
/// ```
/// use amazeing::{MazeConfig, MazeGenerator};
///
/// let mut generator = MazeGenerator::new(MazeConfig::for_testing(42)).unwrap();
/// let maze = generator.generate().unwrap().clone();
/// let path = generator.solve_shortest_path().unwrap();
/// assert_eq!(path.trace(maze.entry).last(), Some(&maze.exit));
/// ```
pub struct MazeGenerator {
    config: MazeConfig,
    rng: StdRng,
    carver: Box<dyn Carver>,
    closed: ClosedPattern,
    maze: Option<Maze>,
}

impl MazeGenerator {
    /// Validates the configuration and seeds the generator.
    pub fn new(config: MazeConfig) -> MazeResult<Self> {
        config.validate()?;
        let rng = utils::create_rng(&config);
        let carver = carver_for(config.algorithm);
        Ok(Self {
            config,
            rng,
            carver,
            closed: ClosedPattern::new(),
            maze: None,
        })
    }

    /// The configuration this generator was built from.
    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    /// The last generated maze, if any.
    pub fn maze(&self) -> Option<&Maze> {
        self.maze.as_ref()
    }

    /// Cells left fully walled by the last run. Empty when no pattern was drawn.
    pub fn closed_cells(&self) -> &ClosedPattern {
        &self.closed
    }

    /// Generates a new maze, replacing any previous one.
    pub fn generate(&mut self) -> MazeResult<&Maze> {
        let config = &self.config;
        info!(
            "Generating {}x{} {} maze with {}",
            config.width,
            config.height,
            if config.perfect { "perfect" } else { "imperfect" },
            self.carver.carver_type()
        );

        let closed = self.place_pattern()?;
        let mut maze = Maze::new(config.width, config.height, config.entry, config.exit);

        self.carver.carve(&mut maze, &closed, &mut self.rng)?;
        ensure_all_reached(&maze, &closed)?;

        if !self.config.perfect {
            let opened = add_extra_passages(&mut maze, &closed, &mut self.rng);
            debug!("Opened {opened} extra passages");
        }

        let options = ValidationOptions {
            perfect: self.config.perfect,
            expected_closed: (!closed.is_empty()).then(|| closed.clone()),
        };
        let report = MazeValidator::new().validate_maze(&maze, &options);
        if !report.ok {
            return Err(MazeError::GenerationFailed(format!(
                "generated maze violates {} rule(s): {}",
                report.violations.len(),
                report.messages().join("; ")
            )));
        }

        self.closed = closed;
        Ok(&*self.maze.insert(maze))
    }

    /// Shortest path from entry to exit in the generated maze.
    pub fn solve_shortest_path(&self) -> MazeResult<Path> {
        let maze = self.maze.as_ref().ok_or_else(|| {
            MazeError::GenerationFailed(
                "solve_shortest_path() requires a generated maze".to_string(),
            )
        })?;
        crate::solve_shortest_path(maze)
    }

    /// Encodes the generated maze and `path` into the configured output file.
    pub fn write_output_file(&self, path: &Path) -> MazeResult<()> {
        let maze = self.maze.as_ref().ok_or_else(|| {
            MazeError::GenerationFailed(
                "write_output_file() requires a generated maze".to_string(),
            )
        })?;
        encoding::write_file(&self.config.output_file, maze, path)?;
        info!("Wrote maze to {}", self.config.output_file.display());
        Ok(())
    }

    fn place_pattern(&self) -> MazeResult<ClosedPattern> {
        if !self.config.pattern {
            return Ok(ClosedPattern::new());
        }
        match pattern::forty_two(self.config.width, self.config.height) {
            Some(closed) => {
                pattern::check_placement(&closed, &self.config)?;
                debug!("Reserved {} closed pattern cells", closed.len());
                Ok(closed)
            }
            None => {
                let (w, h) = pattern::minimum_pattern_size();
                warn!(
                    "Maze {}x{} is too small for the closed-cell pattern (needs {w}x{h}); skipping it",
                    self.config.width, self.config.height
                );
                Ok(ClosedPattern::new())
            }
        }
    }
}

/// Fails unless every cell outside the pattern is reachable from the entry.
fn ensure_all_reached(maze: &Maze, closed: &ClosedPattern) -> MazeResult<()> {
    let free = maze.points().filter(|p| !closed.contains(*p)).count();
    let mut seen = vec![false; maze.cell_count()];
    let index = |p: Point| p.y as usize * maze.width + p.x as usize;
    seen[index(maze.entry)] = true;
    let mut stack = vec![maze.entry];
    let mut reached = 1usize;

    while let Some(p) = stack.pop() {
        for (d, n) in maze.neighbors(p) {
            if maze.open_between(p, d) && !seen[index(n)] {
                seen[index(n)] = true;
                reached += 1;
                stack.push(n);
            }
        }
    }

    if reached != free {
        return Err(MazeError::GenerationFailed(format!(
            "carving reached {reached} of {free} cells"
        )));
    }
    Ok(())
}

/// Opens extra walls between free cells to introduce cycles.
///
/// Candidates are tried in random order. An opening that completes a fully
/// open 3x3 block is closed again and the next candidate is tried. Returns the
/// number of walls kept open.
fn add_extra_passages(maze: &mut Maze, closed: &ClosedPattern, rng: &mut StdRng) -> usize {
    let free = maze.points().filter(|p| !closed.contains(*p)).count();
    let target = (free as f64 * EXTRA_PASSAGE_RATIO).ceil() as usize;

    let mut candidates: Vec<(Point, Direction)> = maze
        .points()
        .filter(|p| !closed.contains(*p))
        .flat_map(|p| [(p, Direction::East), (p, Direction::South)])
        .filter(|(p, d)| {
            let n = p.step(*d);
            maze.in_bounds(n) && !closed.contains(n) && !maze.open_between(*p, *d)
        })
        .collect();
    candidates.shuffle(rng);

    let mut opened = 0;
    for (p, d) in candidates {
        if opened == target {
            break;
        }
        maze.open_wall(p, d);
        if creates_open_area(maze, p) {
            maze.close_wall(p, d);
            continue;
        }
        opened += 1;
    }

    if opened < target {
        debug!("Only {opened} of {target} extra passages could be opened");
    }
    opened
}

/// Whether any 3x3 block containing `p` is fully open.
///
/// Both ends of an East or South edge starting at `p` lie in a block only if
/// `p` does, so checking the blocks around `p` is enough.
fn creates_open_area(maze: &Maze, p: Point) -> bool {
    (p.y - 2..=p.y)
        .flat_map(|y| (p.x - 2..=p.x).map(move |x| Point::new(x, y)))
        .any(|top_left| maze.is_open_area(top_left))
}

/// Utility functions for generation.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates the run's random number generator.
    ///
    /// A configured seed makes the run reproducible; without one the generator
    /// is seeded from system entropy.
    pub fn create_rng(config: &MazeConfig) -> StdRng {
        match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
