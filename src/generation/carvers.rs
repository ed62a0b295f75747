//! # Spanning-Tree Carvers
//!
//! Strategies that turn an all-walled grid into a spanning tree over every
//! cell outside the closed pattern.
//!
//! A carver only ever opens walls in pairs through [`Maze::open_wall`] and
//! never opens a wall that touches a pattern cell, so border closure, wall
//! coherence and pattern closure hold by construction. The orchestrating
//! [`MazeGenerator`](crate::MazeGenerator) checks that every free cell was
//! reached.

use crate::{CarverKind, ClosedPattern, Direction, Maze, MazeError, MazeResult, Point};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Trait for spanning-tree carving strategies.
///
/// Implementations draw all randomness from the generator passed in, so a
/// fixed seed always yields the same maze.
pub trait Carver {
    /// Opens walls until the free cells form a spanning tree.
    fn carve(&self, maze: &mut Maze, closed: &ClosedPattern, rng: &mut StdRng) -> MazeResult<()>;

    /// Gets the carver type name for logging and debugging.
    fn carver_type(&self) -> &'static str;
}

/// Builds the carver selected in the configuration.
pub fn carver_for(kind: CarverKind) -> Box<dyn Carver> {
    match kind {
        CarverKind::Backtracker => Box::new(BacktrackerCarver),
        CarverKind::Kruskal => Box::new(KruskalCarver),
    }
}

/// Randomized depth-first search with an explicit stack.
///
/// Starting from the entry, the carver repeatedly moves to a random unvisited
/// neighbour of the cell on top of the stack, opening the wall it crosses, and
/// backtracks when the top cell has no unvisited neighbours left.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktrackerCarver;

impl Carver for BacktrackerCarver {
    fn carve(&self, maze: &mut Maze, closed: &ClosedPattern, rng: &mut StdRng) -> MazeResult<()> {
        let start = maze.entry;
        if !maze.in_bounds(start) || closed.contains(start) {
            return Err(MazeError::GenerationFailed(format!(
                "cannot start carving from {start}"
            )));
        }

        let mut visited = vec![false; maze.cell_count()];
        let width = maze.width;
        let index = |p: Point| p.y as usize * width + p.x as usize;
        visited[index(start)] = true;

        let mut stack = vec![start];
        let mut opened = 0usize;

        while let Some(&current) = stack.last() {
            let mut candidates: Vec<(Direction, Point)> = maze
                .neighbors(current)
                .filter(|(_, n)| !closed.contains(*n) && !visited[index(*n)])
                .collect();

            if candidates.is_empty() {
                stack.pop();
                continue;
            }

            candidates.shuffle(rng);
            let (direction, next) = candidates[0];
            maze.open_wall(current, direction);
            visited[index(next)] = true;
            opened += 1;
            stack.push(next);
        }

        debug!("Backtracker opened {opened} passages");
        Ok(())
    }

    fn carver_type(&self) -> &'static str {
        "BacktrackerCarver"
    }
}

/// Randomized Kruskal: walls are visited in random order and opened when they
/// join two different trees of the forest.
#[derive(Debug, Clone, Copy, Default)]
pub struct KruskalCarver;

impl Carver for KruskalCarver {
    fn carve(&self, maze: &mut Maze, closed: &ClosedPattern, rng: &mut StdRng) -> MazeResult<()> {
        let mut walls: Vec<(Point, Direction)> = maze
            .points()
            .filter(|p| !closed.contains(*p))
            .flat_map(|p| [(p, Direction::East), (p, Direction::South)])
            .filter(|(p, d)| {
                let n = p.step(*d);
                maze.in_bounds(n) && !closed.contains(n)
            })
            .collect();
        walls.shuffle(rng);

        let width = maze.width;
        let index = |p: Point| p.y as usize * width + p.x as usize;
        let mut forest = DisjointSet::new(maze.cell_count());
        let mut opened = 0usize;

        for (p, d) in walls {
            if forest.union(index(p), index(p.step(d))) {
                maze.open_wall(p, d);
                opened += 1;
            }
        }

        debug!("Kruskal opened {opened} passages");
        Ok(())
    }

    fn carver_type(&self) -> &'static str {
        "KruskalCarver"
    }
}

/// Union-find with path halving and union by size.
#[derive(Debug, Clone)]
struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merges the sets of `a` and `b`. Returns false if they were already joined.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        true
    }
}
