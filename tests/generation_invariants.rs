//! Property tests: every generated maze passes the independent validator.

use amazeing::generation::pattern;
use amazeing::{
    CarverKind, ClosedPattern, Direction, MazeConfig, MazeGenerator, MazeResult, MazeValidator,
    Point, ValidationOptions,
};
use proptest::prelude::*;

fn generate(config: MazeConfig) -> MazeResult<(amazeing::Maze, ClosedPattern, amazeing::Path)> {
    let mut generator = MazeGenerator::new(config)?;
    let maze = generator.generate()?.clone();
    let path = generator.solve_shortest_path()?;
    Ok((maze, generator.closed_cells().clone(), path))
}

fn algorithm() -> impl Strategy<Value = CarverKind> {
    prop_oneof![Just(CarverKind::Backtracker), Just(CarverKind::Kruskal)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn generated_mazes_are_valid(
        width in 2usize..24,
        height in 2usize..18,
        seed in any::<u64>(),
        perfect in any::<bool>(),
        algorithm in algorithm(),
    ) {
        let config = MazeConfig::new(
            width,
            height,
            Point::new(0, 0),
            Point::new(width as i32 - 1, height as i32 - 1),
        )
        .with_seed(seed)
        .with_perfect(perfect)
        .with_algorithm(algorithm);

        let (maze, closed, path) = generate(config).unwrap();
        let expected_closed = pattern::forty_two(width, height);
        prop_assert_eq!(expected_closed.clone().unwrap_or_default(), closed);

        let validator = MazeValidator::new();
        let report = validator.validate_maze(
            &maze,
            &ValidationOptions { perfect, expected_closed: expected_closed.clone() },
        );
        prop_assert!(report.ok, "{:?}", report.messages());

        let route = validator.validate_path_is_shortest(
            &maze,
            &path.to_string(),
            expected_closed.as_ref(),
        );
        prop_assert!(route.ok, "{:?}", route.messages());
    }

    #[test]
    fn walls_are_paired(seed in any::<u64>(), perfect in any::<bool>()) {
        let config = MazeConfig::for_testing(seed).with_perfect(perfect);
        let (maze, _, _) = generate(config).unwrap();
        for p in maze.points() {
            for (d, n) in maze.neighbors(p) {
                let here = maze.cell(p).unwrap().has_wall(d);
                let there = maze.cell(n).unwrap().has_wall(d.opposite());
                prop_assert_eq!(here, there);
            }
        }
    }

    #[test]
    fn same_seed_same_maze(seed in any::<u64>(), algorithm in algorithm()) {
        let config = MazeConfig::for_testing(seed).with_perfect(false).with_algorithm(algorithm);
        let first = generate(config.clone()).unwrap();
        let second = generate(config).unwrap();
        prop_assert_eq!(first.0, second.0);
        prop_assert_eq!(first.2, second.2);
    }
}

#[test]
fn perfect_maze_has_unique_path() -> MazeResult<()> {
    let (maze, closed, path) = generate(MazeConfig::for_testing(2024))?;
    let edges = amazeing::count_undirected_edges(&maze, &closed);
    let free = maze.points().filter(|p| !closed.contains(*p)).count();
    assert_eq!(edges + 1, free);

    let distances = amazeing::bfs_distances(&maze, maze.entry, &closed);
    assert_eq!(distances[&maze.exit], path.len());
    Ok(())
}

#[test]
fn border_is_fully_walled() -> MazeResult<()> {
    let config = MazeConfig::new(12, 9, Point::new(0, 4), Point::new(11, 4))
        .with_seed(8)
        .with_perfect(false);
    let (maze, _, _) = generate(config)?;
    for x in 0..12 {
        assert!(maze.cell(Point::new(x, 0)).unwrap().has_wall(Direction::North));
        assert!(maze.cell(Point::new(x, 8)).unwrap().has_wall(Direction::South));
    }
    for y in 0..9 {
        assert!(maze.cell(Point::new(0, y)).unwrap().has_wall(Direction::West));
        assert!(maze.cell(Point::new(11, y)).unwrap().has_wall(Direction::East));
    }
    Ok(())
}

#[test]
fn pattern_can_be_disabled() -> MazeResult<()> {
    let config = MazeConfig::for_testing(5).with_pattern(false);
    let (maze, closed, _) = generate(config)?;
    assert!(closed.is_empty());
    assert!(maze.points().all(|p| !maze.cell(p).unwrap().is_fully_closed()));
    Ok(())
}
