//! End-to-end: configuration file, generation, output file and validation.

use amazeing::generation::pattern;
use amazeing::{
    decode, CarverKind, Direction, Maze, MazeConfig, MazeError, MazeGenerator, MazeResult,
    MazeValidator, Point, ValidationOptions, Violation, ViolationKind,
};
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.txt");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_config_to_validated_file() -> MazeResult<()> {
    let dir = TempDir::new()?;
    let output = dir.path().join("maze.txt");
    let config_path = write_config(
        &dir,
        &format!(
            "# sample\nWIDTH=20\nHEIGHT=15\nENTRY=0,0\nEXIT=19,14\nOUTPUT_FILE={}\nPERFECT=True\nSEED=42\n",
            output.display()
        ),
    );

    let config = MazeConfig::from_file(&config_path)?;
    assert_eq!(config.seed, Some(42));
    assert_eq!(config.algorithm, CarverKind::Backtracker);

    let mut generator = MazeGenerator::new(config)?;
    generator.generate()?;
    let path = generator.solve_shortest_path()?;
    generator.write_output_file(&path)?;

    let text = fs::read_to_string(&output)?;
    assert!(text.ends_with('\n'));
    assert_eq!(text.lines().take_while(|l| !l.is_empty()).count(), 15);
    assert!(text.lines().take(15).all(|l| l.len() == 20));

    let validator = MazeValidator::new();
    let decoded = validator.validate_output_file(&output, 20, 15)?;
    assert_eq!(Some(&decoded.maze), generator.maze());
    assert_eq!(decoded.path, path);

    let expected_closed = pattern::forty_two(20, 15);
    let report = validator.validate_maze(
        &decoded.maze,
        &ValidationOptions {
            perfect: true,
            expected_closed: expected_closed.clone(),
        },
    );
    assert!(report.ok, "{:?}", report.messages());

    let route = validator.validate_path_is_shortest(
        &decoded.maze,
        &decoded.path.to_string(),
        expected_closed.as_ref(),
    );
    assert!(route.ok, "{:?}", route.messages());
    Ok(())
}

#[test]
fn test_imperfect_kruskal_round_trip() -> MazeResult<()> {
    let dir = TempDir::new()?;
    let output = dir.path().join("loops.txt");
    let config = MazeConfig::new(11, 9, Point::new(0, 8), Point::new(10, 0))
        .with_seed(7)
        .with_perfect(false)
        .with_algorithm(CarverKind::Kruskal)
        .with_output_file(&output);

    let mut generator = MazeGenerator::new(config)?;
    generator.generate()?;
    let path = generator.solve_shortest_path()?;
    generator.write_output_file(&path)?;

    let decoded = decode(&fs::read_to_string(&output)?)?;
    assert_eq!(decoded.maze.width, 11);
    assert_eq!(decoded.maze.height, 9);
    let report = MazeValidator::new().validate_maze(
        &decoded.maze,
        &ValidationOptions {
            perfect: false,
            expected_closed: pattern::forty_two(11, 9),
        },
    );
    assert!(report.ok, "{:?}", report.messages());
    Ok(())
}

#[test]
fn test_bad_config_files() {
    let dir = TempDir::new().unwrap();
    let cases = [
        ("WIDTH=5\nHEIGHT=5\nENTRY=0,0\nEXIT=4,4\nPERFECT=True\n", "OUTPUT_FILE"),
        ("WIDTH=0\nHEIGHT=5\nENTRY=0,0\nEXIT=4,4\nOUTPUT_FILE=m.txt\nPERFECT=True\n", "WIDTH"),
        ("WIDTH=5\nHEIGHT=5\nENTRY=0,0\nEXIT=4,4\nOUTPUT_FILE=m.txt\nPERFECT=maybe\n", "PERFECT"),
        ("WIDTH=5\nHEIGHT=5\nENTRY=0,0\nEXIT=5,4\nOUTPUT_FILE=m.txt\nPERFECT=True\n", "EXIT"),
    ];
    for (body, needle) in cases {
        let path = write_config(&dir, body);
        match MazeConfig::from_file(&path) {
            Err(MazeError::InvalidConfig(msg)) => {
                assert!(msg.contains(needle), "'{msg}' should mention {needle}")
            }
            other => panic!("expected invalid config for {body:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_missing_config_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        MazeConfig::from_file(dir.path().join("absent.txt")),
        Err(MazeError::Io(_))
    ));
}

#[test]
fn test_row_length_error_names_row() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("broken.txt");
    fs::write(&file, "D5\nFF\n\n0,0\n1,1\nS\n").unwrap();
    match MazeValidator::new().validate_output_file(&file, 3, 2) {
        Err(MazeError::MalformedOutput(msg)) => assert!(msg.contains("row 0"), "{msg}"),
        other => panic!("expected malformed output, got {other:?}"),
    }
}

#[test]
fn test_invalid_path_symbol_is_a_violation() {
    let mut maze = Maze::new(2, 1, Point::new(0, 0), Point::new(1, 0));
    maze.open_wall(Point::new(0, 0), Direction::East);
    let report = MazeValidator::new().validate_path_is_shortest(&maze, "Q", None);
    assert!(!report.ok);
    assert_eq!(
        report.violations,
        vec![Violation::InvalidPathCharacter {
            index: 0,
            symbol: 'Q'
        }]
    );
}

#[test]
fn test_fully_open_grid_is_rejected() {
    let mut maze = Maze::new(3, 3, Point::new(0, 0), Point::new(2, 2));
    let points: Vec<Point> = maze.points().collect();
    for p in points {
        maze.open_wall(p, Direction::East);
        maze.open_wall(p, Direction::South);
    }
    let validator = MazeValidator::new();
    let report = validator.validate_maze(
        &maze,
        &ValidationOptions {
            perfect: true,
            expected_closed: None,
        },
    );
    assert!(report.has(ViolationKind::OpenArea));
    assert!(report.has(ViolationKind::Perfect));
    assert!(!report.has(ViolationKind::Borders));

    let route = validator.validate_path_is_shortest(&maze, "EESS", None);
    assert!(route.ok, "{:?}", route.messages());
    let route = validator.validate_path_is_shortest(&maze, "EESWES", None);
    assert!(route.has(ViolationKind::PathShortest));
}
