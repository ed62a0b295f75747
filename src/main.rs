//! # Amazeing Command Line
//!
//! Generates a maze from a configuration file, or validates an existing output
//! file.

use amazeing::{
    decode, generation::pattern, render_ascii, ClosedPattern, MazeConfig,
    MazeError, MazeGenerator, MazeResult, MazeValidator, ValidationOptions, ValidationResult,
};
use clap::{Parser, Subcommand};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "amazeing")]
#[command(about = "Generate, solve and verify wall-mask mazes")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a maze from a KEY=VALUE configuration file
    Generate {
        /// Configuration file
        config: PathBuf,

        /// Random seed, overriding SEED from the configuration
        #[arg(short, long)]
        seed: Option<u64>,

        /// Overlay the shortest path on the printed maze
        #[arg(long)]
        show_path: bool,

        /// Do not print the maze
        #[arg(short, long)]
        quiet: bool,
    },

    /// Validate an output file
    Validate {
        /// Output file to check
        file: PathBuf,

        /// Declared width; inferred from the first row when omitted
        #[arg(long, requires = "height")]
        width: Option<usize>,

        /// Declared height; inferred from the row count when omitted
        #[arg(long, requires = "width")]
        height: Option<usize>,

        /// Require a perfect maze
        #[arg(long)]
        perfect: bool,

        /// Expect the closed-cell "42" pattern for these dimensions
        #[arg(long)]
        pattern: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Starting amazeing v{}", amazeing::VERSION);

    let outcome = match args.command {
        Command::Generate {
            config,
            seed,
            show_path,
            quiet,
        } => run_generate(&config, seed, show_path, quiet).map(|_| true),
        Command::Validate {
            file,
            width,
            height,
            perfect,
            pattern,
            json,
        } => run_validate(&file, width.zip(height), perfect, pattern, json),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e}");
            match &e {
                MazeError::Io(_) => eprintln!("Error: {e}"),
                MazeError::InvalidConfig(_) => eprintln!("Error: invalid configuration: {e}"),
                MazeError::GenerationFailed(_) | MazeError::SolveFailed(_) => {
                    eprintln!("Error: generation failed: {e}")
                }
                MazeError::MalformedOutput(_) => eprintln!("Error: invalid output file: {e}"),
                other => eprintln!("Error: unexpected failure: {other}"),
            }
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logger. `RUST_LOG` takes precedence over `--log-level`.
fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .parse_default_env()
        .init();
}

fn run_generate(
    config_path: &std::path::Path,
    seed: Option<u64>,
    show_path: bool,
    quiet: bool,
) -> MazeResult<()> {
    let mut config = MazeConfig::from_file(config_path)?;
    if seed.is_some() {
        config.seed = seed;
    }

    let mut generator = MazeGenerator::new(config)?;
    generator.generate()?;
    let path = generator.solve_shortest_path()?;
    info!("Shortest path has {} steps", path.len());

    if !quiet {
        if let Some(maze) = generator.maze() {
            let overlay = show_path.then_some(&path);
            print!("{}", render_ascii(maze, generator.closed_cells(), overlay));
        }
    }

    generator.write_output_file(&path)
}

fn run_validate(
    file: &std::path::Path,
    dimensions: Option<(usize, usize)>,
    perfect: bool,
    expect_pattern: bool,
    json: bool,
) -> MazeResult<bool> {
    let validator = MazeValidator::new();
    let decoded = match dimensions {
        Some((width, height)) => validator.validate_output_file(file, width, height)?,
        None => decode(&std::fs::read_to_string(file)?)?,
    };
    let maze = &decoded.maze;

    let expected_closed: Option<ClosedPattern> = if expect_pattern {
        pattern::forty_two(maze.width, maze.height)
    } else {
        None
    };

    let structure = validator.validate_maze(
        maze,
        &ValidationOptions {
            perfect,
            expected_closed: expected_closed.clone(),
        },
    );
    let route = validator.validate_path_is_shortest(
        maze,
        &decoded.path.to_string(),
        expected_closed.as_ref(),
    );

    let ok = structure.ok && route.ok;
    if json {
        let report = serde_json::json!({
            "ok": ok,
            "maze": structure,
            "path": route,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report("Maze", &structure);
        print_report("Path", &route);
        println!("{}", if ok { "OK" } else { "FAILED" });
    }
    Ok(ok)
}

fn print_report(label: &str, result: &ValidationResult) {
    if result.ok {
        println!("{label}: no violations");
        return;
    }
    println!("{label}: {} violation(s)", result.violations.len());
    for message in result.messages() {
        println!("  - {message}");
    }
}
