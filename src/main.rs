use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use slog::{info, o, Drain, Logger};

use hexfloor::{Coord, HashedWorld, Sim, SimConfig, World, SIMULATION_GENERATIONS};

/// Counts black floor tiles from a decoded stream of hex moves.
#[derive(Debug, Parser)]
#[command(version, about)]
struct CliArgs {
    /// JSON array of `[x, y]` moves, `[0, 0]` closing each line.
    input_path: PathBuf,

    /// Days to simulate after the initial flips.
    #[arg(short, long, default_value_t = SIMULATION_GENERATIONS)]
    generations: usize,

    /// Worker threads for large generations.
    #[arg(short, long)]
    threads: Option<usize>,

    /// Only count the tiles flipped by the input.
    #[arg(long)]
    no_simulate: bool,
}

fn root_logger() -> Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    Logger::root(drain, o!("version" => env!("CARGO_PKG_VERSION")))
}

fn read_steps(path: &Path) -> Result<Vec<Coord>> {
    let content = fs::read_to_string(path)?;
    let steps = serde_json::from_str(&content)?;
    Ok(steps)
}

/// Black tiles after the initial flips, and after the configured days when
/// `simulate` is set. The input is decoded once.
fn paint_counts(sim: &Sim, steps: Vec<Coord>, simulate: bool) -> (usize, Option<usize>) {
    let floor: HashedWorld = hexfloor::decode(steps);
    let flipped = floor.len();
    let painted = simulate.then(|| sim.advance(floor, sim.config().generations).len());
    (flipped, painted)
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let log = root_logger();

    let steps = read_steps(&args.input_path).with_context(|| {
        format!(
            "Failed to read hex moves from given input file({})",
            args.input_path.display()
        )
    })?;
    info!(log, "input loaded"; "steps" => steps.len(), "lines" => hexfloor::lines(steps.iter().copied()).len());

    let mut config = SimConfig::default().generations(args.generations);
    if let Some(threads) = args.threads {
        config = config.thread_count(threads);
    }
    let sim = Sim::new(config, &log);

    let (flipped, painted) = paint_counts(&sim, steps, !args.no_simulate);
    println!("{flipped} tiles are black after the initial flips.");
    if let Some(painted) = painted {
        println!(
            "{painted} tiles are black after {} days.",
            sim.config().generations
        );
    }

    Ok(())
}

#[test]
fn test_paint_counts_from_one_decode() {
    use hexfloor::coord;

    let sim = Sim::default();
    // two lone tiles, (2, 0) and (10, 0), both white after the first day
    let mut steps = vec![coord!(2, 0), coord!(0, 0)];
    steps.extend([coord!(2, 0); 5]);
    steps.push(coord!(0, 0));
    assert_eq!(paint_counts(&sim, steps.clone(), false), (2, None));
    assert_eq!(paint_counts(&sim, steps, true), (0, Some(0)));
}
