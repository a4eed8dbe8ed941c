//! cube-solver - solve a scrambled cube from the command line
//!
//! Takes a scramble in face-turn notation, builds the lookup tables and
//! streams every improving solution the two-phase search finds:
//!
//!     cube-solver "R U R' U' F2 D B"
//!
//! Table construction takes a few seconds; run with -v (or RUST_LOG)
//! for per-table progress.

use clap::Parser;
use cube_solver::{format_moves, parse_moves, Cube, Solver, Tables, DEFAULT_DEPTH_CAP};
use log::LevelFilter;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "cube-solver")]
#[command(about = "Two-phase Rubik's cube solver")]
#[command(version)]
struct Args {
    /// Scramble to solve, e.g. "R U R' U'"
    scramble: String,

    /// Stop after the first solution instead of searching for shorter ones
    #[arg(short = '1', long = "first")]
    first: bool,

    /// Bound on the phase-1 search depth
    #[arg(long = "max-depth", default_value_t = DEFAULT_DEPTH_CAP)]
    max_depth: usize,

    /// Verbose output - show table build and search progress
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    let scramble = match parse_moves(&args.scramble) {
        Some(moves) => moves,
        None => {
            eprintln!("Error: cannot parse scramble '{}'", args.scramble);
            std::process::exit(1);
        }
    };

    let tables = Tables::build();
    let cube = Cube::solved().apply_moves(&scramble);

    let mut solver = Solver::new(&tables);
    solver.set_depth_cap(args.max_depth);

    println!("Scramble ({} moves): {}", scramble.len(), format_moves(&scramble));

    let start = Instant::now();
    let mut found = false;
    solver.solve(&cube, |solution| {
        found = true;
        println!(
            "{:>6.2}s  {:2} moves: {}",
            start.elapsed().as_secs_f64(),
            solution.len(),
            format_moves(solution)
        );
        !args.first
    });

    if !found {
        println!("No solution within depth {}", args.max_depth);
    }
}
