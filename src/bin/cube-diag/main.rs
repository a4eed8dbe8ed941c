//! cube-diag - table and solver diagnostics
//!
//! Usage: cube-diag [-n <count>] [-l <length>] [-s <seed>] [-V]
//!
//! Builds the lookup tables, reports the pruning-depth distribution of
//! each pruning table, then solves <count> random <length>-move
//! scrambles (first solution only) and prints per-solve and aggregate
//! lengths and timings.

use cube_solver::{format_moves, Cube, Move, Solver, Tables, NUM_MOVES};
use rand::prelude::*;
use std::env;
use std::time::Instant;

fn main() {
    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let mut count = 10usize;
    let mut scramble_len = 25usize;
    let mut seed = 1u64;
    let mut verbose = false;
    let mut i = 1;
    while i < args.len() {
        if args[i] == "-n" && i + 1 < args.len() {
            count = args[i + 1].parse().unwrap_or(count);
            i += 2;
        } else if args[i] == "-l" && i + 1 < args.len() {
            scramble_len = args[i + 1].parse().unwrap_or(scramble_len);
            i += 2;
        } else if args[i] == "-s" && i + 1 < args.len() {
            seed = args[i + 1].parse().unwrap_or(seed);
            i += 2;
        } else if args[i] == "-V" {
            verbose = true;
            i += 1;
        } else {
            eprintln!("Usage: cube-diag [-n <count>] [-l <length>] [-s <seed>] [-V]");
            std::process::exit(1);
        }
    }

    env_logger::init();

    let build_start = Instant::now();
    let tables = Tables::build();
    println!(
        "Tables built in {:.2}s",
        build_start.elapsed().as_secs_f64()
    );

    let prune_tables = [
        ("CO x EO        ", &tables.prune.co_eo),
        ("CO x slice pos ", &tables.prune.co_ud),
        ("EO x slice pos ", &tables.prune.eo_ud),
        ("CP x slice perm", &tables.prune.cp_ud),
        ("EP x slice perm", &tables.prune.ep_ud),
    ];
    for (name, table) in prune_tables {
        println!(
            "{name}  {:>8} entries, max depth {:2}",
            table.size(),
            table.max_depth()
        );
        if verbose {
            for (depth, count) in table.depth_counts().iter().enumerate() {
                if *count > 0 {
                    println!("    depth {depth:2}: {count}");
                }
            }
        }
    }

    // Solve random scrambles, first solution each
    let mut rng = StdRng::seed_from_u64(seed);
    let solver = Solver::new(&tables);
    let mut total_len = 0usize;
    let mut total_time = 0.0f64;
    let mut solved = 0usize;

    for n in 0..count {
        let scramble: Vec<Move> = (0..scramble_len)
            .map(|_| rng.gen_range(0..NUM_MOVES))
            .collect();
        let cube = Cube::solved().apply_moves(&scramble);

        let solve_start = Instant::now();
        let mut first: Option<Vec<Move>> = None;
        solver.solve(&cube, |solution| {
            first = Some(solution.to_vec());
            false
        });
        let elapsed = solve_start.elapsed().as_secs_f64();

        match first {
            Some(solution) => {
                let ok = cube.apply_moves(&solution).is_solved();
                println!(
                    "{:3}: {:2} moves {:>8.3}s {} {}",
                    n + 1,
                    solution.len(),
                    elapsed,
                    if ok { "ok " } else { "BAD" },
                    format_moves(&solution)
                );
                total_len += solution.len();
                total_time += elapsed;
                solved += 1;
            }
            None => println!("{:3}: no solution found", n + 1),
        }
    }

    if solved > 0 {
        println!(
            "{solved} cubes, average {:.1} moves in {:.3}s",
            total_len as f64 / solved as f64,
            total_time / solved as f64
        );
    }
}
