//! End-to-end solver test suite
//!
//! Builds one shared set of tables and drives the full two-phase search
//! through literal scramble scenarios plus randomized checks.

use super::cube::Cube;
use super::notation::parse_moves;
use super::phase::is_phase2_move;
use super::solver::{Solver, Tables};
use super::types::*;
use rand::prelude::*;
use std::sync::OnceLock;

/// Tables are expensive to build; every test shares one instance
pub(crate) fn tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(Tables::build)
}

/// Run the search to natural termination, collecting every solution
fn solve_to_exhaustion(cube: &Cube) -> Vec<Vec<Move>> {
    let mut solutions = Vec::new();
    Solver::new(tables()).solve(cube, |solution| {
        solutions.push(solution.to_vec());
        true
    });
    solutions
}

/// Run the search until a solution no longer than `target_len` appears
fn solve_until(cube: &Cube, target_len: usize) -> Vec<Vec<Move>> {
    let mut solutions = Vec::new();
    Solver::new(tables()).solve(cube, |solution| {
        solutions.push(solution.to_vec());
        solution.len() > target_len
    });
    solutions
}

/// Each emitted solution must be strictly shorter than the previous one
/// and must actually solve the scrambled cube
fn check_solution_stream(cube: &Cube, solutions: &[Vec<Move>]) {
    assert!(!solutions.is_empty(), "no solution found");
    for pair in solutions.windows(2) {
        assert!(pair[1].len() < pair[0].len(), "improvements must shrink");
    }
    for solution in solutions {
        assert!(cube.apply_moves(solution).is_solved());
    }
}

struct TestCase {
    name: &'static str,
    scramble: &'static str,
    max_len: usize,
}

const SCRAMBLE_CASES: &[TestCase] = &[
    TestCase {
        name: "two quarter turns",
        scramble: "R U",
        max_len: 2,
    },
    TestCase {
        name: "sexy move",
        scramble: "R U R' U'",
        max_len: 4,
    },
    TestCase {
        name: "six half turns",
        scramble: "F2 R2 U2 D2 L2 B2",
        max_len: 12,
    },
];

#[test]
fn test_scramble_cases() {
    for case in SCRAMBLE_CASES {
        let scramble = parse_moves(case.scramble).unwrap();
        let cube = Cube::solved().apply_moves(&scramble);
        let solutions = solve_to_exhaustion(&cube);
        check_solution_stream(&cube, &solutions);
        let best = solutions.last().unwrap();
        assert!(
            best.len() <= case.max_len,
            "{}: best solution has {} moves, expected at most {}",
            case.name,
            best.len(),
            case.max_len
        );
    }
}

#[test]
fn test_solved_cube_solves_in_zero_moves() {
    let cube = Cube::solved();
    let solutions = solve_to_exhaustion(&cube);
    assert_eq!(solutions, vec![Vec::<Move>::new()]);
}

#[test]
fn test_single_move_scramble() {
    let cube = Cube::solved().apply_move(MOVE_R);
    let solutions = solve_to_exhaustion(&cube);
    check_solution_stream(&cube, &solutions);
    assert_eq!(solutions.last().unwrap(), &vec![MOVE_RP]);
}

#[test]
fn test_phase1_solved_input_bypasses_phase1() {
    // D leaves orientations and slice edges untouched, so the very first
    // solution comes from a phase-2 search at phase-1 depth zero
    let cube = Cube::solved().apply_move(MOVE_D);
    let solutions = solve_to_exhaustion(&cube);
    check_solution_stream(&cube, &solutions);
    assert!(solutions[0].iter().all(|&mv| is_phase2_move(mv)));
    assert_eq!(solutions.last().unwrap(), &vec![MOVE_DP]);
}

#[test]
fn test_all_edges_flipped() {
    // every edge flipped in place, corners untouched
    let cube = Cube::from_parts(
        [0, 1, 2, 3, 4, 5, 6, 7],
        [0; NUM_CORNERS],
        [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
        [1; NUM_EDGES],
    )
    .unwrap();
    let solutions = solve_until(&cube, 24);
    check_solution_stream(&cube, &solutions);
    assert!(solutions.last().unwrap().len() <= 24);
}

#[test]
fn test_example_state() {
    let cube = Cube::from_parts(
        [3, 7, 6, 5, 0, 1, 4, 2],
        [1, 2, 1, 0, 0, 2, 2, 1],
        [4, 5, 7, 1, 10, 9, 3, 8, 6, 2, 0, 11],
        [0, 0, 1, 1, 1, 0, 1, 0, 0, 0, 0, 0],
    )
    .unwrap();
    let solutions = solve_until(&cube, 23);
    check_solution_stream(&cube, &solutions);
    assert!(solutions.last().unwrap().len() <= 23);
}

#[test]
fn test_random_scrambles_solve() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..3 {
        let mut cube = Cube::solved();
        for _ in 0..20 {
            cube = cube.apply_move(rng.gen_range(0..NUM_MOVES));
        }
        let mut first = None;
        Solver::new(tables()).solve(&cube, |solution| {
            first = Some(solution.to_vec());
            false
        });
        let solution = first.expect("no solution found");
        assert!(cube.apply_moves(&solution).is_solved());
    }
}

#[test]
fn test_search_is_deterministic() {
    let cube = Cube::solved().apply_moves(&parse_moves("R U").unwrap());
    assert_eq!(solve_to_exhaustion(&cube), solve_to_exhaustion(&cube));
}

#[test]
fn test_table_build_is_idempotent() {
    assert!(*tables() == Tables::build());
}

#[test]
fn test_medium_scramble_exhaustion() {
    // the scramble's inverse is 5 moves, so exhaustion must get there
    let scramble = parse_moves("L2 B D' R F").unwrap();
    let cube = Cube::solved().apply_moves(&scramble);
    let solutions = solve_to_exhaustion(&cube);
    check_solution_stream(&cube, &solutions);
    assert!(solutions.last().unwrap().len() <= 5);
}
