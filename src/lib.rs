//! Two-phase Rubik's cube solver
//!
//! Solves an arbitrary legal 3x3x3 cube with Kociemba's two-phase
//! algorithm: phase 1 brings the cube into the subgroup generated by
//! U, D, L2, R2, F2, B2, phase 2 finishes inside it.
//!
//! The machinery:
//! - A cubie-level cube model with per-face move application
//! - Integer coordinates that split the state into small independent parts
//! - Dense transition tables mapping (coordinate, move) to coordinate
//! - BFS pruning tables over coordinate pairs
//! - Iterative-deepening depth-first search in both phases, chaining
//!   phase-1 solutions into phase-2 searches and streaming every
//!   strictly shorter solution to a caller-supplied callback
//!
//! # Example
//!
//! ```no_run
//! use cube_solver::{format_moves, parse_moves, Cube, Solver, Tables};
//!
//! let tables = Tables::build();
//! let scramble = parse_moves("R U").unwrap();
//! let cube = Cube::solved().apply_moves(&scramble);
//!
//! let solver = Solver::new(&tables);
//! solver.solve(&cube, |solution| {
//!     println!("{} moves: {}", solution.len(), format_moves(solution));
//!     true // keep searching for shorter solutions
//! });
//! ```

pub mod coords;
pub mod cube;
pub mod notation;
pub mod phase;
pub mod prune;
pub mod solver;
pub mod trans;
pub mod types;

pub use cube::{Cube, InvalidState};
pub use notation::{format_moves, inverse_move, invert_moves, move_name, parse_move, parse_moves};
pub use phase::{is_phase2_move, AllowedMoves, PHASE1_MOVES, PHASE2_MOVES};
pub use prune::{PruneTable, PruneTables};
pub use solver::{Solver, Tables, DEFAULT_DEPTH_CAP};
pub use trans::{TransTable, TransTables};
pub use types::{move_face, move_qturns, Face, Move, MOVE_NONE, NUM_CORNERS, NUM_EDGES, NUM_MOVES};

#[cfg(test)]
mod tests;
