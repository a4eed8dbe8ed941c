//! Face-turn notation
//!
//! The search works purely on move IDs; this module translates to and
//! from the usual "U", "U2", "U'" names at the API boundary.

use super::types::*;

const MOVE_NAMES: [&str; NUM_MOVES] = [
    "U", "U2", "U'", "L", "L2", "L'", "F", "F2", "F'", "R", "R2", "R'", "B", "B2", "B'", "D",
    "D2", "D'",
];

/// Canonical name of a move
#[inline]
pub fn move_name(mv: Move) -> &'static str {
    MOVE_NAMES[mv]
}

/// Format a move sequence as space-separated face-turn notation
pub fn format_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|&mv| move_name(mv))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse one token such as "R", "R2" or "R'" ("R3" is accepted for "R'")
pub fn parse_move(token: &str) -> Option<Move> {
    let mut chars = token.chars();
    let face = match chars.next()? {
        'U' => FACE_U,
        'L' => FACE_L,
        'F' => FACE_F,
        'R' => FACE_R,
        'B' => FACE_B,
        'D' => FACE_D,
        _ => return None,
    };
    let qturns = match chars.next() {
        None => 1,
        Some('2') => 2,
        Some('\'') | Some('3') => 3,
        _ => return None,
    };
    if chars.next().is_some() {
        return None;
    }
    Some(3 * face + qturns - 1)
}

/// Parse a whitespace-separated move sequence
pub fn parse_moves(s: &str) -> Option<Vec<Move>> {
    s.split_whitespace().map(parse_move).collect()
}

/// The move undoing a move (U -> U', U2 -> U2, U' -> U)
#[inline]
pub fn inverse_move(mv: Move) -> Move {
    3 * move_face(mv) + 2 - mv % 3
}

/// The sequence undoing a sequence: inverses in reverse order
pub fn invert_moves(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|&mv| inverse_move(mv)).collect()
}
