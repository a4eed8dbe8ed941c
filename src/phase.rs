//! Move alphabets and the allowed-move filter for the two phases
//!
//! Phase 1 uses all 18 moves; phase 2 only the subgroup generators
//! U, U2, U', L2, F2, R2, B2, D, D2, D'. In both phases a move may not
//! repeat the face of its predecessor, and of each commuting face pair
//! only one order is kept: no U after D, no L after R, no F after B.

use super::types::*;

/// The full phase-1 move alphabet, in move-id order
pub const PHASE1_MOVES: [Move; NUM_MOVES] = [
    MOVE_U, MOVE_U2, MOVE_UP, MOVE_L, MOVE_L2, MOVE_LP, MOVE_F, MOVE_F2, MOVE_FP, MOVE_R,
    MOVE_R2, MOVE_RP, MOVE_B, MOVE_B2, MOVE_BP, MOVE_D, MOVE_D2, MOVE_DP,
];

/// The phase-2 move alphabet, in move-id order
pub const PHASE2_MOVES: [Move; 10] = [
    MOVE_U, MOVE_U2, MOVE_UP, MOVE_L2, MOVE_F2, MOVE_R2, MOVE_B2, MOVE_D, MOVE_D2, MOVE_DP,
];

/// Check whether a move belongs to the phase-2 alphabet
#[inline]
pub fn is_phase2_move(mv: Move) -> bool {
    PHASE2_MOVES.contains(&mv)
}

/// Precomputed follower lists: for each previous move (or `MOVE_NONE`)
/// the moves that may legally come next in each phase
#[derive(Clone, PartialEq, Eq)]
pub struct AllowedMoves {
    phase1: Vec<Vec<Move>>,
    phase2: Vec<Vec<Move>>,
}

impl AllowedMoves {
    /// Build the follower lists for both phases
    pub fn build() -> Self {
        let mut phase1 = Vec::with_capacity(NUM_MOVES + 1);
        let mut phase2 = Vec::with_capacity(NUM_MOVES + 1);
        for prev in 0..=NUM_MOVES {
            phase1.push(
                PHASE1_MOVES
                    .iter()
                    .copied()
                    .filter(|&mv| may_follow(prev, mv))
                    .collect(),
            );
            phase2.push(
                PHASE2_MOVES
                    .iter()
                    .copied()
                    .filter(|&mv| may_follow(prev, mv))
                    .collect(),
            );
        }
        AllowedMoves { phase1, phase2 }
    }

    /// Moves allowed after `prev` in phase 1
    #[inline]
    pub fn phase1(&self, prev: Move) -> &[Move] {
        &self.phase1[prev]
    }

    /// Moves allowed after `prev` in phase 2
    #[inline]
    pub fn phase2(&self, prev: Move) -> &[Move] {
        &self.phase2[prev]
    }
}

/// A move may not repeat its predecessor's face, and when the faces are
/// opposite only the lower-id-first order is kept (U before D, L before
/// R, F before B)
fn may_follow(prev: Move, next: Move) -> bool {
    if prev == MOVE_NONE {
        return true;
    }
    let prev_face = move_face(prev);
    let next_face = move_face(next);
    if prev_face == next_face {
        return false;
    }
    if opposite_face(prev_face) == next_face && prev_face > next_face {
        return false;
    }
    true
}
