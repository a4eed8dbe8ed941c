//! Cubie-level cube representation
//!
//! A cube is four slot-indexed arrays: which corner sits in each corner
//! slot and how far it is twisted, which edge sits in each edge slot and
//! whether it is flipped. Twists sum to 0 mod 3 and flips to 0 mod 2 on
//! any reachable state, and `apply_move` preserves both invariants.

use super::types::*;
use thiserror::Error;

/// Error returned when caller-supplied state vectors do not describe a cube
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid cube state: {0}")]
pub struct InvalidState(pub &'static str);

/// A cube at the cubie level
///
/// `corner_perm[slot]` is the corner occupying `slot` and
/// `corner_orient[slot]` its clockwise twist; likewise for edges.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cube {
    pub(crate) corner_perm: [u8; NUM_CORNERS],
    pub(crate) corner_orient: [u8; NUM_CORNERS],
    pub(crate) edge_perm: [u8; NUM_EDGES],
    pub(crate) edge_orient: [u8; NUM_EDGES],
}

/// Corner slots cycled clockwise by one turn of each face, in face order
const CORNER_CYCLES: [[u8; 4]; NUM_FACES] = [
    [CORNER_URF, CORNER_UFL, CORNER_ULB, CORNER_UBR], // U
    [CORNER_UFL, CORNER_DLF, CORNER_DBL, CORNER_ULB], // L
    [CORNER_URF, CORNER_DFR, CORNER_DLF, CORNER_UFL], // F
    [CORNER_URF, CORNER_UBR, CORNER_DRB, CORNER_DFR], // R
    [CORNER_UBR, CORNER_ULB, CORNER_DBL, CORNER_DRB], // B
    [CORNER_DFR, CORNER_DRB, CORNER_DBL, CORNER_DLF], // D
];

/// Edge slots cycled clockwise by one turn of each face, in face order
const EDGE_CYCLES: [[u8; 4]; NUM_FACES] = [
    [EDGE_UF, EDGE_UL, EDGE_UB, EDGE_UR], // U
    [EDGE_UL, EDGE_FL, EDGE_DL, EDGE_BL], // L
    [EDGE_UF, EDGE_FR, EDGE_DF, EDGE_FL], // F
    [EDGE_UR, EDGE_BR, EDGE_DR, EDGE_FR], // R
    [EDGE_UB, EDGE_BL, EDGE_DB, EDGE_BR], // B
    [EDGE_DF, EDGE_DR, EDGE_DB, EDGE_DL], // D
];

/// Twist added to each cycled corner by a single clockwise turn
const CORNER_TWISTS: [[u8; 4]; NUM_FACES] = [
    [TWIST_NONE, TWIST_NONE, TWIST_NONE, TWIST_NONE], // U
    [TWIST_CCW, TWIST_CW, TWIST_CCW, TWIST_CW],       // L
    [TWIST_CCW, TWIST_CW, TWIST_CCW, TWIST_CW],       // F
    [TWIST_CW, TWIST_CCW, TWIST_CW, TWIST_CCW],       // R
    [TWIST_CW, TWIST_CCW, TWIST_CW, TWIST_CCW],       // B
    [TWIST_NONE, TWIST_NONE, TWIST_NONE, TWIST_NONE], // D
];

/// Flip added to each cycled edge by a single clockwise turn
const EDGE_FLIPS: [[u8; 4]; NUM_FACES] = [
    [FLIP_NONE; 4],                                   // U
    [FLIP_NONE; 4],                                   // L
    [FLIP_FLIP, FLIP_FLIP, FLIP_FLIP, FLIP_FLIP],     // F
    [FLIP_NONE; 4],                                   // R
    [FLIP_FLIP, FLIP_FLIP, FLIP_FLIP, FLIP_FLIP],     // B
    [FLIP_NONE; 4],                                   // D
];

impl Cube {
    /// Create a solved cube (identity permutations, zero orientations)
    pub const fn solved() -> Self {
        Cube {
            corner_perm: [0, 1, 2, 3, 4, 5, 6, 7],
            corner_orient: [0; NUM_CORNERS],
            edge_perm: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
            edge_orient: [0; NUM_EDGES],
        }
    }

    /// Create a cube from explicit permutation and orientation vectors
    ///
    /// Rejects out-of-range orientations, non-permutation data and
    /// broken twist/flip parity. Whether the state is actually reachable
    /// from solved is not checked.
    pub fn from_parts(
        corner_perm: [u8; NUM_CORNERS],
        corner_orient: [u8; NUM_CORNERS],
        edge_perm: [u8; NUM_EDGES],
        edge_orient: [u8; NUM_EDGES],
    ) -> Result<Self, InvalidState> {
        if !is_permutation(&corner_perm) {
            return Err(InvalidState("corner_perm is not a permutation of 0..8"));
        }
        if !is_permutation(&edge_perm) {
            return Err(InvalidState("edge_perm is not a permutation of 0..12"));
        }
        if corner_orient.iter().any(|&o| o >= 3) {
            return Err(InvalidState("corner twist out of range"));
        }
        if edge_orient.iter().any(|&o| o >= 2) {
            return Err(InvalidState("edge flip out of range"));
        }
        if corner_orient.iter().map(|&o| o as u32).sum::<u32>() % 3 != 0 {
            return Err(InvalidState("corner twists do not sum to 0 mod 3"));
        }
        if edge_orient.iter().map(|&o| o as u32).sum::<u32>() % 2 != 0 {
            return Err(InvalidState("edge flips do not sum to 0 mod 2"));
        }
        Ok(Cube {
            corner_perm,
            corner_orient,
            edge_perm,
            edge_orient,
        })
    }

    /// Apply one move and return the resulting cube
    ///
    /// Each piece on the turned face advances `qturns` steps along the
    /// face's cycle and picks up the twist/flip of every cycle position
    /// it passes through. The result is assembled from the old state so
    /// the cycle cannot read its own writes.
    pub fn apply_move(&self, mv: Move) -> Cube {
        let face = move_face(mv);
        let qturns = move_qturns(mv);
        let corners = &CORNER_CYCLES[face];
        let edges = &EDGE_CYCLES[face];
        let twists = &CORNER_TWISTS[face];
        let flips = &EDGE_FLIPS[face];

        let mut next = *self;
        for i in 0..4 {
            let from = corners[i] as usize;
            let to = corners[(i + qturns) % 4] as usize;
            let mut twist = 0;
            for j in 0..qturns {
                twist += twists[(i + j) % 4];
            }
            next.corner_perm[to] = self.corner_perm[from];
            next.corner_orient[to] = (self.corner_orient[from] + twist) % 3;
        }
        for i in 0..4 {
            let from = edges[i] as usize;
            let to = edges[(i + qturns) % 4] as usize;
            let mut flip = 0;
            for j in 0..qturns {
                flip += flips[(i + j) % 4];
            }
            next.edge_perm[to] = self.edge_perm[from];
            next.edge_orient[to] = (self.edge_orient[from] + flip) % 2;
        }
        next
    }

    /// Apply a sequence of moves in order
    pub fn apply_moves(&self, moves: &[Move]) -> Cube {
        moves.iter().fold(*self, |cube, &mv| cube.apply_move(mv))
    }

    /// Check whether this cube is solved
    #[inline]
    pub fn is_solved(&self) -> bool {
        *self == Cube::solved()
    }

    /// Get the corner permutation vector
    #[inline]
    pub fn corner_perm(&self) -> &[u8; NUM_CORNERS] {
        &self.corner_perm
    }

    /// Get the corner orientation vector
    #[inline]
    pub fn corner_orient(&self) -> &[u8; NUM_CORNERS] {
        &self.corner_orient
    }

    /// Get the edge permutation vector
    #[inline]
    pub fn edge_perm(&self) -> &[u8; NUM_EDGES] {
        &self.edge_perm
    }

    /// Get the edge orientation vector
    #[inline]
    pub fn edge_orient(&self) -> &[u8; NUM_EDGES] {
        &self.edge_orient
    }
}

impl Default for Cube {
    fn default() -> Self {
        Cube::solved()
    }
}

fn is_permutation(values: &[u8]) -> bool {
    let mut seen = [false; NUM_EDGES];
    for &v in values {
        if v as usize >= values.len() || seen[v as usize] {
            return false;
        }
        seen[v as usize] = true;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn parities_hold(cube: &Cube) -> bool {
        cube.corner_orient.iter().map(|&o| o as u32).sum::<u32>() % 3 == 0
            && cube.edge_orient.iter().map(|&o| o as u32).sum::<u32>() % 2 == 0
    }

    #[test]
    fn test_solved_is_solved() {
        assert!(Cube::solved().is_solved());
        assert!(!Cube::solved().apply_move(MOVE_R).is_solved());
    }

    #[test]
    fn test_four_quarter_turns_restore() {
        for face in 0..NUM_FACES {
            let quarter = 3 * face;
            let mut cube = Cube::solved().apply_moves(&[MOVE_R, MOVE_U2, MOVE_FP, MOVE_D]);
            let start = cube;
            for _ in 0..4 {
                cube = cube.apply_move(quarter);
            }
            assert_eq!(cube, start, "face {face} quarter turn has order 4");
        }
    }

    #[test]
    fn test_half_turn_is_two_quarters() {
        let scramble = Cube::solved().apply_moves(&[MOVE_B, MOVE_L2, MOVE_U, MOVE_RP]);
        for face in 0..NUM_FACES {
            let quarter = 3 * face;
            let half = quarter + 1;
            assert_eq!(
                scramble.apply_move(half),
                scramble.apply_move(quarter).apply_move(quarter)
            );
        }
    }

    #[test]
    fn test_counterclockwise_is_three_quarters() {
        let scramble = Cube::solved().apply_moves(&[MOVE_F, MOVE_D2, MOVE_LP]);
        for face in 0..NUM_FACES {
            let quarter = 3 * face;
            let ccw = quarter + 2;
            assert_eq!(
                scramble.apply_move(ccw),
                scramble
                    .apply_move(quarter)
                    .apply_move(quarter)
                    .apply_move(quarter)
            );
        }
    }

    #[test]
    fn test_moves_preserve_parity() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut cube = Cube::solved();
        for _ in 0..200 {
            cube = cube.apply_move(rng.gen_range(0..NUM_MOVES));
            assert!(parities_hold(&cube));
            let mut seen = [false; NUM_EDGES];
            for &e in &cube.edge_perm {
                assert!(!seen[e as usize]);
                seen[e as usize] = true;
            }
        }
    }

    #[test]
    fn test_apply_move_does_not_mutate() {
        let cube = Cube::solved().apply_move(MOVE_F);
        let copy = cube;
        let _ = cube.apply_move(MOVE_R2);
        assert_eq!(cube, copy);
    }

    #[test]
    fn test_from_parts_accepts_valid_state() {
        let solved = Cube::solved();
        let rebuilt = Cube::from_parts(
            solved.corner_perm,
            solved.corner_orient,
            solved.edge_perm,
            solved.edge_orient,
        )
        .unwrap();
        assert_eq!(rebuilt, solved);
    }

    #[test]
    fn test_from_parts_rejects_bad_states() {
        let s = Cube::solved();
        // duplicate corner
        assert!(Cube::from_parts([0, 0, 2, 3, 4, 5, 6, 7], s.corner_orient, s.edge_perm, s.edge_orient).is_err());
        // twist out of range
        assert!(Cube::from_parts(s.corner_perm, [3, 0, 0, 0, 0, 0, 0, 0], s.edge_perm, s.edge_orient).is_err());
        // twist parity broken
        assert!(Cube::from_parts(s.corner_perm, [1, 0, 0, 0, 0, 0, 0, 0], s.edge_perm, s.edge_orient).is_err());
        // flip parity broken
        let mut eo = s.edge_orient;
        eo[3] = 1;
        assert!(Cube::from_parts(s.corner_perm, s.corner_orient, s.edge_perm, eo).is_err());
    }
}
