//! Move-transition tables
//!
//! A transition table stores, for every value of one coordinate and
//! every move, the coordinate value after that move, so the search can
//! walk coordinate space without touching a cube. The direct tables
//! (corner orientation, edge orientation, corner permutation, sorted
//! slice) are built by reconstructing a representative state for each
//! coordinate value; the derived tables (slice position, slice
//! permutation, phase-2 edge permutation) are computed from the sorted
//! slice table, so the build order matters.

use super::coords::{self, *};
use super::cube::Cube;
use super::phase::PHASE2_MOVES;
use super::types::*;
use itertools::Itertools;
use log::debug;
use std::time::Instant;

/// Transition table for one coordinate: `(coord, move) -> coord`
#[derive(Clone, PartialEq, Eq)]
pub struct TransTable {
    table: Vec<[u16; NUM_MOVES]>,
    solved_pos: u16,
}

impl TransTable {
    /// Look up the coordinate reached from `pos` by `mv`
    #[inline]
    pub fn lookup(&self, pos: usize, mv: Move) -> usize {
        self.table[pos][mv] as usize
    }

    /// The coordinate value of the solved cube
    #[inline]
    pub fn solved_pos(&self) -> usize {
        self.solved_pos as usize
    }

    /// Number of values the coordinate takes
    #[inline]
    pub fn size(&self) -> usize {
        self.table.len()
    }
}

/// All transition tables used by the two-phase search
///
/// One sorted-slice table serves the UD, RL and FB slices alike: the
/// underlying "four distinguished edges in twelve slots" problem is the
/// same for all three.
#[derive(Clone, PartialEq, Eq)]
pub struct TransTables {
    pub co: TransTable,
    pub eo: TransTable,
    pub cp: TransTable,
    pub slice_sorted: TransTable,
    pub ud_pos: TransTable,
    pub ud_perm: TransTable,
    pub ep: TransTable,
}

impl TransTables {
    /// Build all seven tables, direct tables first, derived tables after
    pub fn build() -> Self {
        let co = timed("corner orientation", build_corner_orientation);
        let eo = timed("edge orientation", build_edge_orientation);
        let cp = timed("corner permutation", build_corner_permutation);
        let slice_sorted = timed("sorted slice", build_slice_sorted);

        let ud_pos = build_ud_pos(&slice_sorted);
        let ud_perm = build_ud_perm(&slice_sorted);
        let ep = timed("edge permutation", || build_edge_permutation(&slice_sorted));

        TransTables {
            co,
            eo,
            cp,
            slice_sorted,
            ud_pos,
            ud_perm,
            ep,
        }
    }
}

fn timed(name: &str, build: impl FnOnce() -> TransTable) -> TransTable {
    let start = Instant::now();
    let table = build();
    debug!(
        "{name} transition table built in {:.3}s",
        start.elapsed().as_secs_f64()
    );
    table
}

/// Corner orientation table: reconstruct each of the 2187 twist vectors
/// (the eighth twist follows from parity) and apply every move
fn build_corner_orientation() -> TransTable {
    let mut table = vec![[0u16; NUM_MOVES]; CO_COUNT];
    for coord in 0..CO_COUNT {
        let mut cube = Cube::solved();
        cube.corner_orient = corner_orientation_decode(coord);
        let from = corner_orientation(&cube);
        for mv in 0..NUM_MOVES {
            table[from][mv] = corner_orientation(&cube.apply_move(mv)) as u16;
        }
    }
    TransTable {
        table,
        solved_pos: corner_orientation(&Cube::solved()) as u16,
    }
}

/// Edge orientation table: same construction over the 2048 flip vectors
fn build_edge_orientation() -> TransTable {
    let mut table = vec![[0u16; NUM_MOVES]; EO_COUNT];
    for coord in 0..EO_COUNT {
        let mut cube = Cube::solved();
        cube.edge_orient = edge_orientation_decode(coord);
        let from = edge_orientation(&cube);
        for mv in 0..NUM_MOVES {
            table[from][mv] = edge_orientation(&cube.apply_move(mv)) as u16;
        }
    }
    TransTable {
        table,
        solved_pos: edge_orientation(&Cube::solved()) as u16,
    }
}

/// Corner permutation table: walk all 8! permutations in lexicographic
/// order and apply every move to each
fn build_corner_permutation() -> TransTable {
    let mut table = vec![[0u16; NUM_MOVES]; CP_COUNT];
    for perm in (0..NUM_CORNERS as u8).permutations(NUM_CORNERS) {
        let mut cube = Cube::solved();
        cube.corner_perm.copy_from_slice(&perm);
        let from = corner_permutation(&cube);
        for mv in 0..NUM_MOVES {
            table[from][mv] = corner_permutation(&cube.apply_move(mv)) as u16;
        }
    }
    TransTable {
        table,
        solved_pos: corner_permutation(&Cube::solved()) as u16,
    }
}

/// Sorted-slice table: place the four UD-slice edges into every choice
/// of four slots in every order, the remaining edges filling the other
/// slots. Which fillers sit where does not affect the coordinate.
fn build_slice_sorted() -> TransTable {
    let mut table = vec![[0u16; NUM_MOVES]; SLICE_SORTED_COUNT];
    for positions in (0..NUM_EDGES).combinations(4) {
        for order in UD_SLICE.iter().copied().permutations(4) {
            let mut cube = Cube::solved();
            let mut fillers = UD_LAYER_EDGES.iter();
            for slot in 0..NUM_EDGES {
                if let Some(i) = positions.iter().position(|&p| p == slot) {
                    cube.edge_perm[slot] = order[i];
                } else {
                    cube.edge_perm[slot] = *fillers.next().unwrap();
                }
            }
            let from = coords::ud_sorted(&cube);
            for mv in 0..NUM_MOVES {
                table[from][mv] = coords::ud_sorted(&cube.apply_move(mv)) as u16;
            }
        }
    }
    TransTable {
        table,
        solved_pos: coords::ud_sorted(&Cube::solved()) as u16,
    }
}

/// Slice position table, derived: the representative of position `p` is
/// the sorted coordinate 24p, and discarding the order commutes with
/// every move
fn build_ud_pos(slice_sorted: &TransTable) -> TransTable {
    let mut table = vec![[0u16; NUM_MOVES]; UD_POS_COUNT];
    for coord in 0..UD_POS_COUNT {
        for mv in 0..NUM_MOVES {
            table[coord][mv] = (slice_sorted.lookup(24 * coord, mv) / 24) as u16;
        }
    }
    TransTable {
        table,
        solved_pos: (slice_sorted.solved_pos() / 24) as u16,
    }
}

/// Slice permutation table, derived: representatives keep the slice
/// edges in their home positions (the solved position part) and vary
/// only the order. Entries for moves that push the edges out of the
/// slice are never consulted.
fn build_ud_perm(slice_sorted: &TransTable) -> TransTable {
    let base = slice_sorted.solved_pos() / 24 * 24;
    let mut table = vec![[0u16; NUM_MOVES]; UD_PERM_COUNT];
    for coord in 0..UD_PERM_COUNT {
        for mv in 0..NUM_MOVES {
            table[coord][mv] = (slice_sorted.lookup(base + coord, mv) % 24) as u16;
        }
    }
    TransTable {
        table,
        solved_pos: (slice_sorted.solved_pos() % 24) as u16,
    }
}

/// Phase-2 edge permutation table, derived: unrank each permutation of
/// the eight U/D-layer edges, read off its sorted RL- and FB-slice
/// coordinates, advance both through the slice table and re-rank the
/// merged result. Only phase-2 move columns are filled; the coordinate
/// is undefined once an edge leaves the U/D layers.
fn build_edge_permutation(slice_sorted: &TransTable) -> TransTable {
    let mut table = vec![[0u16; NUM_MOVES]; EP_COUNT];
    let mut perm = [0u8; 8];
    for coord in 0..EP_COUNT {
        permutation_unrank(coord, &mut perm);
        let mut cube = Cube::solved();
        for (i, &slot) in UD_LAYER_SLOTS.iter().enumerate() {
            cube.edge_perm[slot] = UD_LAYER_EDGES[perm[i] as usize];
        }
        let rl = rl_sorted(&cube);
        let fb = fb_sorted(&cube);
        let from = edge_permutation(rl, fb);
        for &mv in &PHASE2_MOVES {
            let to_rl = slice_sorted.lookup(rl, mv);
            let to_fb = slice_sorted.lookup(fb, mv);
            table[from][mv] = edge_permutation(to_rl, to_fb) as u16;
        }
    }
    let solved = Cube::solved();
    TransTable {
        table,
        solved_pos: edge_permutation(rl_sorted(&solved), fb_sorted(&solved)) as u16,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::tables;
    use rand::prelude::*;

    fn random_cube(rng: &mut StdRng, len: usize) -> Cube {
        let mut cube = Cube::solved();
        for _ in 0..len {
            cube = cube.apply_move(rng.gen_range(0..NUM_MOVES));
        }
        cube
    }

    #[test]
    fn test_solved_positions_match_encoders() {
        let trans = &tables().trans;
        let solved = Cube::solved();
        assert_eq!(trans.co.solved_pos(), corner_orientation(&solved));
        assert_eq!(trans.eo.solved_pos(), edge_orientation(&solved));
        assert_eq!(trans.cp.solved_pos(), corner_permutation(&solved));
        assert_eq!(trans.slice_sorted.solved_pos(), ud_sorted(&solved));
        assert_eq!(trans.ud_pos.solved_pos(), 425);
        assert_eq!(trans.ud_perm.solved_pos(), 0);
        assert_eq!(trans.ep.solved_pos(), 0);
    }

    #[test]
    fn test_tables_match_cube_moves() {
        let trans = &tables().trans;
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            let cube = random_cube(&mut rng, 30);
            for mv in 0..NUM_MOVES {
                let next = cube.apply_move(mv);
                assert_eq!(
                    trans.co.lookup(corner_orientation(&cube), mv),
                    corner_orientation(&next)
                );
                assert_eq!(
                    trans.eo.lookup(edge_orientation(&cube), mv),
                    edge_orientation(&next)
                );
                assert_eq!(
                    trans.cp.lookup(corner_permutation(&cube), mv),
                    corner_permutation(&next)
                );
                assert_eq!(trans.slice_sorted.lookup(ud_sorted(&cube), mv), ud_sorted(&next));
                assert_eq!(trans.slice_sorted.lookup(rl_sorted(&cube), mv), rl_sorted(&next));
                assert_eq!(trans.slice_sorted.lookup(fb_sorted(&cube), mv), fb_sorted(&next));
                assert_eq!(
                    trans.ud_pos.lookup(ud_unsorted(ud_sorted(&cube)), mv),
                    ud_unsorted(ud_sorted(&next))
                );
            }
        }
    }

    #[test]
    fn test_derived_tables_match_in_subgroup() {
        // random phase-2 subgroup states: UD-layer edges shuffled, slice home
        let trans = &tables().trans;
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let mut cube = Cube::solved();
            let mut edges = UD_LAYER_EDGES;
            edges.shuffle(&mut rng);
            for (i, &slot) in UD_LAYER_SLOTS.iter().enumerate() {
                cube.edge_perm[slot] = edges[i];
            }
            let mut slice = UD_SLICE;
            slice.shuffle(&mut rng);
            for (i, slot) in (4..8).enumerate() {
                cube.edge_perm[slot] = slice[i];
            }
            for &mv in &PHASE2_MOVES {
                let next = cube.apply_move(mv);
                assert_eq!(
                    trans.ep.lookup(edge_permutation(rl_sorted(&cube), fb_sorted(&cube)), mv),
                    edge_permutation(rl_sorted(&next), fb_sorted(&next))
                );
                assert_eq!(
                    trans.ud_perm.lookup(ud_permutation(ud_sorted(&cube)), mv),
                    ud_permutation(ud_sorted(&next))
                );
            }
        }
    }

    #[test]
    fn test_four_quarter_turns_fix_every_coordinate() {
        let trans = &tables().trans;
        let quarters = [MOVE_U, MOVE_L, MOVE_F, MOVE_R, MOVE_B, MOVE_D];
        for table in [&trans.co, &trans.eo, &trans.cp, &trans.slice_sorted, &trans.ud_pos] {
            for &mv in &quarters {
                for pos in (0..table.size()).step_by(97) {
                    let mut coord = pos;
                    for _ in 0..4 {
                        coord = table.lookup(coord, mv);
                    }
                    assert_eq!(coord, pos);
                }
            }
        }
    }
}
