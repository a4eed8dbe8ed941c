//! Coordinate encoders
//!
//! Each coordinate maps one aspect of the cubie state onto a dense
//! integer range so that table lookups can replace cube manipulation.
//! The encoders here read the state directly; the decoders reconstruct a
//! representative state (or piece arrangement) and are used by the table
//! builders and by the phase-2 edge permutation merge.

use super::cube::Cube;
use super::types::*;

/// Number of corner orientation coordinates (3^7)
pub const CO_COUNT: usize = 2187;
/// Number of edge orientation coordinates (2^11)
pub const EO_COUNT: usize = 2048;
/// Number of corner permutation coordinates (8!)
pub const CP_COUNT: usize = 40320;
/// Number of sorted-slice coordinates (12*11*10*9)
pub const SLICE_SORTED_COUNT: usize = 11880;
/// Number of slice position coordinates (12 choose 4)
pub const UD_POS_COUNT: usize = 495;
/// Number of slice permutation coordinates (4!)
pub const UD_PERM_COUNT: usize = 24;
/// Number of phase-2 edge permutation coordinates (8!)
pub const EP_COUNT: usize = 40320;

/// The four edges of the UD slice (middle layer between U and D)
pub const UD_SLICE: [u8; 4] = [EDGE_FR, EDGE_FL, EDGE_BL, EDGE_BR];
/// The four edges of the RL slice (middle layer between R and L)
pub const RL_SLICE: [u8; 4] = [EDGE_UF, EDGE_UB, EDGE_DB, EDGE_DF];
/// The four edges of the FB slice (middle layer between F and B)
pub const FB_SLICE: [u8; 4] = [EDGE_UR, EDGE_UL, EDGE_DL, EDGE_DR];

/// The eight edge slots of the U and D layers, in slot order
pub const UD_LAYER_SLOTS: [usize; 8] = [0, 1, 2, 3, 8, 9, 10, 11];
/// The eight edges belonging in the U and D layers, in slot order
pub const UD_LAYER_EDGES: [u8; 8] = [
    EDGE_UF, EDGE_UL, EDGE_UB, EDGE_UR, EDGE_DF, EDGE_DL, EDGE_DB, EDGE_DR,
];

/// Corner orientation coordinate, 0..2186
///
/// Base-3 reading of the first seven twists; the eighth is fixed by the
/// mod-3 parity invariant.
pub fn corner_orientation(cube: &Cube) -> usize {
    let mut coord = 0;
    for i in 0..NUM_CORNERS - 1 {
        coord = 3 * coord + cube.corner_orient[i] as usize;
    }
    coord
}

/// Reconstruct the corner orientation vector encoding to `coord`
pub(crate) fn corner_orientation_decode(mut coord: usize) -> [u8; NUM_CORNERS] {
    let mut orient = [0u8; NUM_CORNERS];
    let mut total = 0;
    for i in (0..NUM_CORNERS - 1).rev() {
        orient[i] = (coord % 3) as u8;
        total += orient[i] as usize;
        coord /= 3;
    }
    orient[NUM_CORNERS - 1] = ((3 - total % 3) % 3) as u8;
    orient
}

/// Edge orientation coordinate, 0..2047
///
/// Base-2 reading of the first eleven flips; the twelfth is fixed by the
/// mod-2 parity invariant.
pub fn edge_orientation(cube: &Cube) -> usize {
    let mut coord = 0;
    for i in 0..NUM_EDGES - 1 {
        coord = 2 * coord + cube.edge_orient[i] as usize;
    }
    coord
}

/// Reconstruct the edge orientation vector encoding to `coord`
pub(crate) fn edge_orientation_decode(mut coord: usize) -> [u8; NUM_EDGES] {
    let mut orient = [0u8; NUM_EDGES];
    let mut total = 0;
    for i in (0..NUM_EDGES - 1).rev() {
        orient[i] = (coord % 2) as u8;
        total += orient[i] as usize;
        coord /= 2;
    }
    orient[NUM_EDGES - 1] = ((2 - total % 2) % 2) as u8;
    orient
}

/// Corner permutation coordinate, 0..40319 (lexicographic rank)
pub fn corner_permutation(cube: &Cube) -> usize {
    permutation_rank(&cube.corner_perm)
}

/// Sorted UD-slice coordinate, 0..11879
pub fn ud_sorted(cube: &Cube) -> usize {
    slice_sorted(cube, &UD_SLICE)
}

/// Sorted RL-slice coordinate, 0..11879
pub fn rl_sorted(cube: &Cube) -> usize {
    slice_sorted(cube, &RL_SLICE)
}

/// Sorted FB-slice coordinate, 0..11879
pub fn fb_sorted(cube: &Cube) -> usize {
    slice_sorted(cube, &FB_SLICE)
}

/// Slice position coordinate, 0..494: the sorted coordinate with the
/// order of the four edges discarded
#[inline]
pub fn ud_unsorted(ud_sorted: usize) -> usize {
    ud_sorted / 24
}

/// Slice permutation coordinate, 0..23: the order of the four slice
/// edges. Meaningful only when they are all inside their home slice.
#[inline]
pub fn ud_permutation(ud_sorted: usize) -> usize {
    ud_sorted % 24
}

/// Phase-2 edge permutation coordinate, 0..40319
///
/// The rank of the permutation of the eight U/D-layer edges across the
/// eight U/D-layer slots, recovered from the sorted RL- and FB-slice
/// coordinates. Defined only when both slices' edges lie in the U and D
/// layers, which phase 1 guarantees.
pub fn edge_permutation(rl_sorted: usize, fb_sorted: usize) -> usize {
    let (rl_slots, rl_order) = slice_decode(rl_sorted, &RL_SLICE);
    let (fb_slots, fb_order) = slice_decode(fb_sorted, &FB_SLICE);

    let mut occupant = [u8::MAX; NUM_EDGES];
    for i in 0..4 {
        occupant[rl_slots[i]] = rl_order[i];
        occupant[fb_slots[i]] = fb_order[i];
    }

    let mut perm = [0u8; 8];
    for (i, &slot) in UD_LAYER_SLOTS.iter().enumerate() {
        debug_assert!(occupant[slot] != u8::MAX, "edges not in the U/D layers");
        perm[i] = ud_layer_index(occupant[slot]);
    }
    permutation_rank(&perm)
}

/// Sorted-slice coordinate 24x + y for an arbitrary set of four edges
///
/// x ranks the set of occupied slots: scanning slots 11 down to 0 with
/// k = 3 counting down as slice edges are found, each non-slice slot
/// contributes C(slot, k). y ranks the order in which the four edges
/// were met during the same scan, counting greater successors with
/// weights 1, 1, 2, 6.
fn slice_sorted(cube: &Cube, slice: &[u8; 4]) -> usize {
    let mut pos = 0;
    let mut order = [0u8; 4];
    let mut found = 0;
    let mut k: i32 = 3;
    for slot in (0..NUM_EDGES).rev() {
        let edge = cube.edge_perm[slot];
        if slice.contains(&edge) {
            order[found] = edge;
            found += 1;
            k -= 1;
        } else if k >= 0 {
            pos += binomial(slot, k as usize);
        }
    }
    24 * pos + order_rank(&order)
}

/// Invert a sorted-slice coordinate into the occupied slots (in the
/// 11-to-0 scan order) and the slice edges sitting in them (same order)
pub(crate) fn slice_decode(coord: usize, slice: &[u8; 4]) -> ([usize; 4], [u8; 4]) {
    let mut pos = coord / 24;
    let mut slots = [0usize; 4];
    let mut found = 0;
    let mut k: i32 = 3;
    for slot in (0..NUM_EDGES).rev() {
        if k < 0 {
            break;
        }
        let b = binomial(slot, k as usize);
        if pos >= b {
            pos -= b;
        } else {
            slots[found] = slot;
            found += 1;
            k -= 1;
        }
    }
    (slots, order_unrank(coord % 24, slice))
}

/// Rank the scan order of four slice edges: count greater successors
fn order_rank(order: &[u8; 4]) -> usize {
    let mut rank = 0;
    let mut factorial = 1;
    for i in (0..4).rev() {
        let higher = order[i + 1..].iter().filter(|&&e| e > order[i]).count();
        rank += higher * factorial;
        factorial *= 4 - i;
    }
    rank
}

/// Invert `order_rank` for the given slice edge set
fn order_unrank(rank: usize, slice: &[u8; 4]) -> [u8; 4] {
    // digit i = number of entries after position i that are greater,
    // so position i holds the (digit+1)-th largest unused edge
    let digits = [rank / 6, rank % 6 / 2, rank % 2, 0];

    let mut descending = *slice;
    descending.sort_unstable_by(|a, b| b.cmp(a));

    let mut order = [0u8; 4];
    let mut used = [false; 4];
    for i in 0..4 {
        let mut count = 0;
        for j in 0..4 {
            if !used[j] {
                if count == digits[i] {
                    order[i] = descending[j];
                    used[j] = true;
                    break;
                }
                count += 1;
            }
        }
    }
    order
}

/// Map a U/D-layer edge to its index 0..7 in `UD_LAYER_EDGES`
#[inline]
fn ud_layer_index(edge: u8) -> u8 {
    debug_assert!(edge < 4 || edge >= 8);
    if edge < 4 {
        edge
    } else {
        edge - 4
    }
}

/// Lexicographic rank of a permutation of 0..n
///
/// For each position, count the smaller entries to its right and weight
/// the count by the factorial of the number of positions after it.
pub(crate) fn permutation_rank(perm: &[u8]) -> usize {
    let n = perm.len();
    let mut rank = 0;
    let mut factorial = 1;
    for i in (0..n).rev() {
        let lower = perm[i + 1..].iter().filter(|&&v| v < perm[i]).count();
        rank += lower * factorial;
        factorial *= n - i;
    }
    rank
}

/// Invert `permutation_rank`, writing the permutation into `out`
pub(crate) fn permutation_unrank(mut rank: usize, out: &mut [u8]) {
    let n = out.len();
    debug_assert!(n <= 16);
    let mut factorial = 1;
    for i in 1..n {
        factorial *= i;
    }
    let mut used = [false; 16];
    for i in 0..n {
        let digit = rank / factorial;
        rank %= factorial;
        let mut count = 0;
        for v in 0..n {
            if !used[v] {
                if count == digit {
                    out[i] = v as u8;
                    used[v] = true;
                    break;
                }
                count += 1;
            }
        }
        if i + 1 < n {
            factorial /= n - 1 - i;
        }
    }
}

/// Binomial coefficient C(n, k), zero when k > n
pub(crate) fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let mut b = 1;
    for i in 0..k {
        b = b * (n - i) / (i + 1);
    }
    b
}
