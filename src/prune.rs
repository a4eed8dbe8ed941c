//! Pruning tables
//!
//! A pruning table records, for a pair of coordinates, the exact number
//! of moves of its phase needed to bring the pair to the solved pair,
//! found by breadth-first search outward from solved through the
//! transition tables. During search the value is a lower bound on the
//! remaining distance of the full cube, because the pair is a projection
//! of the full state.

use super::phase::{PHASE1_MOVES, PHASE2_MOVES};
use super::trans::{TransTable, TransTables};
use super::types::Move;
use log::debug;
use std::collections::VecDeque;
use std::time::Instant;

/// Sentinel for pairs the BFS never reached
pub const PRUNE_UNREACHED: u8 = u8::MAX;

/// BFS distance table over a pair of coordinates
#[derive(Clone, PartialEq, Eq)]
pub struct PruneTable {
    table: Vec<u8>,
    width: usize,
}

impl PruneTable {
    /// Distance from solved of the pair, or `PRUNE_UNREACHED`
    #[inline]
    pub fn lookup(&self, coord1: usize, coord2: usize) -> u8 {
        self.table[coord1 * self.width + coord2]
    }

    /// Number of entries in the table
    #[inline]
    pub fn size(&self) -> usize {
        self.table.len()
    }

    /// Deepest recorded distance
    pub fn max_depth(&self) -> u8 {
        self.table
            .iter()
            .copied()
            .filter(|&d| d != PRUNE_UNREACHED)
            .max()
            .unwrap_or(0)
    }

    /// Entry count per distance, for diagnostics; the final bucket
    /// counts pairs the BFS never reached
    pub fn depth_counts(&self) -> Vec<u64> {
        let max = self.max_depth() as usize;
        let mut counts = vec![0u64; max + 2];
        for &d in &self.table {
            if d == PRUNE_UNREACHED {
                counts[max + 1] += 1;
            } else {
                counts[d as usize] += 1;
            }
        }
        counts
    }

    /// Breadth-first search from the solved pair over the given moves
    fn build(trans1: &TransTable, trans2: &TransTable, moves: &[Move]) -> Self {
        let width = trans2.size();
        let mut table = vec![PRUNE_UNREACHED; trans1.size() * width];
        let mut queue = VecDeque::new();

        let start = (trans1.solved_pos(), trans2.solved_pos());
        table[start.0 * width + start.1] = 0;
        queue.push_back(start);

        while let Some((pos1, pos2)) = queue.pop_front() {
            let depth = table[pos1 * width + pos2];
            for &mv in moves {
                let next = (trans1.lookup(pos1, mv), trans2.lookup(pos2, mv));
                let entry = &mut table[next.0 * width + next.1];
                if *entry == PRUNE_UNREACHED {
                    *entry = depth + 1;
                    queue.push_back(next);
                }
            }
        }
        PruneTable { table, width }
    }
}

/// The five pruning tables used by the two-phase search
#[derive(Clone, PartialEq, Eq)]
pub struct PruneTables {
    pub co_eo: PruneTable,
    pub co_ud: PruneTable,
    pub eo_ud: PruneTable,
    pub cp_ud: PruneTable,
    pub ep_ud: PruneTable,
}

impl PruneTables {
    /// Build all five tables from the finished transition tables
    pub fn build(trans: &TransTables) -> Self {
        PruneTables {
            co_eo: timed("CO x EO", trans, |t| {
                PruneTable::build(&t.co, &t.eo, &PHASE1_MOVES)
            }),
            co_ud: timed("CO x slice position", trans, |t| {
                PruneTable::build(&t.co, &t.ud_pos, &PHASE1_MOVES)
            }),
            eo_ud: timed("EO x slice position", trans, |t| {
                PruneTable::build(&t.eo, &t.ud_pos, &PHASE1_MOVES)
            }),
            cp_ud: timed("CP x slice permutation", trans, |t| {
                PruneTable::build(&t.cp, &t.ud_perm, &PHASE2_MOVES)
            }),
            ep_ud: timed("EP x slice permutation", trans, |t| {
                PruneTable::build(&t.ep, &t.ud_perm, &PHASE2_MOVES)
            }),
        }
    }
}

fn timed(
    name: &str,
    trans: &TransTables,
    build: impl FnOnce(&TransTables) -> PruneTable,
) -> PruneTable {
    let start = Instant::now();
    let table = build(trans);
    debug!(
        "{name} pruning table built in {:.3}s",
        start.elapsed().as_secs_f64()
    );
    table
}
