//! Two-phase iterative-deepening search
//!
//! Phase 1 drives the cube into the subgroup generated by
//! U, D, L2, R2, F2, B2 (edges and corners oriented, slice edges home);
//! phase 2 finishes inside the subgroup. Both phases are depth-first
//! searches over coordinates with max-of-pairs pruning; each phase-1
//! solution seeds a phase-2 search, and every strictly shorter complete
//! solution is streamed to the caller as it is found.

use super::coords;
use super::cube::Cube;
use super::phase::{is_phase2_move, AllowedMoves};
use super::prune::PruneTables;
use super::trans::TransTables;
use super::types::*;
use log::{debug, info};
use std::time::Instant;

/// Default bound on the phase-1 iterative deepening
pub const DEFAULT_DEPTH_CAP: usize = 24;

/// No position inside the phase-2 subgroup is more than 18 moves from
/// solved, so deeper phase-2 iterations can only mean an unreachable input
const PHASE2_DEPTH_CAP: usize = 18;

/// The immutable context shared by all solves: allowed-move lists,
/// transition tables and pruning tables
#[derive(Clone, PartialEq, Eq)]
pub struct Tables {
    pub allowed: AllowedMoves,
    pub trans: TransTables,
    pub prune: PruneTables,
}

impl Tables {
    /// Build everything, in dependency order. Deterministic: two builds
    /// yield identical tables.
    pub fn build() -> Self {
        let start = Instant::now();
        let allowed = AllowedMoves::build();
        info!("building move transition tables...");
        let trans = TransTables::build();
        info!("building pruning tables...");
        let prune = PruneTables::build(&trans);
        info!("tables ready in {:.3}s", start.elapsed().as_secs_f64());
        Tables { allowed, trans, prune }
    }
}

/// A solver borrowing one set of tables
///
/// Multiple solvers (and concurrent solves) may share the same tables;
/// all per-solve state lives in a private frame.
pub struct Solver<'a> {
    tables: &'a Tables,
    depth_cap: usize,
}

/// Mutable state of one running solve
struct Frame {
    solution: Vec<Move>,
    last_move: Move,
    best_len: usize,
    stopped: bool,
    nodes: u64,
    start_ud: usize,
    start_rl: usize,
    start_fb: usize,
    start_cp: usize,
}

impl<'a> Solver<'a> {
    /// Create a solver over the given tables
    pub fn new(tables: &'a Tables) -> Self {
        Solver {
            tables,
            depth_cap: DEFAULT_DEPTH_CAP,
        }
    }

    /// Bound the phase-1 iterative deepening. Inputs with no solution
    /// within the cap (e.g. unreachable states) make `solve` return
    /// without invoking the callback.
    pub fn set_depth_cap(&mut self, cap: usize) {
        self.depth_cap = cap;
    }

    /// Search for solutions to `cube`, calling `on_solution` with each
    /// strictly shorter solution found. The callback returns `true` to
    /// keep searching or `false` to stop; otherwise the search runs
    /// until no shorter solution can exist or the depth cap is reached.
    pub fn solve<F>(&self, cube: &Cube, mut on_solution: F)
    where
        F: FnMut(&[Move]) -> bool,
    {
        let start_ud = coords::ud_sorted(cube);
        let mut frame = Frame {
            solution: Vec::new(),
            last_move: MOVE_NONE,
            best_len: usize::MAX,
            stopped: false,
            nodes: 0,
            start_ud,
            start_rl: coords::rl_sorted(cube),
            start_fb: coords::fb_sorted(cube),
            start_cp: coords::corner_permutation(cube),
        };
        let co = coords::corner_orientation(cube);
        let eo = coords::edge_orientation(cube);
        let ud_pos = coords::ud_unsorted(start_ud);

        let start = Instant::now();
        let mut depth = 0;
        while depth < frame.best_len && depth <= self.depth_cap && !frame.stopped {
            let depth_start = Instant::now();
            frame.nodes = 0;
            self.phase1_search(&mut frame, co, eo, ud_pos, depth, &mut on_solution);
            debug!(
                "phase 1 depth {depth}: {} nodes in {:.3}s",
                frame.nodes,
                depth_start.elapsed().as_secs_f64()
            );
            depth += 1;
        }
        debug!("search finished in {:.3}s", start.elapsed().as_secs_f64());
    }

    /// Phase-1 DFS over (CO, EO, slice position) with `depth` moves left
    fn phase1_search<F>(
        &self,
        frame: &mut Frame,
        co: usize,
        eo: usize,
        ud_pos: usize,
        depth: usize,
        on_solution: &mut F,
    ) where
        F: FnMut(&[Move]) -> bool,
    {
        frame.nodes += 1;
        let trans = &self.tables.trans;
        if depth == 0 {
            // a phase-1 solution must end in a move phase 2 cannot make,
            // or it is a shifted duplicate of a shorter one
            if co == trans.co.solved_pos()
                && eo == trans.eo.solved_pos()
                && ud_pos == trans.ud_pos.solved_pos()
                && !is_phase2_move(frame.last_move)
            {
                self.enter_phase2(frame, on_solution);
            }
            return;
        }

        let prune = &self.tables.prune;
        if prune.co_eo.lookup(co, eo) as usize > depth
            || prune.co_ud.lookup(co, ud_pos) as usize > depth
            || prune.eo_ud.lookup(eo, ud_pos) as usize > depth
        {
            return;
        }

        for &mv in self.tables.allowed.phase1(frame.last_move) {
            let next_co = trans.co.lookup(co, mv);
            let next_eo = trans.eo.lookup(eo, mv);
            let next_ud = trans.ud_pos.lookup(ud_pos, mv);

            let prev = frame.last_move;
            frame.last_move = mv;
            frame.solution.push(mv);
            self.phase1_search(frame, next_co, next_eo, next_ud, depth - 1, on_solution);
            frame.solution.pop();
            frame.last_move = prev;

            if frame.stopped {
                return;
            }
        }
    }

    /// Replay the phase-1 moves over the carried-forward coordinates and
    /// run the phase-2 iterative deepening from the resulting position
    fn enter_phase2<F>(&self, frame: &mut Frame, on_solution: &mut F)
    where
        F: FnMut(&[Move]) -> bool,
    {
        let trans = &self.tables.trans;
        let mut ud = frame.start_ud;
        let mut rl = frame.start_rl;
        let mut fb = frame.start_fb;
        let mut cp = frame.start_cp;
        for &mv in &frame.solution {
            ud = trans.slice_sorted.lookup(ud, mv);
            rl = trans.slice_sorted.lookup(rl, mv);
            fb = trans.slice_sorted.lookup(fb, mv);
            cp = trans.cp.lookup(cp, mv);
        }
        let ep = coords::edge_permutation(rl, fb);
        let ud_perm = coords::ud_permutation(ud);

        let phase1_len = frame.solution.len();
        let mut depth = 0;
        while phase1_len + depth < frame.best_len && depth <= PHASE2_DEPTH_CAP && !frame.stopped {
            self.phase2_search(frame, cp, ep, ud_perm, depth, on_solution);
            depth += 1;
        }
    }

    /// Phase-2 DFS over (CP, EP, slice permutation) with `depth` moves left
    fn phase2_search<F>(
        &self,
        frame: &mut Frame,
        cp: usize,
        ep: usize,
        ud_perm: usize,
        depth: usize,
        on_solution: &mut F,
    ) where
        F: FnMut(&[Move]) -> bool,
    {
        // only totals strictly below the best length are worth exploring
        if frame.stopped || frame.solution.len() + depth >= frame.best_len {
            return;
        }
        frame.nodes += 1;

        let trans = &self.tables.trans;
        if depth == 0 {
            if cp == trans.cp.solved_pos()
                && ep == trans.ep.solved_pos()
                && ud_perm == trans.ud_perm.solved_pos()
            {
                frame.best_len = frame.solution.len();
                debug!("solution of length {} found", frame.best_len);
                if !on_solution(&frame.solution) {
                    frame.stopped = true;
                }
            }
            return;
        }

        let prune = &self.tables.prune;
        if prune.cp_ud.lookup(cp, ud_perm) as usize > depth
            || prune.ep_ud.lookup(ep, ud_perm) as usize > depth
        {
            return;
        }

        for &mv in self.tables.allowed.phase2(frame.last_move) {
            let next_cp = trans.cp.lookup(cp, mv);
            let next_ep = trans.ep.lookup(ep, mv);
            let next_ud = trans.ud_perm.lookup(ud_perm, mv);

            let prev = frame.last_move;
            frame.last_move = mv;
            frame.solution.push(mv);
            self.phase2_search(frame, next_cp, next_ep, next_ud, depth - 1, on_solution);
            frame.solution.pop();
            frame.last_move = prev;

            if frame.stopped {
                return;
            }
        }
    }
}
