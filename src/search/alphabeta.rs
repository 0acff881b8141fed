use log::{debug, info};
use thiserror::Error;

use crate::board::{Board, GameState, MoveGuard};
use crate::search::eval::{evaluate, is_terminal_score, loss_score, max_score, win_score, Score, DRAW_SCORE, INFINITY};
use crate::search::order::MoveOrder;
use crate::search::time::TimeGuard;
use crate::search::tt::{Bound, Entry, Tt, DEFAULT_CAPACITY};

/// Cooperative abort: the deadline passed while a subtree was being searched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("search deadline exceeded")]
pub struct Timeout;

#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    /// Plies to search from the root; 0 searches to the end of the game.
    pub depth: u32,
    pub use_tt: bool,
    pub iterative: bool,
    /// Nodes between deadline checks.
    pub check_interval: u64,
}

impl Default for SearchParams {
    fn default() -> Self { Self { depth: 0, use_tt: true, iterative: false, check_interval: 256 } }
}

#[derive(Default, Debug, Clone)]
pub struct SearchResult {
    pub bestmove: Option<usize>,
    pub score: Score,
    pub nodes: u64,
    /// Depth of the search that produced `bestmove`.
    pub depth: u32,
    pub aborted: bool,
}

pub struct Searcher {
    tt: Tt,
    order: MoveOrder,
    guard: TimeGuard,
    pub(crate) nodes: u64,
    use_tt: bool,
    check_interval: u64,
}

impl Searcher {
    pub fn new(cols: usize, tt_capacity: usize) -> Self {
        Self {
            tt: Tt::with_capacity(tt_capacity),
            order: MoveOrder::new(cols),
            guard: TimeGuard::unbounded(),
            nodes: 0,
            use_tt: true,
            check_interval: SearchParams::default().check_interval,
        }
    }

    pub fn with_tt_mb(cols: usize, mb: usize) -> Self {
        let mut s = Self::new(cols, 0);
        s.tt.set_capacity_mb(mb);
        s
    }

    pub fn for_board<B: Board + ?Sized>(board: &B) -> Self { Self::new(board.dims().cols, DEFAULT_CAPACITY) }

    pub fn set_guard(&mut self, guard: TimeGuard) { self.guard = guard; }
    pub fn guard_mut(&mut self) -> &mut TimeGuard { &mut self.guard }
    pub fn set_use_tt(&mut self, on: bool) { self.use_tt = on; }
    pub fn set_check_interval(&mut self, n: u64) { self.check_interval = n.max(1); }
    pub fn order(&self) -> &MoveOrder { &self.order }
    pub fn tt(&self) -> &Tt { &self.tt }
    pub fn nodes(&self) -> u64 { self.nodes }

    pub fn clear(&mut self) {
        self.tt.clear();
        self.nodes = 0;
    }

    // Counts a node and polls the deadline every `check_interval` nodes.
    fn tick(&mut self) -> Result<(), Timeout> {
        let n = self.nodes;
        self.nodes += 1;
        if n % self.check_interval == 0 && self.guard.expired() { return Err(Timeout); }
        Ok(())
    }

    /// Negamax value of `board` for the side to move under window `(alpha, beta)`.
    ///
    /// Fail-soft: a result `<= alpha` is an upper bound, `>= beta` a lower bound.
    /// `board` is restored before returning, also on `Err(Timeout)`, and nothing is
    /// written to the transposition table for an aborted node.
    pub fn negamax<B: Board + ?Sized>(&mut self, board: &mut B, depth: u32, mut alpha: Score, mut beta: Score) -> Result<Score, Timeout> {
        self.tick()?;
        let cap = board.dims().capacity();
        let marked = board.marked_cells();
        match board.state() {
            GameState::Draw => return Ok(DRAW_SCORE),
            GameState::Win(_) => return Ok(loss_score(cap, marked)),
            GameState::Open => {}
        }

        // Win with the next stone
        let moves = self.order.legal(board);
        for &c in &moves {
            let g = MoveGuard::new(board, c);
            if let GameState::Win(_) = g.state() { return Ok(win_score(cap, marked)); }
        }

        // No immediate win: the best outcome is a win on our following turn
        let max = max_score(cap, marked);
        if beta > max {
            beta = max;
            if alpha >= beta { return Ok(beta); }
        }

        // Anything deeper than the remaining cells is an exhaustive search
        let depth = depth.min((cap - marked) as u32);
        let key = board.signature();
        let mut tt_best = None;
        if self.use_tt {
            if let Some(en) = self.tt.get(key) {
                tt_best = en.best;
                if en.depth >= depth {
                    match en.bound {
                        Bound::Exact => return Ok(en.score),
                        Bound::Lower => if en.score >= beta { return Ok(en.score); },
                        Bound::Upper => if en.score <= alpha { return Ok(en.score); },
                    }
                }
            }
        }

        if depth == 0 { return Ok(evaluate(board)); }

        let orig_alpha = alpha;
        let mut best = -INFINITY;
        let mut best_col = None;
        for c in self.order.legal_with_first(board, tt_best) {
            let score = {
                let mut child = MoveGuard::new(board, c);
                -self.negamax(&mut *child, depth - 1, -beta, -alpha)?
            };
            if score > best { best = score; best_col = Some(c); }
            if best > alpha { alpha = best; }
            if alpha >= beta { break; }
        }

        if self.use_tt {
            let bound = if best <= orig_alpha { Bound::Upper } else if best >= beta { Bound::Lower } else { Bound::Exact };
            self.tt.put(Entry { key, depth, score: best, best: best_col, bound, gen: 0 });
        }
        Ok(best)
    }

    /// Scores every root column to `depth` plies and keeps the first best one.
    ///
    /// On timeout the result holds the best among candidates whose subtree
    /// completed (`bestmove` is `None` if none did) and `aborted` is set.
    pub fn search_depth<B: Board + ?Sized>(&mut self, board: &mut B, depth: u32) -> SearchResult {
        let depth = depth.max(1);
        let cap = board.dims().capacity();
        let marked = board.marked_cells();
        let moves = if board.state().is_terminal() { Vec::new() } else { self.order.legal(board) };
        if moves.is_empty() {
            let score = match board.state() {
                GameState::Win(_) => loss_score(cap, marked),
                _ => DRAW_SCORE,
            };
            return SearchResult { bestmove: None, score, nodes: self.nodes, depth, aborted: false };
        }

        for &c in &moves {
            let g = MoveGuard::new(board, c);
            if let GameState::Win(_) = g.state() {
                debug!("column {c} wins immediately");
                return SearchResult { bestmove: Some(c), score: win_score(cap, marked), nodes: self.nodes, depth, aborted: false };
            }
        }

        let mut alpha = -INFINITY;
        let beta = INFINITY;
        let mut bestmove = None;
        let mut best_score = -INFINITY;
        let mut aborted = false;
        for &c in &moves {
            if self.guard.expired() { aborted = true; break; }
            let r = {
                let mut child = MoveGuard::new(board, c);
                self.negamax(&mut *child, depth - 1, -beta, -alpha)
            };
            let score = match r {
                Ok(s) => -s,
                Err(Timeout) => { aborted = true; break; }
            };
            debug!("depth {depth} column {c} score {score}");
            if score > best_score { best_score = score; bestmove = Some(c); }
            if score > alpha { alpha = score; }
        }

        if aborted {
            info!("timeout at depth {depth} after {} nodes", self.nodes);
        } else if self.use_tt {
            let depth = depth.min((cap - marked) as u32);
            self.tt.put(Entry { key: board.signature(), depth, score: best_score, best: bestmove, bound: Bound::Exact, gen: 0 });
        }
        SearchResult { bestmove, score: best_score, nodes: self.nodes, depth, aborted }
    }

    /// Root search driven by `params`, under the current time guard.
    pub fn search_with_params<B: Board + ?Sized>(&mut self, board: &mut B, params: SearchParams) -> SearchResult {
        self.nodes = 0;
        self.use_tt = params.use_tt;
        self.check_interval = params.check_interval.max(1);
        self.tt.bump_generation();
        let free = board.free_cells() as u32;
        let max_depth = if params.depth == 0 { free.max(1) } else { params.depth };
        if !params.iterative { return self.search_depth(board, max_depth); }

        let mut last: Option<SearchResult> = None;
        for d in 1..=max_depth {
            let r = self.search_depth(board, d);
            if r.aborted {
                // A partial iteration only counts when nothing deeper finished
                last = match last {
                    Some(prev) => Some(SearchResult { aborted: true, nodes: r.nodes, ..prev }),
                    None => Some(r),
                };
                break;
            }
            let done = r.bestmove.is_none() || is_terminal_score(r.score) || d >= free;
            last = Some(r);
            if done { break; }
        }
        last.unwrap_or_default()
    }

    pub fn tt_probe<B: Board + ?Sized>(&self, board: &B) -> Option<(u32, Bound)> {
        self.tt.get(board.signature()).map(|e| (e.depth, e.bound))
    }
}
