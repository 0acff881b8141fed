use log::{info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use crate::board::{Board, GameState, Stone};
use crate::config::EngineConfig;
use crate::search::alphabeta::{SearchParams, SearchResult, Searcher};
use crate::search::order::MoveOrder;
use crate::search::time::TimeGuard;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A participant in a match. `select_move` applies the chosen column to
/// `board` before returning it.
pub trait Player<B: Board + ?Sized> {
    fn initialize(&mut self, rows: usize, cols: usize, win_length: usize, first: bool, timeout: Duration);

    fn select_move(&mut self, board: &mut B) -> usize;

    fn name(&self) -> &str;
}

/// Fixed search depth for a board: the larger side decides.
pub fn depth_for_dims(rows: usize, cols: usize) -> u32 {
    match rows.max(cols) {
        4 => 30,
        0..=7 => 12,
        8..=10 => 8,
        11..=13 => 6,
        14..=15 => 5,
        16..=20 => 4,
        21..=30 => 3,
        _ => 2,
    }
}

/// Alpha-beta player: one searcher (and transposition table) per match.
pub struct NegamaxPlayer {
    config: EngineConfig,
    searcher: Option<Searcher>,
    my_win: GameState,
    your_win: GameState,
    depth: u32,
    last: Option<SearchResult>,
}

impl NegamaxPlayer {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            searcher: None,
            my_win: GameState::Win(Stone::P1),
            your_win: GameState::Win(Stone::P2),
            depth: 0,
            last: None,
        }
    }

    pub fn config(&self) -> &EngineConfig { &self.config }

    /// Search depth in use; 0 means exhaustive.
    pub fn depth(&self) -> u32 { self.depth }

    pub fn last_result(&self) -> Option<&SearchResult> { self.last.as_ref() }

    fn params(&self) -> SearchParams {
        SearchParams {
            depth: self.depth,
            use_tt: self.config.use_tt,
            iterative: self.config.iterative,
            check_interval: self.config.check_interval,
        }
    }
}

impl Default for NegamaxPlayer {
    fn default() -> Self { Self::new(EngineConfig::default()) }
}

impl<B: Board + ?Sized> Player<B> for NegamaxPlayer {
    fn initialize(&mut self, rows: usize, cols: usize, _win_length: usize, first: bool, timeout: Duration) {
        let (me, you) = if first { (Stone::P1, Stone::P2) } else { (Stone::P2, Stone::P1) };
        self.my_win = GameState::Win(me);
        self.your_win = GameState::Win(you);
        self.depth = self.config.depth.unwrap_or_else(|| depth_for_dims(rows, cols));
        let mut searcher = Searcher::new(cols, self.config.tt_capacity);
        searcher.set_guard(TimeGuard::new(timeout, self.config.safety_fraction));
        searcher.set_use_tt(self.config.use_tt);
        searcher.set_check_interval(self.config.check_interval);
        self.searcher = Some(searcher);
        self.last = None;
    }

    fn select_move(&mut self, board: &mut B) -> usize {
        if self.searcher.is_none() {
            warn!("select_move before initialize; using board dimensions and default timeout");
            let d = board.dims();
            let first = board.to_move() == Stone::P1;
            <Self as Player<B>>::initialize(self, d.rows, d.cols, d.win_length, first, DEFAULT_TIMEOUT);
        }
        let params = self.params();
        let Some(searcher) = self.searcher.as_mut() else { return 0 };
        searcher.guard_mut().restart();

        if board.state().is_terminal() {
            warn!("select_move on a finished game: {:?}", board.state());
            return 0;
        }
        let Some(fallback) = searcher.order().first_legal(board) else {
            warn!("select_move on a full board");
            return 0;
        };
        if GameState::Win(board.to_move()) != self.my_win {
            warn!("asked to move for the opponent");
        }

        let r = searcher.search_with_params(board, params);
        let col = r.bestmove.unwrap_or(fallback);
        if r.aborted {
            info!("timeout. playing column {col} ({} free cells)", board.free_cells());
        }
        let guard = searcher.guard_mut();
        info!("column {col} score {} depth {} nodes {} in {:?} ({:?} left)", r.score, r.depth, r.nodes, guard.elapsed(), guard.remaining());
        let state = board.apply(col);
        if state == self.my_win {
            info!("winning move");
        } else if state == self.your_win {
            warn!("move completed the opponent's line");
        }
        self.last = Some(r);
        col
    }

    fn name(&self) -> &str { "NegamaxAB" }
}

/// Uniformly random legal columns; a baseline opponent.
pub struct RandomPlayer {
    seed: u64,
    rng: SmallRng,
    order: MoveOrder,
}

impl RandomPlayer {
    pub fn new(seed: u64) -> Self {
        Self { seed, rng: SmallRng::seed_from_u64(seed), order: MoveOrder::new(0) }
    }
}

impl<B: Board + ?Sized> Player<B> for RandomPlayer {
    fn initialize(&mut self, _rows: usize, cols: usize, _win_length: usize, _first: bool, _timeout: Duration) {
        self.rng = SmallRng::seed_from_u64(self.seed);
        self.order = MoveOrder::new(cols);
    }

    fn select_move(&mut self, board: &mut B) -> usize {
        if self.order.columns().len() != board.dims().cols {
            self.order = MoveOrder::new(board.dims().cols);
        }
        let moves = self.order.legal(board);
        if moves.is_empty() || board.state().is_terminal() { return 0; }
        let col = moves[self.rng.gen_range(0..moves.len())];
        board.apply(col);
        col
    }

    fn name(&self) -> &str { "Random" }
}
