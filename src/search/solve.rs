//! Exact game value by null-window binary search.

use log::debug;

use crate::board::{Board, GameState};
use crate::search::alphabeta::{Searcher, Timeout};
use crate::search::eval::{loss_score, win_score, Score, DRAW_SCORE};

impl Searcher {
    /// Exact value of `board` for the side to move.
    ///
    /// Each probe asks whether the value exceeds `med` with the window
    /// `(med, med + 1)`. The first probes settle win/draw/loss, later ones split
    /// the remaining range. Shares the transposition table with move selection.
    pub fn solve<B: Board + ?Sized>(&mut self, board: &mut B) -> Result<Score, Timeout> {
        self.nodes = 0;
        let cap = board.dims().capacity();
        let marked = board.marked_cells();
        match board.state() {
            GameState::Draw => return Ok(DRAW_SCORE),
            GameState::Win(_) => return Ok(loss_score(cap, marked)),
            GameState::Open => {}
        }
        // Worst case: the opponent wins with their next stone
        let mut min = -win_score(cap, marked + 1);
        let mut max = win_score(cap, marked);
        while min < max {
            let med = if min < 0 && max > 0 {
                0
            } else if min < 0 && max == 0 {
                -1
            } else {
                min + (max - min) / 2
            };
            let r = self.negamax(board, u32::MAX, med, med + 1)?;
            debug!("probe {med}: {r} in [{min}, {max}]");
            if r <= med { max = r; } else { min = r; }
        }
        Ok(min)
    }
}
