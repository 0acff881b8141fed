pub mod grid;

use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

pub use grid::{BoardError, Grid};

/// A player's token. `P1` always moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stone {
    P1,
    P2,
}

impl Stone {
    pub fn opponent(self) -> Self {
        match self { Stone::P1 => Stone::P2, Stone::P2 => Stone::P1 }
    }

    pub fn index(self) -> usize {
        match self { Stone::P1 => 0, Stone::P2 => 1 }
    }

    pub fn symbol(self) -> char {
        match self { Stone::P1 => 'X', Stone::P2 => 'O' }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Open,
    Win(Stone),
    Draw,
}

impl GameState {
    pub fn is_terminal(self) -> bool { self != GameState::Open }

    pub fn winner(self) -> Option<Stone> {
        match self { GameState::Win(s) => Some(s), _ => None }
    }
}

/// Board geometry: `rows` x `cols`, `win_length` in a row wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dims {
    pub rows: usize,
    pub cols: usize,
    pub win_length: usize,
}

impl Dims {
    pub fn new(rows: usize, cols: usize, win_length: usize) -> Self {
        Self { rows, cols, win_length }
    }

    pub fn capacity(&self) -> usize { self.rows * self.cols }
}

/// Capability interface the search engine depends on.
///
/// `apply` and `undo` must be strictly nested: `undo` reverses exactly the most
/// recent `apply`. Callers only `apply` columns that are not full on an open board.
pub trait Board {
    fn dims(&self) -> Dims;

    /// Drops the side-to-move's token into `col` and passes the turn.
    fn apply(&mut self, col: usize) -> GameState;

    fn undo(&mut self);

    fn is_column_full(&self, col: usize) -> bool;

    fn state(&self) -> GameState;

    fn marked_cells(&self) -> usize;

    /// Cell content, row 0 being the bottom row.
    fn cell(&self, row: usize, col: usize) -> Option<Stone>;

    /// Canonical hash of the full board content.
    fn signature(&self) -> u64;

    fn legal_moves(&self) -> Vec<usize> {
        if self.state().is_terminal() { return Vec::new(); }
        (0..self.dims().cols).filter(|&c| !self.is_column_full(c)).collect()
    }

    fn to_move(&self) -> Stone {
        if self.marked_cells() % 2 == 0 { Stone::P1 } else { Stone::P2 }
    }

    fn free_cells(&self) -> usize { self.dims().capacity() - self.marked_cells() }
}

/// Applies a move on construction and undoes it when dropped, so every exit
/// path (including `?` on a search abort) restores the board.
pub struct MoveGuard<'a, B: Board + ?Sized> {
    board: &'a mut B,
    state: GameState,
}

impl<'a, B: Board + ?Sized> MoveGuard<'a, B> {
    pub fn new(board: &'a mut B, col: usize) -> Self {
        let state = board.apply(col);
        Self { board, state }
    }

    /// State of the board right after the guarded move.
    pub fn state(&self) -> GameState { self.state }
}

impl<B: Board + ?Sized> Deref for MoveGuard<'_, B> {
    type Target = B;
    fn deref(&self) -> &B { self.board }
}

impl<B: Board + ?Sized> DerefMut for MoveGuard<'_, B> {
    fn deref_mut(&mut self) -> &mut B { self.board }
}

impl<B: Board + ?Sized> Drop for MoveGuard<'_, B> {
    fn drop(&mut self) { self.board.undo(); }
}
