use std::fmt;
use thiserror::Error;

use super::{Board, Dims, GameState, Stone};
use crate::search::zobrist;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid board dimensions {rows}x{cols} with win length {win_length}")]
    InvalidDims { rows: usize, cols: usize, win_length: usize },
    #[error("column {col} out of range (board has {cols} columns)")]
    ColumnOutOfRange { col: usize, cols: usize },
    #[error("column {0} is full")]
    ColumnFull(usize),
    #[error("game is already over: {0:?}")]
    GameOver(GameState),
}

const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Gravity board: tokens drop to the lowest free row of a column.
#[derive(Clone, Debug)]
pub struct Grid {
    dims: Dims,
    cells: Vec<Option<Stone>>,
    heights: Vec<usize>,
    history: Vec<usize>,
    states: Vec<GameState>,
    keys: Vec<u64>,
    hash: u64,
}

impl Grid {
    pub fn new(rows: usize, cols: usize, win_length: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 || win_length == 0 || win_length > rows.max(cols) {
            return Err(BoardError::InvalidDims { rows, cols, win_length });
        }
        let dims = Dims::new(rows, cols, win_length);
        Ok(Self {
            dims,
            cells: vec![None; dims.capacity()],
            heights: vec![0; cols],
            history: Vec::with_capacity(dims.capacity()),
            states: Vec::with_capacity(dims.capacity()),
            keys: zobrist::keys(dims),
            hash: 0,
        })
    }

    /// Builds a position by playing `moves` from the empty board.
    pub fn from_moves(rows: usize, cols: usize, win_length: usize, moves: &[usize]) -> Result<Self, BoardError> {
        let mut g = Self::new(rows, cols, win_length)?;
        for &m in moves { g.try_apply(m)?; }
        Ok(g)
    }

    /// Validating variant of `apply` for orchestration code.
    pub fn try_apply(&mut self, col: usize) -> Result<GameState, BoardError> {
        let state = self.state();
        if state.is_terminal() { return Err(BoardError::GameOver(state)); }
        if col >= self.dims.cols { return Err(BoardError::ColumnOutOfRange { col, cols: self.dims.cols }); }
        if self.is_column_full(col) { return Err(BoardError::ColumnFull(col)); }
        Ok(self.apply(col))
    }

    pub fn history(&self) -> &[usize] { &self.history }

    pub fn last_move(&self) -> Option<usize> { self.history.last().copied() }

    fn idx(&self, row: usize, col: usize) -> usize { row * self.dims.cols + col }

    fn run_length(&self, row: usize, col: usize, dr: isize, dc: isize, stone: Stone) -> usize {
        let mut n = 0;
        let (mut r, mut c) = (row as isize + dr, col as isize + dc);
        while r >= 0 && c >= 0 && (r as usize) < self.dims.rows && (c as usize) < self.dims.cols {
            if self.cells[self.idx(r as usize, c as usize)] != Some(stone) { break; }
            n += 1;
            r += dr;
            c += dc;
        }
        n
    }

    fn wins_through(&self, row: usize, col: usize, stone: Stone) -> bool {
        DIRECTIONS.iter().any(|&(dr, dc)| {
            1 + self.run_length(row, col, dr, dc, stone) + self.run_length(row, col, -dr, -dc, stone) >= self.dims.win_length
        })
    }
}

impl Board for Grid {
    fn dims(&self) -> Dims { self.dims }

    fn apply(&mut self, col: usize) -> GameState {
        debug_assert!(!self.state().is_terminal(), "apply on a finished game");
        debug_assert!(!self.is_column_full(col), "apply on full column {col}");
        let stone = self.to_move();
        let row = self.heights[col];
        let i = self.idx(row, col);
        self.cells[i] = Some(stone);
        self.heights[col] += 1;
        self.hash ^= self.keys[zobrist::key_index(i, stone)];
        self.history.push(col);
        let state = if self.wins_through(row, col, stone) {
            GameState::Win(stone)
        } else if self.history.len() == self.dims.capacity() {
            GameState::Draw
        } else {
            GameState::Open
        };
        self.states.push(state);
        state
    }

    fn undo(&mut self) {
        let Some(col) = self.history.pop() else { return };
        self.states.pop();
        self.heights[col] -= 1;
        let i = self.idx(self.heights[col], col);
        if let Some(stone) = self.cells[i].take() {
            self.hash ^= self.keys[zobrist::key_index(i, stone)];
        }
    }

    fn is_column_full(&self, col: usize) -> bool { self.heights[col] >= self.dims.rows }

    fn state(&self) -> GameState { self.states.last().copied().unwrap_or(GameState::Open) }

    fn marked_cells(&self) -> usize { self.history.len() }

    fn cell(&self, row: usize, col: usize) -> Option<Stone> { self.cells[self.idx(row, col)] }

    fn signature(&self) -> u64 { self.hash }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.dims.rows).rev() {
            for col in 0..self.dims.cols {
                let ch = self.cell(row, col).map_or('.', Stone::symbol);
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        for col in 0..self.dims.cols {
            write!(f, "{} ", col % 10)?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_win_detected() {
        let mut g = Grid::from_moves(6, 7, 4, &[0, 1, 0, 1, 0, 1]).unwrap();
        assert_eq!(g.apply(0), GameState::Win(Stone::P1));
        assert!(g.legal_moves().is_empty());
    }

    #[test]
    fn diagonal_win_detected() {
        // X climbs the 0..3 diagonal, O fills beneath.
        let moves = [0, 1, 1, 2, 2, 3, 2, 3, 3, 6];
        let mut g = Grid::from_moves(6, 7, 4, &moves).unwrap();
        assert_eq!(g.apply(3), GameState::Win(Stone::P1));
    }

    #[test]
    fn undo_restores_signature_and_state() {
        let mut g = Grid::from_moves(4, 4, 3, &[1, 2]).unwrap();
        let sig = g.signature();
        g.apply(1);
        g.apply(3);
        assert_ne!(g.signature(), sig);
        g.undo();
        g.undo();
        assert_eq!(g.signature(), sig);
        assert_eq!(g.marked_cells(), 2);
        assert_eq!(g.state(), GameState::Open);
    }

    #[test]
    fn try_apply_rejects_bad_columns() {
        let mut g = Grid::from_moves(2, 3, 2, &[0, 0]).unwrap();
        assert_eq!(g.try_apply(0), Err(BoardError::ColumnFull(0)));
        assert_eq!(g.try_apply(3), Err(BoardError::ColumnOutOfRange { col: 3, cols: 3 }));
    }

    #[test]
    fn full_board_without_line_is_draw() {
        // 1x4 board with win length 3 cannot be won by alternating stones.
        let g = Grid::from_moves(1, 4, 3, &[0, 1, 2, 3]).unwrap();
        assert_eq!(g.state(), GameState::Draw);
    }
}
