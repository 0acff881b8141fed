use crate::board::{Board, Stone};

pub type Score = i32;

// Terminal scoring helpers
pub const WIN_SCORE: Score = 1_000_000;
pub const DRAW_SCORE: Score = 0;
/// Bound wider than any reachable score; used for open windows.
pub const INFINITY: Score = 2 * WIN_SCORE;
/// Heuristic scores stay strictly inside the terminal range.
pub const HEURISTIC_LIMIT: Score = WIN_SCORE - 1;

/// Score of the player who wins by dropping a stone while `marked` cells are filled.
/// Sooner wins keep more cells free and score higher.
pub fn win_score(capacity: usize, marked: usize) -> Score {
    WIN_SCORE + ((capacity + 1 - marked) / 2) as Score
}

/// Score of the side to move when the opponent has already completed a line.
pub fn loss_score(capacity: usize, marked: usize) -> Score {
    -(WIN_SCORE + ((capacity + 2 - marked) / 2) as Score)
}

/// Best score reachable by a mover who cannot win with the next stone.
pub fn max_score(capacity: usize, marked: usize) -> Score {
    WIN_SCORE + (capacity.saturating_sub(marked + 1) / 2) as Score
}

pub fn is_terminal_score(score: Score) -> bool { score.abs() >= WIN_SCORE }

// Term for a window holding `n` stones of a single side.
fn window_term(n: usize) -> i64 {
    if n == 0 { return 0; }
    10i64.saturating_pow(n as u32)
}

/// Static evaluation from the side-to-move perspective.
///
/// Every length-K window along rows, columns and both diagonals is scored:
/// windows holding only the mover's stones add `10^n`, windows holding only the
/// opponent's subtract it, mixed or empty windows are dead and add nothing.
pub fn evaluate<B: Board + ?Sized>(board: &B) -> Score {
    let dims = board.dims();
    let (rows, cols, k) = (dims.rows as isize, dims.cols as isize, dims.win_length as isize);
    let me = board.to_move();
    let mut total: i64 = 0;
    for &(dr, dc) in &[(0isize, 1isize), (1, 0), (1, 1), (1, -1)] {
        for r0 in 0..rows {
            for c0 in 0..cols {
                let (r_end, c_end) = (r0 + dr * (k - 1), c0 + dc * (k - 1));
                if r_end < 0 || r_end >= rows || c_end < 0 || c_end >= cols { continue; }
                let (mut mine, mut theirs) = (0usize, 0usize);
                for i in 0..k {
                    match board.cell((r0 + dr * i) as usize, (c0 + dc * i) as usize) {
                        Some(s) if s == me => mine += 1,
                        Some(_) => theirs += 1,
                        None => {}
                    }
                }
                if theirs == 0 {
                    total = total.saturating_add(window_term(mine));
                } else if mine == 0 {
                    total = total.saturating_sub(window_term(theirs));
                }
            }
        }
    }
    total.clamp(-(HEURISTIC_LIMIT as i64), HEURISTIC_LIMIT as i64) as Score
}

/// Side-agnostic form: positive favours `P1`.
pub fn evaluate_for_p1<B: Board + ?Sized>(board: &B) -> Score {
    let s = evaluate(board);
    if board.to_move() == Stone::P1 { s } else { -s }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Grid;

    #[test]
    fn empty_board_is_zero() {
        let g = Grid::new(6, 7, 4).unwrap();
        assert_eq!(evaluate(&g), 0);
    }

    #[test]
    fn symmetric_between_players() {
        // Same layout with colours swapped; X to move in both.
        let a = Grid::from_moves(6, 7, 4, &[3, 0]).unwrap();
        let b = Grid::from_moves(6, 7, 4, &[0, 3]).unwrap();
        assert_eq!(evaluate(&a), -evaluate(&b));
        assert!(evaluate(&a) > 0, "centre stone should outweigh an edge stone");
    }

    #[test]
    fn single_row_windows() {
        // X on 0 and 1, O on 6, O to move: -100 - 10 + 10.
        let g = Grid::from_moves(1, 7, 4, &[0, 6, 1]).unwrap();
        assert_eq!(evaluate(&g), -100);
        assert_eq!(evaluate_for_p1(&g), 100);
    }

    #[test]
    fn terminal_scores_dominate_heuristics() {
        assert!(win_score(42, 41) > HEURISTIC_LIMIT);
        assert!(loss_score(42, 42) < -HEURISTIC_LIMIT);
        assert!(win_score(42, 7) > win_score(42, 9));
        assert!(max_score(42, 7) < win_score(42, 7));
    }
}
