use crate::board::Board;

/// Static center-out column order, computed once per board width.
/// Availability is checked at query time.
#[derive(Clone, Debug)]
pub struct MoveOrder {
    order: Vec<usize>,
}

impl MoveOrder {
    pub fn new(cols: usize) -> Self {
        let center = (cols / 2) as isize;
        let order = (0..cols as isize)
            .map(|i| {
                let sign = 1 - 2 * (i % 2);
                (center + sign * (i + 1) / 2) as usize
            })
            .collect();
        Self { order }
    }

    pub fn columns(&self) -> &[usize] { &self.order }

    /// Non-full columns in search order.
    pub fn legal<B: Board + ?Sized>(&self, board: &B) -> Vec<usize> {
        self.order.iter().copied().filter(|&c| !board.is_column_full(c)).collect()
    }

    /// Like `legal`, with `first` hoisted to the front when it is playable.
    pub fn legal_with_first<B: Board + ?Sized>(&self, board: &B, first: Option<usize>) -> Vec<usize> {
        let mut moves = self.legal(board);
        if let Some(f) = first {
            if let Some(pos) = moves.iter().position(|&c| c == f) {
                let mv = moves.remove(pos);
                moves.insert(0, mv);
            }
        }
        moves
    }

    pub fn first_legal<B: Board + ?Sized>(&self, board: &B) -> Option<usize> {
        self.order.iter().copied().find(|&c| !board.is_column_full(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Grid;

    #[test]
    fn alternates_outward_from_center() {
        assert_eq!(MoveOrder::new(7).columns(), &[3, 2, 4, 1, 5, 0, 6]);
        assert_eq!(MoveOrder::new(4).columns(), &[2, 1, 3, 0]);
        assert_eq!(MoveOrder::new(1).columns(), &[0]);
    }

    #[test]
    fn full_columns_are_skipped() {
        let g = Grid::from_moves(2, 4, 3, &[2, 2, 1]).unwrap();
        let order = MoveOrder::new(4);
        assert_eq!(order.legal(&g), vec![1, 3, 0]);
        assert_eq!(order.legal_with_first(&g, Some(0)), vec![0, 1, 3]);
        assert_eq!(order.legal_with_first(&g, Some(2)), vec![1, 3, 0]);
        assert_eq!(order.first_legal(&g), Some(1));
    }
}
