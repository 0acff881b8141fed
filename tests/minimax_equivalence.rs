use connectx::board::{Board, GameState, Grid};
use connectx::search::eval::{loss_score, Score, DRAW_SCORE, INFINITY};
use connectx::search::{SearchParams, Searcher};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

// Plain minimax over the whole tree, same score convention as the engine.
fn minimax(b: &mut Grid) -> Score {
    let cap = b.dims().capacity();
    match b.state() {
        GameState::Draw => return DRAW_SCORE,
        GameState::Win(_) => return loss_score(cap, b.marked_cells()),
        GameState::Open => {}
    }
    let mut best = -INFINITY;
    for c in b.legal_moves() {
        b.apply(c);
        let s = -minimax(b);
        b.undo();
        best = best.max(s);
    }
    best
}

fn random_position(rng: &mut SmallRng, rows: usize, cols: usize, k: usize, plies: usize) -> Grid {
    let mut b = Grid::new(rows, cols, k).unwrap();
    for _ in 0..plies {
        let moves = b.legal_moves();
        if moves.is_empty() { break; }
        let c = moves[rng.gen_range(0..moves.len())];
        b.apply(c);
        if b.state().is_terminal() {
            b.undo();
            break;
        }
    }
    b
}

#[test]
fn full_window_matches_minimax() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut shared = Searcher::new(4, 1 << 14);
    for _ in 0..12 {
        let mut b = random_position(&mut rng, 4, 4, 3, 7);
        let before = b.signature();
        let want = minimax(&mut b);

        let mut fresh = Searcher::new(4, 1 << 14);
        assert_eq!(fresh.negamax(&mut b, u32::MAX, -INFINITY, INFINITY).unwrap(), want, "fresh table, moves {:?}", b.history());
        assert_eq!(shared.negamax(&mut b, u32::MAX, -INFINITY, INFINITY).unwrap(), want, "shared table, moves {:?}", b.history());

        let mut plain = Searcher::new(4, 0);
        plain.set_use_tt(false);
        assert_eq!(plain.negamax(&mut b, u32::MAX, -INFINITY, INFINITY).unwrap(), want);
        assert_eq!(b.signature(), before);
    }
}

#[test]
fn empty_small_board_matches_minimax() {
    let mut b = Grid::new(3, 3, 3).unwrap();
    let want = minimax(&mut b);
    let mut s = Searcher::for_board(&b);
    assert_eq!(s.negamax(&mut b, u32::MAX, -INFINITY, INFINITY).unwrap(), want);
    assert_eq!(s.solve(&mut b).unwrap(), want);
}

#[test]
fn solver_agrees_with_full_window() {
    let mut rng = SmallRng::seed_from_u64(11);
    for _ in 0..8 {
        let mut b = random_position(&mut rng, 4, 5, 4, 8);
        let mut a = Searcher::new(5, 1 << 16);
        let full = a.negamax(&mut b, u32::MAX, -INFINITY, INFINITY).unwrap();
        let mut s = Searcher::new(5, 1 << 16);
        assert_eq!(s.solve(&mut b).unwrap(), full, "moves {:?}", b.history());
    }
}

#[test]
fn exhaustive_root_same_with_and_without_table() {
    let mut rng = SmallRng::seed_from_u64(3);
    for _ in 0..6 {
        let mut b = random_position(&mut rng, 4, 4, 3, 6);
        if b.state().is_terminal() { continue; }
        let mut on = Searcher::new(4, 1 << 14);
        let r1 = on.search_with_params(&mut b, SearchParams { depth: 0, use_tt: true, ..SearchParams::default() });
        let mut off = Searcher::new(4, 1 << 14);
        let r2 = off.search_with_params(&mut b, SearchParams { depth: 0, use_tt: false, ..SearchParams::default() });
        assert_eq!(r1.bestmove, r2.bestmove, "moves {:?}", b.history());
        assert_eq!(r1.score, r2.score);
        assert_eq!(r1.score, minimax(&mut b));
    }
}
