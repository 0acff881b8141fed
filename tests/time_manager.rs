use connectx::board::{Board, Grid};
use connectx::player::{NegamaxPlayer, Player};
use connectx::search::time::TimeGuard;
use connectx::search::{SearchParams, Searcher};
use connectx::EngineConfig;
use std::time::{Duration, Instant};

#[test]
fn zero_budget_still_plays_a_legal_column() {
    let mut b = Grid::from_moves(6, 7, 4, &[3, 3]).unwrap();
    let marked = b.marked_cells();
    let mut p = NegamaxPlayer::default();
    Player::<Grid>::initialize(&mut p, 6, 7, 4, true, Duration::ZERO);
    let col = p.select_move(&mut b);
    assert!(col < 7);
    assert_eq!(b.marked_cells(), marked + 1);
    assert_eq!(b.last_move(), Some(col));
    assert!(p.last_result().map_or(false, |r| r.aborted));
}

#[test]
fn aborted_search_restores_the_board() {
    let mut b = Grid::new(6, 7, 4).unwrap();
    let sig = b.signature();
    let mut s = Searcher::for_board(&b);
    s.set_guard(TimeGuard::new(Duration::from_millis(5), 1.0));
    let r = s.search_with_params(&mut b, SearchParams { depth: 0, check_interval: 1, ..SearchParams::default() });
    assert!(r.aborted);
    assert_eq!(b.signature(), sig);
    assert_eq!(b.marked_cells(), 0);
    assert!(b.history().is_empty());
    // Nothing reached the root entry
    assert_eq!(s.tt_probe(&b), None);
}

#[test]
fn interrupted_negamax_returns_timeout() {
    let mut b = Grid::new(6, 7, 4).unwrap();
    let mut s = Searcher::for_board(&b);
    s.set_guard(TimeGuard::new(Duration::ZERO, 1.0));
    assert!(s.negamax(&mut b, u32::MAX, -1, 1).is_err());
    assert!(s.solve(&mut b).is_err());
    assert_eq!(b.marked_cells(), 0);
}

#[test]
fn respects_the_move_time() {
    let mut b = Grid::new(6, 7, 4).unwrap();
    let mut p = NegamaxPlayer::new(EngineConfig { depth: Some(0), ..EngineConfig::default() });
    Player::<Grid>::initialize(&mut p, 6, 7, 4, true, Duration::from_millis(200));
    let t0 = Instant::now();
    let col = p.select_move(&mut b);
    assert!(t0.elapsed() < Duration::from_secs(1), "took {:?}", t0.elapsed());
    assert!(col < 7);
    assert_eq!(b.marked_cells(), 1);
}

#[test]
fn iterative_keeps_a_completed_iteration() {
    let mut b = Grid::new(6, 7, 4).unwrap();
    let cfg = EngineConfig { iterative: true, ..EngineConfig::default() };
    let mut p = NegamaxPlayer::new(cfg);
    Player::<Grid>::initialize(&mut p, 6, 7, 4, true, Duration::from_millis(300));
    let col = p.select_move(&mut b);
    assert!(col < 7);
    let r = p.last_result().unwrap();
    assert!(r.depth >= 1);
    assert_eq!(r.bestmove, Some(col));
}

#[test]
fn iterative_stops_on_a_proven_result() {
    // Three stacked: the first iteration already finds the win
    let mut b = Grid::from_moves(6, 7, 4, &[0, 6, 0, 6, 0, 5]).unwrap();
    let mut s = Searcher::for_board(&b);
    let r = s.search_with_params(&mut b, SearchParams { depth: 8, iterative: true, ..SearchParams::default() });
    assert_eq!(r.bestmove, Some(0));
    assert_eq!(r.depth, 1);
    assert!(!r.aborted);
}
