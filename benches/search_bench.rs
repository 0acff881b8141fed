use criterion::{criterion_group, criterion_main, Criterion, black_box};
use connectx::board::Grid;
use connectx::search::{SearchParams, Searcher};

fn bench_search(c: &mut Criterion) {
    c.bench_function("search_depth_8_empty_6x7", |ben| {
        ben.iter(|| {
            let mut b = Grid::new(6, 7, 4).unwrap();
            let mut s = Searcher::new(7, 1 << 16);
            let p = SearchParams { depth: 8, ..SearchParams::default() };
            let r = s.search_with_params(black_box(&mut b), p);
            black_box(r.nodes)
        })
    });
    c.bench_function("solve_4x5_k4_midgame", |ben| {
        ben.iter(|| {
            let mut b = Grid::from_moves(4, 5, 4, &[2, 2, 1, 3]).unwrap();
            let mut s = Searcher::new(5, 1 << 16);
            black_box(s.solve(black_box(&mut b)).ok())
        })
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
