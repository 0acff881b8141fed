use criterion::{criterion_group, criterion_main, Criterion, black_box};
use connectx::board::Grid;

fn bench_eval(c: &mut Criterion) {
    let b = Grid::from_moves(6, 7, 4, &[3, 3, 2, 4, 4, 2, 1, 5]).unwrap();
    c.bench_function("evaluate_6x7_midgame", |ben| {
        ben.iter(|| {
            let v = connectx::search::eval::evaluate(black_box(&b));
            black_box(v)
        })
    });
}

criterion_group!(benches, bench_eval);
criterion_main!(benches);
