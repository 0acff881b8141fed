#[cfg(test)]
use crate::board::Board;
use crate::board::{Dims, Stone};

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Index into the key table for `stone` on cell `cell` (row-major).
#[inline]
pub fn key_index(cell: usize, stone: Stone) -> usize { cell * 2 + stone.index() }

/// One key per (cell, stone). Deterministic for a given geometry.
pub fn keys(dims: Dims) -> Vec<u64> {
    let mut seed = 0xF00D_F00D_DEAD_BEEF ^ ((dims.rows as u64) << 32 | dims.cols as u64);
    (0..dims.capacity() * 2)
        .map(|_| {
            seed = splitmix64(seed);
            seed
        })
        .collect()
}

/// Signature computed from scratch. Matches the incremental signature of `Grid`.
#[cfg(test)]
fn compute<B: Board + ?Sized>(board: &B) -> u64 {
    let dims = board.dims();
    let table = keys(dims);
    let mut key = 0u64;
    for row in 0..dims.rows {
        for col in 0..dims.cols {
            if let Some(stone) = board.cell(row, col) {
                key ^= table[key_index(row * dims.cols + col, stone)];
            }
        }
    }
    key
}
