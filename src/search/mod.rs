pub mod alphabeta;
pub mod eval;
pub mod order;
pub mod solve;
pub mod time;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{SearchParams, SearchResult, Searcher, Timeout};
pub use eval::Score;
