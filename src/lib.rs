// Connect-K engine: negamax alpha-beta search over a gravity board
pub mod arena;
pub mod board;
pub mod config;
pub mod player;
pub mod search;

pub use board::{Board, GameState, Grid, Stone};
pub use config::EngineConfig;
pub use player::{NegamaxPlayer, Player, RandomPlayer};
