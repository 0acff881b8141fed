use anyhow::Result;
use clap::Parser;
use connectx::board::{Board, Grid};
use connectx::search::eval::{is_terminal_score, WIN_SCORE};
use connectx::search::time::TimeGuard;
use connectx::search::tt::DEFAULT_CAPACITY;
use connectx::search::Searcher;
use connectx::config::timeout_from_secs;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "connectx-solve", version, about = "Exact game value of a Connect-K position")]
struct Args {
    #[arg(long, default_value_t = 4)]
    rows: usize,

    #[arg(long, default_value_t = 5)]
    cols: usize,

    #[arg(long, default_value_t = 4)]
    k: usize,

    /// Moves played so far, as column digits or comma separated ("3,3,2")
    #[arg(long, default_value = "")]
    moves: String,

    /// Give up after this many seconds (0 = no limit)
    #[arg(long, default_value_t = 0.0)]
    timeout: f64,

    /// Transposition table size in MB (approximate)
    #[arg(long)]
    hash_mb: Option<usize>,
}

fn parse_moves(s: &str) -> Result<Vec<usize>> {
    let s = s.trim();
    if s.is_empty() { return Ok(Vec::new()); }
    if s.contains(',') {
        s.split(',').map(|t| Ok(t.trim().parse::<usize>()?)).collect()
    } else {
        s.chars().map(|c| c.to_digit(10).map(|d| d as usize).ok_or_else(|| anyhow::anyhow!("bad move '{c}'"))).collect()
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let moves = parse_moves(&args.moves)?;
    let mut board = Grid::from_moves(args.rows, args.cols, args.k, &moves)?;
    println!("{board}");

    let mut s = match args.hash_mb {
        Some(mb) => Searcher::with_tt_mb(args.cols, mb),
        None => Searcher::new(args.cols, DEFAULT_CAPACITY),
    };
    if args.timeout > 0.0 {
        s.set_guard(TimeGuard::new(timeout_from_secs(args.timeout)?, 1.0));
    }

    let t0 = Instant::now();
    let score = s.solve(&mut board)?;
    let dt = t0.elapsed();
    let verdict = if !is_terminal_score(score) {
        "draw".to_string()
    } else {
        let free = score.abs() - WIN_SCORE;
        let who = if score > 0 { "side to move wins" } else { "side to move loses" };
        format!("{who} ({free} of its stones unplayed)")
    };
    println!("{} to move: score={score} {verdict} nodes={} elapsed={:.3}s", board.to_move().symbol(), s.nodes(), dt.as_secs_f64());
    Ok(())
}
