use anyhow::Result;
use clap::Parser;
use connectx::arena::{play_game, tally, write_records, GameRecord, MatchParams};
use connectx::board::{Grid, Stone};
use connectx::player::{NegamaxPlayer, Player, RandomPlayer};
use connectx::EngineConfig;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::PathBuf;
use connectx::config::timeout_from_secs;

#[derive(Parser, Debug)]
#[command(name = "connectx-arena", version, about = "Run batches of Connect-K games between engines")]
struct Args {
    #[arg(long, default_value_t = 6)]
    rows: usize,

    #[arg(long, default_value_t = 7)]
    cols: usize,

    #[arg(long, default_value_t = 4)]
    k: usize,

    /// Number of games; colours alternate every game
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Per-move timeout in seconds
    #[arg(long, default_value_t = 1.0)]
    timeout: f64,

    /// Opponent: 'random' or 'engine'
    #[arg(long, default_value = "random")]
    opponent: String,

    /// Engine config (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Config for the opponent engine (defaults to --config)
    #[arg(long)]
    opponent_config: Option<PathBuf>,

    /// Base seed for random opponents
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Threads (0 = rayon default)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Write game records as JSON lines
    #[arg(long)]
    out: Option<PathBuf>,
}

fn make_opponent(kind: &str, config: &EngineConfig, seed: u64) -> Result<Box<dyn Player<Grid> + Send>> {
    match kind {
        "random" => Ok(Box::new(RandomPlayer::new(seed))),
        "engine" => Ok(Box::new(NegamaxPlayer::new(config.clone()))),
        other => anyhow::bail!("unknown opponent '{other}'"),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = match &args.config {
        Some(p) => EngineConfig::load(p)?,
        None => EngineConfig::default(),
    };
    let opp_config = match &args.opponent_config {
        Some(p) => EngineConfig::load(p)?,
        None => config.clone(),
    };
    // Validate the opponent kind before spawning work
    make_opponent(&args.opponent, &opp_config, args.seed)?;

    let params = MatchParams { rows: args.rows, cols: args.cols, win_length: args.k, timeout: timeout_from_secs(args.timeout)? };
    if args.threads > 0 {
        rayon::ThreadPoolBuilder::new().num_threads(args.threads).build_global()?;
    }

    let pb = ProgressBar::new(args.games as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games [{elapsed_precise}]")?);

    let records: Vec<GameRecord> = (0..args.games)
        .into_par_iter()
        .map(|i| -> Result<GameRecord> {
            let mut engine = NegamaxPlayer::new(config.clone());
            let mut opp = make_opponent(&args.opponent, &opp_config, args.seed.wrapping_add(i as u64))?;
            let rec = if i % 2 == 0 {
                play_game(&params, &mut engine, opp.as_mut())?
            } else {
                play_game(&params, opp.as_mut(), &mut engine)?
            };
            pb.inc(1);
            Ok(rec)
        })
        .collect::<Result<_>>()?;
    pb.finish();

    let t = tally(&records);
    for ((name, seat), wins) in &t.wins {
        println!("{name} as {}: {wins}", seat.symbol());
    }
    println!("draws: {}", t.draws);
    // Even games put the engine first
    let engine_seat = |i: usize| if i % 2 == 0 { Stone::P1 } else { Stone::P2 };
    let engine_wins = records.iter().enumerate().filter(|(i, r)| r.winner == Some(engine_seat(*i))).count();
    let opponent_wins = records.iter().enumerate().filter(|(i, r)| r.winner == Some(engine_seat(*i).opponent())).count();
    println!("engine wins: {engine_wins}, {} wins: {opponent_wins}", args.opponent);
    println!("first player wins: {}, second player wins: {}", t.seat_wins(Stone::P1), t.seat_wins(Stone::P2));
    let forfeits = records.iter().filter(|r| r.forfeit.is_some()).count();
    if forfeits > 0 { println!("forfeits: {forfeits}"); }
    if let Some(path) = &args.out {
        write_records(path, &records)?;
        println!("wrote {} records to {}", records.len(), path.display());
    }
    Ok(())
}
