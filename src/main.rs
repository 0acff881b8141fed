use anyhow::Result;
use clap::Parser;
use connectx::board::{Board, GameState, Grid, Stone};
use connectx::player::{NegamaxPlayer, Player};
use connectx::search::eval::evaluate_for_p1;
use connectx::EngineConfig;
use std::io::{self, Write};
use std::path::PathBuf;
use connectx::config::timeout_from_secs;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play Connect-K against the alpha-beta engine", long_about = None)]
struct Args {
    /// Board rows
    #[arg(long, default_value_t = 6)]
    rows: usize,

    /// Board columns
    #[arg(long, default_value_t = 7)]
    cols: usize,

    /// Stones in a row needed to win
    #[arg(long, default_value_t = 4)]
    k: usize,

    /// Your side: 'x' moves first, 'o' second, 'none' lets the engine play both
    #[arg(long, default_value = "x")]
    side: String,

    /// Engine thinking time per move in seconds
    #[arg(long, default_value_t = 3.0)]
    timeout: f64,

    /// Engine config (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print search statistics
    #[arg(long)]
    verbose: bool,
}

fn parse_side(s: &str) -> Result<Option<Stone>> {
    match s.to_lowercase().as_str() {
        "x" | "first" => Ok(Some(Stone::P1)),
        "o" | "second" => Ok(Some(Stone::P2)),
        "none" => Ok(None),
        _ => anyhow::bail!("Invalid side: use 'x', 'o' or 'none'"),
    }
}

fn get_human_move(board: &Grid) -> Result<usize> {
    let legal = board.legal_moves();
    loop {
        print!("Your column {:?}: ", legal);
        io::stdout().flush()?;
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 { anyhow::bail!("stdin closed"); }
        match input.trim().parse::<usize>() {
            Ok(c) if legal.contains(&c) => return Ok(c),
            Ok(_) => println!("Illegal column!"),
            Err(_) => println!("Enter a column number"),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let human = parse_side(&args.side)?;
    let config = match &args.config {
        Some(p) => EngineConfig::load(p)?,
        None => EngineConfig::default(),
    };
    let timeout = timeout_from_secs(args.timeout)?;

    let mut board = Grid::new(args.rows, args.cols, args.k)?;
    let mut engines = [NegamaxPlayer::new(config.clone()), NegamaxPlayer::new(config)];
    for (i, e) in engines.iter_mut().enumerate() {
        Player::<Grid>::initialize(e, args.rows, args.cols, args.k, i == 0, timeout);
    }

    while board.state() == GameState::Open {
        println!("\n{board}");
        let side = board.to_move();
        if human == Some(side) {
            let col = get_human_move(&board)?;
            board.try_apply(col)?;
        } else {
            let engine = &mut engines[side.index()];
            let col = engine.select_move(&mut board);
            println!("{} ({}) plays column {col}", Player::<Grid>::name(engine), side.symbol());
            if args.verbose {
                if let Some(r) = engine.last_result() {
                    println!("score {} depth {} nodes {} aborted {}", r.score, r.depth, r.nodes, r.aborted);
                    println!("static eval (X view) {}", evaluate_for_p1(&board));
                }
            }
        }
    }

    println!("\n{board}");
    match board.state() {
        GameState::Win(s) => println!("{} wins!", s.symbol()),
        _ => println!("Draw."),
    }
    Ok(())
}
