//! Referee: plays full games between two players and records them.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::board::{Board, BoardError, Grid, Stone};
use crate::player::Player;

#[derive(Clone, Copy, Debug)]
pub struct MatchParams {
    pub rows: usize,
    pub cols: usize,
    pub win_length: usize,
    pub timeout: Duration,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Forfeit {
    pub player: Stone,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub rows: usize,
    pub cols: usize,
    pub win_length: usize,
    /// Names of the first and second player.
    pub players: [String; 2],
    pub moves: Vec<usize>,
    pub winner: Option<Stone>,
    pub forfeit: Option<Forfeit>,
}

impl GameRecord {
    pub fn winner_name(&self) -> Option<&str> {
        self.winner.map(|s| self.players[s.index()].as_str())
    }
}

/// Plays one game. Each player receives a copy of the board; the returned
/// column is validated and applied to the referee's board. An illegal column
/// forfeits the game, overtime is only reported.
pub fn play_game(params: &MatchParams, p1: &mut dyn Player<Grid>, p2: &mut dyn Player<Grid>) -> Result<GameRecord, BoardError> {
    let mut board = Grid::new(params.rows, params.cols, params.win_length)?;
    p1.initialize(params.rows, params.cols, params.win_length, true, params.timeout);
    p2.initialize(params.rows, params.cols, params.win_length, false, params.timeout);
    let mut players: [&mut dyn Player<Grid>; 2] = [p1, p2];
    let names = [players[0].name().to_string(), players[1].name().to_string()];
    let mut forfeit = None;

    while !board.state().is_terminal() {
        let side = board.to_move();
        let mut copy = board.clone();
        let t0 = Instant::now();
        let col = players[side.index()].select_move(&mut copy);
        let dt = t0.elapsed();
        if dt > params.timeout {
            warn!("{} exceeded the timeout: {:?}", names[side.index()], dt);
        }
        match board.try_apply(col) {
            Ok(state) => debug!("{} plays {col} -> {state:?}", names[side.index()]),
            Err(e) => {
                warn!("{} forfeits: {e}", names[side.index()]);
                forfeit = Some(Forfeit { player: side, reason: e.to_string() });
                break;
            }
        }
    }

    let winner = match &forfeit {
        Some(f) => Some(f.player.opponent()),
        None => board.state().winner(),
    };
    let rec = GameRecord {
        rows: params.rows,
        cols: params.cols,
        win_length: params.win_length,
        players: names,
        moves: board.history().to_vec(),
        winner,
        forfeit,
    };
    debug!("game over after {} moves, winner {:?}", rec.moves.len(), rec.winner_name());
    Ok(rec)
}

/// Results of a batch. Wins are keyed by player name and seat, so two
/// engines sharing a name stay apart when colours alternate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub wins: BTreeMap<(String, Stone), usize>,
    pub draws: usize,
}

impl Tally {
    pub fn games(&self) -> usize { self.wins.values().sum::<usize>() + self.draws }

    /// Wins by whoever sat in `seat`, regardless of name.
    pub fn seat_wins(&self, seat: Stone) -> usize {
        self.wins.iter().filter(|((_, s), _)| *s == seat).map(|(_, n)| n).sum()
    }
}

pub fn tally(records: &[GameRecord]) -> Tally {
    let mut out = Tally::default();
    for r in records {
        match r.winner {
            Some(seat) => *out.wins.entry((r.players[seat.index()].clone(), seat)).or_insert(0) += 1,
            None => out.draws += 1,
        }
    }
    out
}

/// One JSON object per line.
pub fn write_records<P: AsRef<Path>>(path: P, records: &[GameRecord]) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    for r in records {
        serde_json::to_writer(&mut w, r)?;
        w.write_all(b"\n")?;
    }
    w.flush()
}

pub fn read_records<P: AsRef<Path>>(path: P) -> std::io::Result<Vec<GameRecord>> {
    let rdr = BufReader::new(File::open(path)?);
    let mut out = Vec::new();
    for line in rdr.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        out.push(serde_json::from_str(&line)?);
    }
    Ok(out)
}
