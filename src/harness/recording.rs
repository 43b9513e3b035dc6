//! Turn-by-turn game logs
//!
//! Each line is `turn<TAB>kind<TAB>state<TAB>move`. Lines whose kind is not
//! `move` record altar prayers and are ignored. Two consecutive move lines
//! on the same level form one observed turn.

use crate::core::error::{OracleError, Result};
use crate::game::{GameState, PlayerMove};

/// Log file name inside each recording folder
pub const LOG_FILENAME: &str = "game.log";

/// One raw log line, split into its fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLine<'a> {
    /// 1-based line number in the log
    pub line: usize,
    pub turn: u32,
    pub kind: &'a str,
    pub state: &'a str,
    pub player_move: Option<&'a str>,
}

impl<'a> RecordLine<'a> {
    pub fn parse(line: usize, text: &'a str) -> Result<Self> {
        let fields: Vec<&str> = text.trim_end_matches(['\r', '\n']).split('\t').collect();
        if fields.len() < 3 {
            return Err(OracleError::MalformedRecord {
                line,
                reason: format!("expected at least 3 tab-separated fields, got {}", fields.len()),
            });
        }
        let turn = fields[0].trim().parse::<u32>().map_err(|_| OracleError::MalformedRecord {
            line,
            reason: format!("bad turn number '{}'", fields[0]),
        })?;
        Ok(Self {
            line,
            turn,
            kind: fields[1].trim(),
            state: fields[2].trim(),
            player_move: fields.get(3).map(|m| m.trim()).filter(|m| !m.is_empty()),
        })
    }

    /// Player moves as opposed to altar prayers
    pub fn is_move(&self) -> bool {
        self.kind == "move"
    }

    /// Level part of the state code
    pub fn depth(&self) -> &'a str {
        self.state.split(';').next().unwrap_or_default()
    }
}

/// A previous state, the move the player made, and the state the game showed next
#[derive(Debug, Clone)]
pub struct RecordedTurn {
    pub turn: u32,
    pub line: usize,
    pub previous: GameState,
    pub player_move: PlayerMove,
    pub observed: GameState,
}

impl RecordedTurn {
    pub fn from_pair(previous: &RecordLine, next: &RecordLine) -> Result<Self> {
        let malformed = |e: OracleError| OracleError::MalformedRecord {
            line: previous.line,
            reason: e.to_string(),
        };
        let player_move = previous.player_move.ok_or_else(|| OracleError::MalformedRecord {
            line: previous.line,
            reason: "missing player move".into(),
        })?;

        Ok(Self {
            turn: previous.turn,
            line: previous.line,
            previous: GameState::from_code(previous.state).map_err(malformed)?,
            player_move: PlayerMove::parse(player_move).map_err(malformed)?,
            observed: GameState::from_code(next.state).map_err(|e| OracleError::MalformedRecord {
                line: next.line,
                reason: e.to_string(),
            })?,
        })
    }
}

/// Pair up the move lines of a log into observed turns
///
/// Malformed lines or pairs come back as errors in place, so callers can
/// report and skip them without losing the rest of the log.
pub fn read_turns(contents: &str) -> Vec<Result<RecordedTurn>> {
    let mut turns = Vec::new();
    let mut last: Option<RecordLine> = None;

    for (index, text) in contents.lines().enumerate() {
        if text.trim().is_empty() {
            continue;
        }
        let line = match RecordLine::parse(index + 1, text) {
            Ok(line) => line,
            Err(e) => {
                turns.push(Err(e));
                last = None;
                continue;
            }
        };
        if !line.is_move() {
            continue;
        }
        if let Some(previous) = &last {
            if previous.depth() == line.depth() {
                turns.push(RecordedTurn::from_pair(previous, &line));
            }
        }
        last = Some(line);
    }
    turns
}
