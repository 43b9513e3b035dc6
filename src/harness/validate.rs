//! Replay recorded turns through the predictor and score the results

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::config::OracleConfig;
use crate::core::error::{OracleError, Result};
use crate::harness::recording::{read_turns, RecordedTurn, LOG_FILENAME};
use crate::resolution::{resolve_turn, Prediction};

/// Result of checking one recorded turn
#[derive(Debug, Clone, Serialize)]
pub struct TurnReport {
    pub turn: u32,
    pub player_move: String,
    /// Some predicted state has the observed demon positions
    pub matched: bool,
    pub combinations: usize,
    pub predicted_states: usize,
    pub distinct_actions: usize,
    /// Combination limit was hit; only part of the outcomes were checked
    pub partial: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub matched: usize,
    pub mismatched: usize,
    /// Malformed turns that could not be checked
    pub skipped: usize,
    pub partial: usize,
}

impl ValidationSummary {
    pub fn checked(&self) -> usize {
        self.matched + self.mismatched
    }

    pub fn accuracy(&self) -> f64 {
        if self.checked() == 0 {
            return 0.0;
        }
        self.matched as f64 / self.checked() as f64
    }

    pub fn record(&mut self, report: &TurnReport) {
        if report.matched {
            self.matched += 1;
        } else {
            self.mismatched += 1;
        }
        if report.partial {
            self.partial += 1;
        }
    }

    pub fn merge(&mut self, other: &ValidationSummary) {
        self.matched += other.matched;
        self.mismatched += other.mismatched;
        self.skipped += other.skipped;
        self.partial += other.partial;
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordingReport {
    pub path: PathBuf,
    pub turns: Vec<TurnReport>,
    pub summary: ValidationSummary,
}

/// Check one recorded turn
///
/// Returns `Ok(None)` for turns the predictor does not model: anything but
/// a walk, or a walk that leaves no demon standing.
pub fn validate_turn(turn: &RecordedTurn, config: &OracleConfig) -> Result<Option<TurnReport>> {
    if !turn.player_move.is_walk() {
        return Ok(None);
    }
    let after_move = turn.player_move.apply(&turn.previous, config)?;
    if after_move.terrain.demons.is_empty() {
        return Ok(None);
    }

    let (prediction, partial) = match resolve_turn(&after_move, config) {
        Ok(prediction) => (prediction, false),
        Err(OracleError::CombinationOverflow { partial, .. }) => (*partial, true),
        Err(e) => return Err(e),
    };
    Ok(Some(report(turn, &prediction, partial)))
}

fn report(turn: &RecordedTurn, prediction: &Prediction, partial: bool) -> TurnReport {
    let matched = prediction.covers(&turn.observed);
    if !matched {
        tracing::info!(
            "Turn {} ({}): observed state not among {} predicted states",
            turn.turn,
            turn.player_move,
            prediction.states.len()
        );
    }
    TurnReport {
        turn: turn.turn,
        player_move: turn.player_move.to_string(),
        matched,
        combinations: prediction.combinations.len(),
        predicted_states: prediction.states.len(),
        distinct_actions: prediction.distinct_actions.len(),
        partial,
    }
}

/// Check the turns of one log, up to `limit` checked turns
pub fn validate_log(
    path: &Path,
    contents: &str,
    limit: Option<usize>,
    config: &OracleConfig,
) -> RecordingReport {
    let mut turns = Vec::new();
    let mut summary = ValidationSummary::default();

    for recorded in read_turns(contents) {
        if limit.is_some_and(|limit| turns.len() >= limit) {
            break;
        }
        let checked = recorded.and_then(|turn| validate_turn(&turn, config));
        match checked {
            Ok(Some(report)) => {
                summary.record(&report);
                turns.push(report);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Skipping turn in {}: {}", path.display(), e);
                summary.skipped += 1;
            }
        }
    }

    RecordingReport {
        path: path.to_path_buf(),
        turns,
        summary,
    }
}

/// Read and check one log file
pub fn validate_recording(
    path: &Path,
    limit: Option<usize>,
    config: &OracleConfig,
) -> Result<RecordingReport> {
    let contents = fs::read_to_string(path)?;
    Ok(validate_log(path, &contents, limit, config))
}

/// Check every `<dir>/*/game.log`, in folder name order
///
/// Folders without a log are ignored.
pub fn validate_directory(
    dir: &Path,
    limit: Option<usize>,
    config: &OracleConfig,
) -> Result<Vec<RecordingReport>> {
    let mut folders: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect();
    folders.sort();

    let mut reports = Vec::new();
    for folder in folders {
        let log = folder.join(LOG_FILENAME);
        if !log.is_file() {
            tracing::debug!("No {} in {}", LOG_FILENAME, folder.display());
            continue;
        }
        tracing::info!("Validating {}", log.display());
        reports.push(validate_recording(&log, limit, config)?);
    }
    Ok(reports)
}
