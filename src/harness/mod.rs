//! Validation against recorded games

pub mod recording;
pub mod validate;

pub use recording::{read_turns, RecordLine, RecordedTurn, LOG_FILENAME};
pub use validate::{
    validate_directory, validate_log, validate_recording, validate_turn, RecordingReport,
    TurnReport, ValidationSummary,
};
