use thiserror::Error;

use crate::hex::HexCoord;
use crate::resolution::Prediction;

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("Unknown demon archetype: {0}")]
    UnknownArchetype(String),

    #[error("Invalid hex coordinate ({x}, {y}, {z}): components must sum to zero")]
    InvalidCoordinate { x: i32, y: i32, z: i32 },

    #[error("Coordinate {0} is not on the board")]
    NotOnSurface(HexCoord),

    #[error("No demon at {0} to perform the action")]
    MissingActor(HexCoord),

    #[error("Combination limit of {limit} exceeded, prediction is incomplete")]
    CombinationOverflow {
        limit: usize,
        partial: Box<Prediction>,
    },

    #[error("Malformed state code: {0}")]
    MalformedState(String),

    #[error("Malformed player move: {0}")]
    MalformedMove(String),

    #[error("Malformed recording line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OracleError>;
