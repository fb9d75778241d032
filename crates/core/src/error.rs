//! Error types for square-watch-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid piece code: {0:?}")]
    InvalidPieceCode(String),

    #[error("square ({row}, {col}) is off the board")]
    InvalidSquare { row: i32, col: i32 },

    #[error("FEN parsing error: {0}")]
    Fen(String),
}

pub type Result<T> = std::result::Result<T, Error>;
