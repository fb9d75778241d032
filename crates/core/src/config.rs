//! Scanner configuration
//!
//! Selectors default to what chess.com and lichess render today; a JSON file
//! can override any subset of them when a site changes its markup.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Element id of the chess.com board container.
    pub chesscom_board_id: String,
    /// Class every chess.com piece element carries.
    pub chesscom_piece_class: String,
    /// Prefix of the class token that encodes a chess.com square.
    pub square_class_prefix: String,
    /// Class marking the lichess (chessground) board container.
    pub lichess_board_class: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            chesscom_board_id: "board-single".to_string(),
            chesscom_piece_class: "piece".to_string(),
            square_class_prefix: "square-".to_string(),
            lichess_board_class: "cg-wrap".to_string(),
        }
    }
}

impl ScannerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}
