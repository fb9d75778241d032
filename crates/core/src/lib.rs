//! SquareWatch core library
//!
//! Reads piece placements from chess.com and lichess board widgets and counts
//! how many white and black pieces attack each square.

pub mod board;
pub mod config;
pub mod error;
pub mod fen;
pub mod scanner;
pub mod threats;

pub use board::{Kind, PieceCode, PiecePosition, Side, Square, SquareThreat};
pub use config::ScannerConfig;
pub use error::{Error, Result};
pub use scanner::{BoardScanner, BoardSite, DocumentQuery, ScanReport, SnapshotDocument};
pub use threats::{attack_squares, compute_threats};
