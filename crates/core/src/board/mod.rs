//! Piece placements, squares and threat records

mod types;

pub use types::*;
