//! Per-square threat aggregation

use std::collections::HashMap;

use super::attacks::{attack_squares_with, Occupancy};
use crate::board::{PiecePosition, Square, SquareThreat};

/// Counts, for every attacked square, how many white and black pieces attack
/// it.
///
/// Squares nobody attacks are absent. Records come back in the order their
/// square was first attacked while walking `pieces` front to back; the counts
/// do not depend on the input order.
pub fn compute_threats(pieces: &[PiecePosition]) -> Vec<SquareThreat> {
    let occupancy = Occupancy::from_pieces(pieces);
    let mut slots: HashMap<Square, usize> = HashMap::new();
    let mut threats: Vec<SquareThreat> = Vec::new();

    for piece in pieces {
        for square in attack_squares_with(piece, &occupancy) {
            let slot = *slots.entry(square).or_insert_with(|| {
                threats.push(SquareThreat::new(square));
                threats.len() - 1
            });
            threats[slot].record(piece.side());
        }
    }

    threats
}
