//! Attack patterns per piece kind
//!
//! The move model is deliberately check-agnostic: no pins, no castling, no
//! en passant. A piece attacks every square it could move to or capture on.

use crate::board::{Kind, PiecePosition, Square, BOARD_SIZE};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

const ROOK_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Squares occupied by any piece, indexed by `Square::index`.
pub struct Occupancy([bool; (BOARD_SIZE * BOARD_SIZE) as usize]);

impl Occupancy {
    pub fn from_pieces(pieces: &[PiecePosition]) -> Self {
        let mut occupied = [false; (BOARD_SIZE * BOARD_SIZE) as usize];
        for piece in pieces {
            occupied[piece.square.index()] = true;
        }
        Self(occupied)
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.0[square.index()]
    }
}

/// Returns every square `piece` attacks, given the full set of pieces on the
/// board for blocking.
///
/// Sliding rays stop on the first occupied square, which is itself included.
/// Blockers of either colour stop a ray.
pub fn attack_squares(piece: &PiecePosition, all_pieces: &[PiecePosition]) -> Vec<Square> {
    if piece.kind().is_slider() {
        attack_squares_with(piece, &Occupancy::from_pieces(all_pieces))
    } else {
        leaper_attacks(piece)
    }
}

/// Same as [`attack_squares`] with a prebuilt occupancy table, so callers that
/// walk many pieces build it once.
pub fn attack_squares_with(piece: &PiecePosition, occupancy: &Occupancy) -> Vec<Square> {
    let from = piece.square;
    match piece.kind() {
        Kind::Bishop => slide(from, &BISHOP_DIRECTIONS, occupancy),
        Kind::Rook => slide(from, &ROOK_DIRECTIONS, occupancy),
        Kind::Queen => {
            let mut squares = slide(from, &ROOK_DIRECTIONS, occupancy);
            squares.extend(slide(from, &BISHOP_DIRECTIONS, occupancy));
            squares
        }
        _ => leaper_attacks(piece),
    }
}

fn leaper_attacks(piece: &PiecePosition) -> Vec<Square> {
    let from = piece.square;
    match piece.kind() {
        Kind::Pawn => {
            let forward = piece.side().forward();
            step(from, &[(forward, 1), (forward, -1)])
        }
        Kind::Knight => step(from, &KNIGHT_OFFSETS),
        Kind::King => step(from, &KING_OFFSETS),
        Kind::Bishop | Kind::Rook | Kind::Queen => Vec::new(),
    }
}

fn step(from: Square, offsets: &[(i32, i32)]) -> Vec<Square> {
    offsets
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .collect()
}

fn slide(from: Square, directions: &[(i32, i32)], occupancy: &Occupancy) -> Vec<Square> {
    let mut squares = Vec::new();
    for &(dr, dc) in directions {
        let mut current = from;
        while let Some(next) = current.offset(dr, dc) {
            squares.push(next);
            if occupancy.is_occupied(next) {
                break;
            }
            current = next;
        }
    }
    squares
}
