//! Bridge between scanned placements and FEN via shakmaty

use shakmaty::{fen::Fen, Board, Color, Piece, Role};

use crate::board::{Kind, PieceCode, PiecePosition, Side, Square};
use crate::error::{Error, Result};

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

impl From<Color> for Side {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }
}

impl From<Kind> for Role {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Pawn => Role::Pawn,
            Kind::Knight => Role::Knight,
            Kind::Bishop => Role::Bishop,
            Kind::Rook => Role::Rook,
            Kind::Queen => Role::Queen,
            Kind::King => Role::King,
        }
    }
}

impl From<Role> for Kind {
    fn from(role: Role) -> Self {
        match role {
            Role::Pawn => Kind::Pawn,
            Role::Knight => Kind::Knight,
            Role::Bishop => Kind::Bishop,
            Role::Rook => Kind::Rook,
            Role::Queen => Kind::Queen,
            Role::King => Kind::King,
        }
    }
}

impl From<PieceCode> for Piece {
    fn from(code: PieceCode) -> Self {
        Piece {
            color: code.side.into(),
            role: code.kind.into(),
        }
    }
}

impl From<Piece> for PieceCode {
    fn from(piece: Piece) -> Self {
        PieceCode::new(piece.color.into(), piece.role.into())
    }
}

impl From<Square> for shakmaty::Square {
    fn from(square: Square) -> Self {
        shakmaty::Square::new(square.index() as u32)
    }
}

impl From<shakmaty::Square> for Square {
    fn from(square: shakmaty::Square) -> Self {
        let index = u32::from(square);
        Square {
            row: (index / 8 + 1) as u8,
            col: (index % 8 + 1) as u8,
        }
    }
}

/// Board part of a FEN for the given placements.
///
/// If two placements share a square the later one wins.
pub fn board_fen(pieces: &[PiecePosition]) -> String {
    let mut board = Board::empty();
    for piece in pieces {
        board.set_piece_at(piece.square.into(), piece.code.into());
    }
    board.to_string()
}

/// Placements from a FEN, rank 1 first and a-file first within a rank.
///
/// Only the board field is read, so both full FENs and bare board FENs work.
pub fn pieces_from_fen(fen: &str) -> Result<Vec<PiecePosition>> {
    let board_field = fen
        .split_whitespace()
        .next()
        .ok_or_else(|| Error::Fen("empty FEN".to_string()))?;
    let parsed: Fen = board_field
        .parse()
        .map_err(|e| Error::Fen(format!("{}: {}", board_field, e)))?;
    let board = parsed.into_setup().board;

    Ok(board
        .occupied()
        .into_iter()
        .filter_map(|sq| {
            board
                .piece_at(sq)
                .map(|piece| PiecePosition::new(piece.into(), sq.into()))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn test_pieces_from_start_position() {
        let pieces = pieces_from_fen(START).unwrap();
        assert_eq!(pieces.len(), 32);
        assert_eq!(pieces[0], PiecePosition::parse("wr", 1, 1).unwrap());
        assert_eq!(pieces[4], PiecePosition::parse("wk", 1, 5).unwrap());
        assert_eq!(pieces[31], PiecePosition::parse("br", 8, 8).unwrap());
    }

    #[test]
    fn test_board_only_fen() {
        let pieces = pieces_from_fen("8/8/8/8/8/8/8/4K3").unwrap();
        assert_eq!(pieces, vec![PiecePosition::parse("wk", 1, 5).unwrap()]);
    }

    #[test]
    fn test_round_trip_board_fen() {
        let pieces = pieces_from_fen(START).unwrap();
        assert_eq!(board_fen(&pieces), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
    }

    #[test]
    fn test_board_fen_empty() {
        assert_eq!(board_fen(&[]), "8/8/8/8/8/8/8/8");
    }

    #[test]
    fn test_invalid_fen() {
        assert!(matches!(pieces_from_fen(""), Err(Error::Fen(_))));
        assert!(matches!(pieces_from_fen("not/a/board"), Err(Error::Fen(_))));
    }
}
