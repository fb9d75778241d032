use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};
use serde::Deserialize;
use std::sync::Arc;

use square_watch_core::{
    board::threat_at, compute_threats, fen::pieces_from_fen, Kind, PiecePosition, Side, Square,
};

use crate::AppState;

pub mod api;

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub title: String,
    pub fen: String,
    pub rows: Vec<BoardRow>,
    pub piece_count: usize,
    pub attacked_count: usize,
}

pub struct BoardRow {
    pub rank: u8,
    pub cells: Vec<CellView>,
}

pub struct CellView {
    pub name: String,
    pub shade: &'static str,
    pub glyph: &'static str,
    pub tint: String,
    pub self_count: u32,
    pub enemy_count: u32,
}

#[derive(Deserialize)]
pub struct FenQuery {
    pub fen: Option<String>,
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FenQuery>,
) -> Result<Html<String>, (StatusCode, String)> {
    let fen = params
        .fen
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| START_FEN.to_string());

    let pieces = pieces_from_fen(&fen).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let threats = compute_threats(&pieces);

    // rank 8 at the top, as the board is drawn from white's side
    let rows = (1..=8u8)
        .rev()
        .map(|rank| BoardRow {
            rank,
            cells: (1..=8u8)
                .map(|file| {
                    let square = Square { row: rank, col: file };
                    let threat = threat_at(&threats, square);
                    CellView {
                        name: square.to_string(),
                        shade: if (rank + file) % 2 == 0 { "dark" } else { "light" },
                        glyph: pieces
                            .iter()
                            .find(|p| p.square == square)
                            .map(glyph)
                            .unwrap_or(""),
                        tint: threat
                            .and_then(|t| state.overlay.tint(t))
                            .map(|t| t.to_string())
                            .unwrap_or_else(|| "transparent".to_string()),
                        self_count: threat.map_or(0, |t| t.self_count),
                        enemy_count: threat.map_or(0, |t| t.enemy_count),
                    }
                })
                .collect(),
        })
        .collect();

    let template = IndexTemplate {
        title: "SquareWatch".to_string(),
        fen,
        rows,
        piece_count: pieces.len(),
        attacked_count: threats.len(),
    };
    template
        .render()
        .map(Html)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

fn glyph(piece: &PiecePosition) -> &'static str {
    match (piece.side(), piece.kind()) {
        (Side::White, Kind::King) => "♔",
        (Side::White, Kind::Queen) => "♕",
        (Side::White, Kind::Rook) => "♖",
        (Side::White, Kind::Bishop) => "♗",
        (Side::White, Kind::Knight) => "♘",
        (Side::White, Kind::Pawn) => "♙",
        (Side::Black, Kind::King) => "♚",
        (Side::Black, Kind::Queen) => "♛",
        (Side::Black, Kind::Rook) => "♜",
        (Side::Black, Kind::Bishop) => "♝",
        (Side::Black, Kind::Knight) => "♞",
        (Side::Black, Kind::Pawn) => "♟",
    }
}

pub async fn health() -> &'static str {
    "OK"
}
