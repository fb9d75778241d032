//! Site-specific board readers

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::dom::{DocumentQuery, NodeId};
use crate::board::{Kind, PieceCode, PiecePosition, Side, Square, BOARD_SIZE};
use crate::config::ScannerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardSite {
    ChessCom,
    Lichess,
}

impl BoardSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardSite::ChessCom => "chesscom",
            BoardSite::Lichess => "lichess",
        }
    }
}

/// Reads piece placements out of one kind of board widget.
pub trait BoardAdapter: Send + Sync {
    fn site(&self) -> BoardSite;

    /// The board container, if this adapter's widget is on the page.
    fn locate(&self, doc: &dyn DocumentQuery) -> Option<NodeId>;

    /// Pieces inside `board`. Elements that cannot be read are skipped.
    fn extract_pieces(&self, doc: &dyn DocumentQuery, board: NodeId) -> Vec<PiecePosition>;
}

/// chess.com boards: `<div class="piece wp square-42">`.
#[derive(Debug, Clone)]
pub struct ClassEncodedAdapter {
    board_id: String,
    piece_class: String,
    square_prefix: String,
}

impl ClassEncodedAdapter {
    pub fn new(config: &ScannerConfig) -> Self {
        Self {
            board_id: config.chesscom_board_id.clone(),
            piece_class: config.chesscom_piece_class.clone(),
            square_prefix: config.square_class_prefix.clone(),
        }
    }

    fn read_piece(&self, classes: &[String]) -> Option<PiecePosition> {
        let code = classes
            .iter()
            .filter(|c| c.chars().count() == 2)
            .find_map(|c| c.parse::<PieceCode>().ok())?;
        let suffix = classes
            .iter()
            .find_map(|c| c.strip_prefix(self.square_prefix.as_str()))?;
        let square = parse_square_suffix(suffix)?;
        Some(PiecePosition::new(code, square))
    }
}

impl BoardAdapter for ClassEncodedAdapter {
    fn site(&self) -> BoardSite {
        BoardSite::ChessCom
    }

    fn locate(&self, doc: &dyn DocumentQuery) -> Option<NodeId> {
        doc.element_by_id(&self.board_id)
    }

    fn extract_pieces(&self, doc: &dyn DocumentQuery, board: NodeId) -> Vec<PiecePosition> {
        doc.descendants_with_class(board, &self.piece_class)
            .into_iter()
            .filter_map(|node| {
                let classes = doc.class_list(node);
                let piece = self.read_piece(&classes);
                if piece.is_none() {
                    debug!(?classes, "skipping unreadable chess.com piece");
                }
                piece
            })
            .collect()
    }
}

/// Reads the `XY` of a `square-XY` class: row from the first character, col
/// from the second, each parsed on its own. Anything after the second
/// character is ignored.
pub fn parse_square_suffix(suffix: &str) -> Option<Square> {
    let mut digits = suffix.chars().map(|c| c.to_digit(10));
    let row = digits.next()??;
    let col = digits.next()??;
    Square::new(row as i32, col as i32)
}

/// lichess (chessground) boards: `<piece class="white pawn">` positioned with
/// a CSS transform relative to the `cg-wrap` container.
#[derive(Debug, Clone)]
pub struct TransformEncodedAdapter {
    board_class: String,
}

impl TransformEncodedAdapter {
    pub fn new(config: &ScannerConfig) -> Self {
        Self {
            board_class: config.lichess_board_class.clone(),
        }
    }
}

impl BoardAdapter for TransformEncodedAdapter {
    fn site(&self) -> BoardSite {
        BoardSite::Lichess
    }

    fn locate(&self, doc: &dyn DocumentQuery) -> Option<NodeId> {
        doc.first_by_class(&self.board_class)
    }

    fn extract_pieces(&self, doc: &dyn DocumentQuery, board: NodeId) -> Vec<PiecePosition> {
        let Some(rect) = doc.bounding_rect(board) else {
            debug!("lichess board has no bounding box");
            return Vec::new();
        };
        let cell_width = rect.width / f64::from(BOARD_SIZE);
        let cell_height = rect.height / f64::from(BOARD_SIZE);
        let usable = |cell: f64| cell.is_finite() && cell > 0.0;
        if !(usable(cell_width) && usable(cell_height)) {
            debug!(
                width = rect.width,
                height = rect.height,
                "lichess board has a degenerate bounding box"
            );
            return Vec::new();
        }

        doc.descendants(board)
            .into_iter()
            .filter_map(|node| {
                let code = chessground_code(&doc.class_list(node))?;
                let transform = doc.computed_transform(node);
                let square = transform
                    .as_deref()
                    .and_then(parse_matrix_translation)
                    .and_then(|(tx, ty)| {
                        square_from_translation(tx, ty, cell_width, cell_height)
                    });
                if square.is_none() {
                    debug!(%code, ?transform, "skipping unplaceable lichess piece");
                }
                Some(PiecePosition::new(code, square?))
            })
            .collect()
    }
}

fn chessground_code(classes: &[String]) -> Option<PieceCode> {
    let side = classes.iter().find_map(|c| Side::from_class_name(c))?;
    let kind = classes.iter().find_map(|c| Kind::from_class_name(c))?;
    Some(PieceCode::new(side, kind))
}

/// Extracts `(tx, ty)` from a `matrix(a, b, c, d, tx, ty)` transform.
pub fn parse_matrix_translation(transform: &str) -> Option<(f64, f64)> {
    let args = transform
        .trim()
        .strip_prefix("matrix(")?
        .strip_suffix(')')?;
    let values = args
        .split(',')
        .map(|v| v.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect::<Option<Vec<f64>>>()?;
    match values.as_slice() {
        [_, _, _, _, tx, ty] => Some((*tx, *ty)),
        _ => None,
    }
}

/// Maps a pixel offset inside the board to a square. Screen y grows downward
/// while rank 8 sits at the top, so the row axis is flipped.
pub fn square_from_translation(
    tx: f64,
    ty: f64,
    cell_width: f64,
    cell_height: f64,
) -> Option<Square> {
    let cells = 0.0..f64::from(BOARD_SIZE);
    let col = (tx / cell_width).floor();
    let row = (ty / cell_height).floor();
    if !(cells.contains(&col) && cells.contains(&row)) {
        return None;
    }
    Square::new(i32::from(BOARD_SIZE) - row as i32, col as i32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::snapshot::{SnapshotDocument, SnapshotNode};

    fn sq(row: i32, col: i32) -> Square {
        Square::new(row, col).unwrap()
    }

    fn piece(code: &str, row: i32, col: i32) -> PiecePosition {
        PiecePosition::parse(code, row, col).unwrap()
    }

    #[test]
    fn test_square_suffix() {
        assert_eq!(parse_square_suffix("42"), Some(sq(4, 2)));
        assert_eq!(parse_square_suffix("88"), Some(sq(8, 8)));
        // single-digit split, not base-10 arithmetic
        assert_eq!(parse_square_suffix("123"), Some(sq(1, 2)));
        assert_eq!(parse_square_suffix("4"), None);
        assert_eq!(parse_square_suffix(""), None);
        assert_eq!(parse_square_suffix("09"), None);
        assert_eq!(parse_square_suffix("49"), None);
        assert_eq!(parse_square_suffix("a2"), None);
    }

    #[test]
    fn test_matrix_translation() {
        assert_eq!(
            parse_matrix_translation("matrix(1, 0, 0, 1, 100, 600)"),
            Some((100.0, 600.0))
        );
        assert_eq!(
            parse_matrix_translation("matrix(1,0,0,1,-2.5,37.25)"),
            Some((-2.5, 37.25))
        );
        assert_eq!(parse_matrix_translation("none"), None);
        assert_eq!(parse_matrix_translation("matrix(1, 0, 0, 1, 100)"), None);
        assert_eq!(parse_matrix_translation("matrix(1, 0, 0, 1, x, 600)"), None);
        assert_eq!(parse_matrix_translation("translate(100px, 600px)"), None);
    }

    #[test]
    fn test_square_from_translation() {
        // 800px board, 100px cells
        assert_eq!(square_from_translation(100.0, 600.0, 100.0, 100.0), Some(sq(2, 2)));
        assert_eq!(square_from_translation(600.0, 100.0, 100.0, 100.0), Some(sq(7, 7)));
        assert_eq!(square_from_translation(0.0, 0.0, 100.0, 100.0), Some(sq(8, 1)));
        assert_eq!(square_from_translation(799.0, 799.0, 100.0, 100.0), Some(sq(1, 8)));
        assert_eq!(square_from_translation(800.0, 0.0, 100.0, 100.0), None);
        assert_eq!(square_from_translation(0.0, 800.0, 100.0, 100.0), None);
        assert_eq!(square_from_translation(-1.0, 0.0, 100.0, 100.0), None);
    }

    #[test]
    fn test_square_from_extreme_translation() {
        assert_eq!(square_from_translation(1e300, 0.0, 100.0, 100.0), None);
        assert_eq!(square_from_translation(-1e300, 0.0, 100.0, 100.0), None);
        assert_eq!(square_from_translation(0.0, 1e300, 100.0, 100.0), None);
        assert_eq!(square_from_translation(0.0, -1e300, 100.0, 100.0), None);
        assert_eq!(square_from_translation(f64::MAX, f64::MIN, 100.0, 100.0), None);
        assert_eq!(square_from_translation(3e9, 100.0, 100.0, 100.0), None);
    }

    #[test]
    fn test_class_encoded_pieces() {
        let doc = SnapshotDocument::new(
            SnapshotNode::element("div")
                .with_id("board-single")
                .child(SnapshotNode::element("div").with_class("piece wp square-42"))
                .child(SnapshotNode::element("div").with_class("piece square-57 bn"))
                .child(SnapshotNode::element("div").with_class("piece wq"))
                .child(SnapshotNode::element("div").with_class("piece square-11"))
                .child(SnapshotNode::element("div").with_class("piece xx square-11"))
                .child(SnapshotNode::element("div").with_class("piece wk square-90"))
                .child(SnapshotNode::element("div").with_class("piece xx wr square-13"))
                .child(SnapshotNode::element("div").with_class("highlight square-33")),
        );
        let adapter = ClassEncodedAdapter::new(&ScannerConfig::default());
        let board = adapter.locate(&doc).unwrap();

        assert_eq!(
            adapter.extract_pieces(&doc, board),
            vec![piece("wp", 4, 2), piece("bn", 5, 7), piece("wr", 1, 3)]
        );
    }

    #[test]
    fn test_transform_encoded_pieces() {
        let doc = SnapshotDocument::new(
            SnapshotNode::element("div")
                .with_class("cg-wrap")
                .with_size(800.0, 800.0)
                .child(
                    SnapshotNode::element("cg-board")
                        .child(
                            SnapshotNode::element("piece")
                                .with_class("white pawn")
                                .with_transform("matrix(1, 0, 0, 1, 100, 600)"),
                        )
                        .child(
                            SnapshotNode::element("piece")
                                .with_class("black knight")
                                .with_transform("matrix(1, 0, 0, 1, 600, 100)"),
                        )
                        .child(SnapshotNode::element("piece").with_class("white queen"))
                        .child(
                            SnapshotNode::element("piece")
                                .with_class("black rook")
                                .with_transform("matrix(1, 0, 0, 1, 900, 100)"),
                        )
                        .child(
                            SnapshotNode::element("square")
                                .with_class("last-move")
                                .with_transform("matrix(1, 0, 0, 1, 0, 0)"),
                        ),
                )
                .child(SnapshotNode::element("coords").with_class("ranks black")),
        );
        let adapter = TransformEncodedAdapter::new(&ScannerConfig::default());
        let board = adapter.locate(&doc).unwrap();

        assert_eq!(
            adapter.extract_pieces(&doc, board),
            vec![piece("wp", 2, 2), piece("bn", 7, 7)]
        );
    }

    #[test]
    fn test_transform_encoded_skips_extreme_offsets() {
        let mut cg_board = SnapshotNode::element("cg-board");
        for (class, transform) in [
            ("white pawn", "matrix(1, 0, 0, 1, 100, -1e300)"),
            ("white rook", "matrix(1, 0, 0, 1, 1e300, 100)"),
            ("white queen", "matrix(1, 0, 0, 1, -1e300, 100)"),
            ("white king", "matrix(1, 0, 0, 1, 100, 1E300)"),
            ("white knight", "matrix(1, 0, 0, 1, 100, -5000000000)"),
            ("black pawn", "matrix(1, 0, 0, 1, 100, 100)"),
        ] {
            cg_board = cg_board.child(
                SnapshotNode::element("piece")
                    .with_class(class)
                    .with_transform(transform),
            );
        }
        let doc = SnapshotDocument::new(
            SnapshotNode::element("div")
                .with_class("cg-wrap")
                .with_size(800.0, 800.0)
                .child(cg_board),
        );

        assert_eq!(
            crate::scanner::BoardScanner::default().scan(&doc),
            vec![piece("bp", 7, 2)]
        );
    }

    #[test]
    fn test_transform_encoded_non_square_board() {
        let doc = SnapshotDocument::new(
            SnapshotNode::element("div")
                .with_class("cg-wrap")
                .with_size(400.0, 800.0)
                .child(
                    SnapshotNode::element("piece")
                        .with_class("black king")
                        .with_transform("matrix(1, 0, 0, 1, 50, 100)"),
                ),
        );
        let adapter = TransformEncodedAdapter::new(&ScannerConfig::default());
        let board = adapter.locate(&doc).unwrap();

        assert_eq!(adapter.extract_pieces(&doc, board), vec![piece("bk", 7, 2)]);
    }

    #[test]
    fn test_transform_encoded_without_geometry() {
        let piece_node = SnapshotNode::element("piece")
            .with_class("white pawn")
            .with_transform("matrix(1, 0, 0, 1, 100, 600)");
        let adapter = TransformEncodedAdapter::new(&ScannerConfig::default());

        let no_rect = SnapshotDocument::new(
            SnapshotNode::element("div").with_class("cg-wrap").child(piece_node.clone()),
        );
        let board = adapter.locate(&no_rect).unwrap();
        assert!(adapter.extract_pieces(&no_rect, board).is_empty());

        let zero = SnapshotDocument::new(
            SnapshotNode::element("div")
                .with_class("cg-wrap")
                .with_size(0.0, 0.0)
                .child(piece_node),
        );
        let board = adapter.locate(&zero).unwrap();
        assert!(adapter.extract_pieces(&zero, board).is_empty());
    }
}
