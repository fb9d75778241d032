//! Board scanning: turns a page's board widget into piece placements

mod adapters;
mod dom;
mod snapshot;

use serde::Serialize;
use tracing::debug;

pub use adapters::{
    parse_matrix_translation, parse_square_suffix, square_from_translation, BoardAdapter,
    BoardSite, ClassEncodedAdapter, TransformEncodedAdapter,
};
pub use dom::{DocumentQuery, NodeId, Rect};
pub use snapshot::{SnapshotDocument, SnapshotNode};

use crate::board::{PiecePosition, SquareThreat};
use crate::config::ScannerConfig;
use crate::fen::board_fen;
use crate::threats::compute_threats;

/// Tries each adapter in priority order; the first one whose board container
/// is present does the scan.
pub struct BoardScanner {
    adapters: Vec<Box<dyn BoardAdapter>>,
}

/// Everything one scan pass found, ready to hand to a renderer.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub site: Option<BoardSite>,
    pub pieces: Vec<PiecePosition>,
    pub threats: Vec<SquareThreat>,
    pub fen: String,
}

impl BoardScanner {
    /// chess.com first, then lichess.
    pub fn new(config: &ScannerConfig) -> Self {
        Self::with_adapters(vec![
            Box::new(ClassEncodedAdapter::new(config)),
            Box::new(TransformEncodedAdapter::new(config)),
        ])
    }

    pub fn with_adapters(adapters: Vec<Box<dyn BoardAdapter>>) -> Self {
        Self { adapters }
    }

    /// Which site's board would be scanned, if any.
    pub fn detect(&self, doc: &dyn DocumentQuery) -> Option<BoardSite> {
        self.adapters
            .iter()
            .find(|adapter| adapter.locate(doc).is_some())
            .map(|adapter| adapter.site())
    }

    /// Piece placements in document order. Empty when no board is recognized.
    pub fn scan(&self, doc: &dyn DocumentQuery) -> Vec<PiecePosition> {
        self.scan_with_site(doc).1
    }

    fn scan_with_site(&self, doc: &dyn DocumentQuery) -> (Option<BoardSite>, Vec<PiecePosition>) {
        for adapter in &self.adapters {
            if let Some(board) = adapter.locate(doc) {
                let pieces = adapter.extract_pieces(doc, board);
                debug!(
                    site = adapter.site().as_str(),
                    count = pieces.len(),
                    "piece positions detected"
                );
                return (Some(adapter.site()), pieces);
            }
        }
        debug!("chess board not found");
        (None, Vec::new())
    }

    /// Scans `doc` and computes threats for whatever was found.
    pub fn report(&self, doc: &dyn DocumentQuery) -> ScanReport {
        let (site, pieces) = self.scan_with_site(doc);
        let threats = compute_threats(&pieces);
        let fen = board_fen(&pieces);
        ScanReport {
            site,
            pieces,
            threats,
            fen,
        }
    }
}

impl Default for BoardScanner {
    fn default() -> Self {
        Self::new(&ScannerConfig::default())
    }
}
