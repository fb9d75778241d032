use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::info;

use square_watch_core::{compute_threats, PiecePosition, ScanReport, SnapshotDocument, SquareThreat};

use crate::AppState;

pub async fn threats(Json(pieces): Json<Vec<PiecePosition>>) -> Json<Vec<SquareThreat>> {
    Json(compute_threats(&pieces))
}

pub async fn scan(
    State(state): State<Arc<AppState>>,
    Json(document): Json<SnapshotDocument>,
) -> Json<ScanReport> {
    let report = state.scanner.report(&document);
    info!(
        site = report.site.map(|s| s.as_str()).unwrap_or("none"),
        pieces = report.pieces.len(),
        attacked = report.threats.len(),
        "scan complete"
    );
    Json(report)
}
