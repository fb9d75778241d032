use axum::{
    routing::{get, post},
    Router,
};
use std::env;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

use square_watch_core::{BoardScanner, ScannerConfig};

mod overlay;
mod routes;

use overlay::OverlayStyle;

pub struct AppState {
    pub scanner: BoardScanner,
    pub overlay: OverlayStyle,
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route("/api/threats", post(routes::api::threats))
        .route("/api/scan", post(routes::api::scan))
        .nest_service("/static", ServeDir::new("crates/web/static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match env::var("SQUARE_WATCH_CONFIG") {
        Ok(path) => {
            info!(%path, "loading scanner config");
            ScannerConfig::load(&path).expect("Failed to load scanner config")
        }
        Err(_) => ScannerConfig::default(),
    };

    let state = Arc::new(AppState {
        scanner: BoardScanner::new(&config),
        overlay: OverlayStyle::default(),
    });

    let addr = env::var("SQUARE_WATCH_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listener");

    info!("Server running at http://{}", addr);

    axum::serve(listener, app(state)).await.expect("Server error");
}
