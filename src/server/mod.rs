pub mod get_prices;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::config::TextSourceKind;
use crate::extractors::extract_prices::PriceExtractor;
use crate::sources::TextSource;

/// Read-only state shared by the handlers.
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<PriceExtractor>,
    pub url_template: Arc<str>,
    pub default_source: TextSourceKind,
    pub ocr: Arc<dyn TextSource>,
    pub html: Arc<dyn TextSource>,
}

impl AppState {
    pub fn source(&self, kind: TextSourceKind) -> Arc<dyn TextSource> {
        match kind {
            TextSourceKind::Ocr => Arc::clone(&self.ocr),
            TextSourceKind::Html => Arc::clone(&self.html),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(get_prices::index_handler))
        .route("/api/prices", get(get_prices::get_prices_handler))
        .route("/api/prices/ocr", get(get_prices::get_ocr_prices_handler))
        .route("/api/prices/html", get(get_prices::get_html_prices_handler))
        .layer(cors)
        .with_state(state)
}
