use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::{error, info};

use crate::config::TextSourceKind;
use crate::error::ApiError;
use crate::price_report::{build_price_report, PriceReport};
use crate::server::AppState;
use crate::utilities::build_search_url::build_search_url;

#[derive(Debug, Deserialize)]
pub struct PricesQuery {
    pub search: Option<String>,
}

pub async fn index_handler() -> &'static str {
    "Price statistics API is running."
}

/// GET /api/prices?search=kettle - uses the configured default source
pub async fn get_prices_handler(
    State(state): State<AppState>,
    Query(query): Query<PricesQuery>,
) -> Result<Json<PriceReport>, ApiError> {
    let kind = state.default_source;
    get_prices(state, kind, query).await
}

/// GET /api/prices/ocr?search=kettle
pub async fn get_ocr_prices_handler(
    State(state): State<AppState>,
    Query(query): Query<PricesQuery>,
) -> Result<Json<PriceReport>, ApiError> {
    get_prices(state, TextSourceKind::Ocr, query).await
}

/// GET /api/prices/html?search=kettle
pub async fn get_html_prices_handler(
    State(state): State<AppState>,
    Query(query): Query<PricesQuery>,
) -> Result<Json<PriceReport>, ApiError> {
    get_prices(state, TextSourceKind::Html, query).await
}

async fn get_prices(
    state: AppState,
    kind: TextSourceKind,
    query: PricesQuery,
) -> Result<Json<PriceReport>, ApiError> {
    let search_term = query
        .search
        .filter(|term| !term.is_empty())
        .ok_or(ApiError::MissingSearchTerm)?;

    let source = state.source(kind);
    let url = build_search_url(&state.url_template, &search_term);
    info!(search = %search_term, source = source.name(), %url, "Fetching search page");

    let page_text = source.page_text(&url).await.map_err(|e| {
        error!(search = %search_term, source = source.name(), "Error: {e:#}");
        ApiError::Source(e)
    })?;

    let report = build_price_report(&state.extractor, &search_term, &page_text);
    info!(
        search = %search_term,
        prices = report.results.total_prices_found,
        average = report.results.stats.average,
        "Prices extracted"
    );

    Ok(Json(report))
}
