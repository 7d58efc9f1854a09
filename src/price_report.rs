use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::extractors::extract_prices::PriceExtractor;
use crate::statistics::calculate_price_stats::{calculate_price_stats, PriceStats};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceReport {
    pub search_term: String,
    pub timestamp: String,
    pub results: PriceResults,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResults {
    pub total_prices_found: usize,
    pub prices: Vec<f64>,
    pub stats: PriceStats,
}

// Extract prices from page text and summarise them
pub fn build_price_report(extractor: &PriceExtractor, search_term: &str, page_text: &str) -> PriceReport {
    let prices = extractor.extract(page_text);
    let stats = calculate_price_stats(&prices);

    PriceReport {
        search_term: search_term.to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        results: PriceResults {
            total_prices_found: prices.len(),
            prices,
            stats,
        },
    }
}
