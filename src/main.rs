use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crate::extractors::extract_prices::PriceExtractor;
use crate::server::AppState;
use crate::sources::{BrowserOcrSource, HtmlPageSource};

// Import modules
mod config;
mod error;
mod extractors;
mod price_report;
mod server;
mod sources;
mod statistics;
mod utilities;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // Load configuration settings
    let config = match config::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{} {}", "Failed to load configuration:".red(), e);
            return Err(e.into());
        }
    };

    println!(
        "{}",
        format!("{} v{}", config.base.name, config.base.version).green()
    );

    let extractor = PriceExtractor::for_symbol(&config.search.currency_symbol)
        .context("Failed to compile price pattern")?;

    let state = AppState {
        extractor: Arc::new(extractor),
        url_template: Arc::from(config.search.url_template.as_str()),
        default_source: config.search.default_source,
        ocr: Arc::new(BrowserOcrSource::new(
            config.browser.clone(),
            config.ocr.clone(),
        )),
        html: Arc::new(HtmlPageSource::new(&config.http)?),
    };

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server host or port")?;

    println!("{} GET /api/prices?search=<term> ({:?})", "Route:".blue(), config.search.default_source);
    println!("{} GET /api/prices/ocr?search=<term>", "Route:".blue());
    println!("{} GET /api/prices/html?search=<term>", "Route:".blue());
    tracing::info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, server::router(state)).await?;

    Ok(())
}
