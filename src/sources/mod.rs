use anyhow::Result;
use async_trait::async_trait;

pub mod capture_page_text;
pub mod fetch_page_text;

pub use capture_page_text::BrowserOcrSource;
pub use fetch_page_text::HtmlPageSource;

/// Turns a page URL into a single block of plain text.
#[async_trait]
pub trait TextSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn page_text(&self, url: &str) -> Result<String>;
}
