use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::config::{BrowserConfig, OcrConfig};
use crate::sources::TextSource;
use crate::utilities::recognize_text::recognize_text;

/// Renders the page in headless Chromium, screenshots it and reads the text back with OCR.
///
/// A browser is launched for every call and closed before returning, so nothing is
/// shared between requests.
pub struct BrowserOcrSource {
    browser: BrowserConfig,
    ocr: OcrConfig,
}

impl BrowserOcrSource {
    pub fn new(browser: BrowserConfig, ocr: OcrConfig) -> Self {
        Self { browser, ocr }
    }

    async fn capture_screenshot(&self, url: &str) -> Result<Vec<u8>> {
        let mut builder = chromiumoxide::BrowserConfig::builder()
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .request_timeout(request_timeout(&self.browser));
        if let Some(path) = &self.browser.chromium_path {
            builder = builder.chrome_executable(path);
        }
        let config = builder
            .build()
            .map_err(|e| anyhow!("Failed to build browser config: {e}"))?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .context("Failed to launch Chromium")?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let screenshot = self.screenshot_page(&browser, url).await;

        if let Err(e) = browser.close().await {
            warn!(error = %e, "Failed to close Chromium");
        }
        if let Err(e) = browser.wait().await {
            warn!(error = %e, "Failed to wait for Chromium to exit");
        }
        handler_task.abort();

        screenshot
    }

    async fn screenshot_page(&self, browser: &Browser, url: &str) -> Result<Vec<u8>> {
        let page = browser
            .new_page("about:blank")
            .await
            .context("Failed to open browser tab")?;

        let navigation_timeout = self.browser.navigation_timeout_ms;
        timeout(Duration::from_millis(navigation_timeout), page.goto(url))
            .await
            .map_err(|_| anyhow!("Navigation timed out after {navigation_timeout}ms"))?
            .context("Failed to load search page")?;

        self.accept_cookies(&page).await;

        let script = auto_scroll_script(self.browser.scroll_distance, self.browser.scroll_interval_ms);
        page.evaluate_function(script.as_str())
            .await
            .context("Failed to scroll search page")?;

        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(true)
            .build();

        page.screenshot(params)
            .await
            .context("Failed to capture screenshot")
    }

    // The banner is optional, any failure here is ignored
    async fn accept_cookies(&self, page: &Page) {
        let click = async {
            let button = page.find_element(self.browser.cookie_selector.as_str()).await?;
            button.click().await?;
            Ok::<_, chromiumoxide::error::CdpError>(())
        };

        match timeout(Duration::from_millis(self.browser.cookie_timeout_ms), click).await {
            Ok(Ok(())) => debug!("Accepted cookie banner"),
            Ok(Err(e)) => debug!(error = %e, "No cookie banner to accept"),
            Err(_) => debug!("Cookie banner click timed out"),
        }
    }
}

#[async_trait]
impl TextSource for BrowserOcrSource {
    fn name(&self) -> &'static str {
        "ocr"
    }

    async fn page_text(&self, url: &str) -> Result<String> {
        let screenshot = self.capture_screenshot(url).await?;
        debug!(bytes = screenshot.len(), "Captured full page screenshot");

        recognize_text(&self.ocr, &screenshot).await
    }
}

/// Per-command limit inside chromiumoxide. It bounds navigation and the scroll
/// script, so it follows the configured navigation timeout instead of the 30 s default.
fn request_timeout(browser: &BrowserConfig) -> Duration {
    Duration::from_millis(browser.navigation_timeout_ms)
}

/// Scrolls by `distance` pixels every `interval_ms` until the bottom is reached,
/// so lazily loaded results are rendered before the screenshot.
fn auto_scroll_script(distance: u32, interval_ms: u32) -> String {
    format!(
        r#"async () => {{
    await new Promise(resolve => {{
        let totalHeight = 0;
        const distance = {distance};
        const timer = setInterval(() => {{
            window.scrollBy(0, distance);
            totalHeight += distance;
            if (totalHeight >= document.body.scrollHeight - window.innerHeight) {{
                clearInterval(timer);
                resolve();
            }}
        }}, {interval_ms});
    }});
}}"#
    )
}
