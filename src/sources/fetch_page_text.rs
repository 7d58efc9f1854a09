use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::config::HttpConfig;
use crate::extractors::extract_visible_text::extract_visible_text;
use crate::sources::TextSource;

/// Plain HTTP GET of the page, text taken straight from the HTML.
pub struct HtmlPageSource {
    client: Client,
}

impl HtmlPageSource {
    pub fn new(http: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&http.user_agent)
            .timeout(Duration::from_secs(http.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl TextSource for HtmlPageSource {
    fn name(&self) -> &'static str {
        "html"
    }

    async fn page_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request to search page")?
            .error_for_status()
            .context("Search page returned an error status")?;

        let body = response
            .text()
            .await
            .context("Failed to read search page body")?;

        debug!(bytes = body.len(), "Fetched search page");

        Ok(extract_visible_text(&body))
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn http_config() -> HttpConfig {
        HttpConfig {
            user_agent: "Mozilla/5.0".to_string(),
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn returns_visible_text_of_the_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/all"))
            .and(query_param("qsearch", "kettle"))
            .and(header("user-agent", "Mozilla/5.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<html><body><script>R 1</script><li>Kettle R 349</li><li>R 1,099.00</li></body></html>",
            ))
            .mount(&server)
            .await;

        let source = HtmlPageSource::new(&http_config()).unwrap();
        let text = source
            .page_text(&format!("{}/all?qsearch=kettle", server.uri()))
            .await
            .unwrap();

        assert_eq!(text, "Kettle R 349 R 1,099.00");
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let source = HtmlPageSource::new(&http_config()).unwrap();
        let err = source.page_text(&server.uri()).await.unwrap_err();

        assert!(err.to_string().contains("error status"));
    }
}
