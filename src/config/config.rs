use std::path::Path;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::extractors::extract_prices::DEFAULT_CURRENCY_SYMBOL;

pub const DEFAULT_SETTINGS_FILE: &str = "Settings.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub base: BaseConfig,
    pub server: ServerConfig,
    pub search: SearchConfig,
    pub http: HttpConfig,
    pub browser: BrowserConfig,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BaseConfig {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Which text source answers `/api/prices`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSourceKind {
    Ocr,
    Html,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Results page URL, `{search}` is replaced by the encoded search term.
    pub url_template: String,
    pub currency_symbol: String,
    pub default_source: TextSourceKind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrowserConfig {
    #[serde(default)]
    pub chromium_path: Option<String>,
    pub navigation_timeout_ms: u64,
    pub cookie_selector: String,
    pub cookie_timeout_ms: u64,
    pub scroll_distance: u32,
    pub scroll_interval_ms: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    pub tesseract_path: String,
    pub language: String,
}

pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(DEFAULT_SETTINGS_FILE)
}

// Defaults first, then the settings file (optional), then APP_* environment variables
pub fn load_config_from(file_path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let file_path = file_path.as_ref().to_string_lossy().into_owned();

    let settings = Config::builder()
        .set_default("base.name", env!("CARGO_PKG_NAME"))?
        .set_default("base.version", env!("CARGO_PKG_VERSION"))?
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 3000)?
        .set_default(
            "search.url_template",
            "https://www.takealot.com/all?qsearch={search}",
        )?
        .set_default("search.currency_symbol", DEFAULT_CURRENCY_SYMBOL)?
        .set_default("search.default_source", "ocr")?
        .set_default("http.user_agent", "Mozilla/5.0")?
        .set_default("http.timeout_secs", 10)?
        .set_default("browser.navigation_timeout_ms", 60000)?
        .set_default("browser.cookie_selector", r#"button[class*="cookie"]"#)?
        .set_default("browser.cookie_timeout_ms", 3000)?
        .set_default("browser.scroll_distance", 400)?
        .set_default("browser.scroll_interval_ms", 200)?
        .set_default("ocr.tesseract_path", "tesseract")?
        .set_default("ocr.language", "eng")?
        .add_source(File::new(&file_path, FileFormat::Toml).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<AppConfig>()
}
