//! Build-time configuration of the storefront.
//!
//! Values come from the environment of the `trunk`/`cargo` invocation, the
//! same way the backend URL is baked into any static WASM bundle.

use once_cell::sync::Lazy;

/// Default interval of the offers carousel
pub const CAROUSEL_INTERVAL_MS: u32 = 3500;
/// How often the active-offer window is re-evaluated
pub const OFFER_CLOCK_MS: u32 = 30_000;
/// Timeout applied to every backend request
pub const REQUEST_TIMEOUT_MS: u32 = 10_000;
/// Page size of the public catalog
pub const CATALOG_PAGE_SIZE: usize = 20;
/// Page size of the admin stock table
pub const STOCK_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend base URL without trailing slash; `None` means "same host"
    pub api_url: Option<String>,
    /// Phone number used in wa.me links, digits only
    pub whatsapp_phone: String,
    pub log_level: log::Level,
}

impl AppConfig {
    fn from_env() -> Self {
        let api_url = option_env!("ASTRAFARMA_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());
        let whatsapp_phone = option_env!("ASTRAFARMA_WHATSAPP_PHONE")
            .unwrap_or_default()
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        let log_level = option_env!("ASTRAFARMA_LOG_LEVEL")
            .and_then(|v| v.parse().ok())
            .unwrap_or(log::Level::Debug);
        Self {
            api_url,
            whatsapp_phone,
            log_level,
        }
    }
}

static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
