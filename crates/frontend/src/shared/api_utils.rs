//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use super::config::config;

/// Get the base URL for API requests
///
/// Uses `ASTRAFARMA_API_URL` when it was set at build time, otherwise
/// constructs the URL from the current window location with port 8080,
/// where the backend listens in development.
///
/// # Returns
/// - API base URL like "http://localhost:8080" or "https://api.astrafarma.com"
/// - Empty string if window is not available
pub fn api_base() -> String {
    if let Some(url) = &config().api_url {
        return url.clone();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:8080", protocol, hostname)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/products/123");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
