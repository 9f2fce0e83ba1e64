//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using the configured port for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base(port: u16) -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, port)
}

/// Join a base URL, an API path and an optional query string
///
/// # Example
/// ```
/// use erp_frontend::shared::api_utils::build_url;
///
/// let url = build_url("http://localhost:3000", "/api/products", "page=1");
/// assert_eq!(url, "http://localhost:3000/api/products?page=1");
/// ```
pub fn build_url(base: &str, path: &str, query: &str) -> String {
    if query.is_empty() {
        format!("{}{}", base, path)
    } else {
        format!("{}{}?{}", base, path, query)
    }
}
