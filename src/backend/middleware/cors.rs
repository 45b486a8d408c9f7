/**
 * CORS Layer
 *
 * Cross-origin access for the browser frontend, configured from
 * `CORS_ALLOWED_ORIGINS`: `*` (or empty) allows any origin, otherwise a
 * comma-separated list of origins is allowed.
 */

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use crate::shared::AppConfig;

/// Build the CORS layer from configuration
///
/// ```bash
/// # Allow all origins (development)
/// export CORS_ALLOWED_ORIGINS="*"
///
/// # Allow specific origins (production)
/// export CORS_ALLOWED_ORIGINS="https://app.example.com,https://admin.example.com"
/// ```
pub fn setup_cors(config: &AppConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allow_origin(&config.cors_allowed_origins))
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT, header::ORIGIN])
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
}

fn allow_origin(allowed: &str) -> AllowOrigin {
    let allowed = allowed.trim();
    if allowed.is_empty() || allowed == "*" {
        return AllowOrigin::any();
    }

    let origins: Vec<HeaderValue> = allowed
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();

    if origins.is_empty() {
        tracing::warn!("No valid origins in CORS_ALLOWED_ORIGINS, allowing any origin");
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    }
}
