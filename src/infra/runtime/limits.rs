use std::time::Duration;

use crate::core::error::GatewayError;
use crate::infra::config::UpstreamConfig;

const MAX_REDIRECTS: usize = 10;

/// Build the shared reqwest client: one per-request timeout, redirects followed.
/// No retry layer: each tool call sends each request once.
pub fn make_http_client(cfg: &UpstreamConfig) -> Result<reqwest::Client, GatewayError> {
    make_http_client_with_timeout(Duration::from_secs(cfg.timeout_secs))
}

pub fn make_http_client_with_timeout(timeout: Duration) -> Result<reqwest::Client, GatewayError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .map_err(|e| GatewayError::Message(format!("reqwest client: {e}")))
}
