//! The one place an outbound request is sent and its outcome classified.

use std::time::Instant;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::core::error::UpstreamError;
use crate::infra::logging::log_metric;

/// Send `builder` and decode a 2xx JSON body into `T`.
///
/// Transport failures, timeouts, non-2xx statuses and undecodable bodies all
/// come back as a tagged `UpstreamError`; for statuses the body text is kept.
pub async fn fetch_json<T: DeserializeOwned>(
    tool: &str,
    builder: RequestBuilder,
) -> Result<T, UpstreamError> {
    let text = send(tool, builder).await?;
    serde_json::from_str::<T>(&text).map_err(|e| {
        log_metric(tool, "upstream_error_total", 1.0);
        tracing::warn!(tool, error = %e, "upstream body did not decode");
        UpstreamError::Parse(e.to_string())
    })
}

/// Send `builder` and only check for a 2xx status. The body is discarded.
pub async fn expect_success(tool: &str, builder: RequestBuilder) -> Result<(), UpstreamError> {
    send(tool, builder).await.map(|_| ())
}

async fn send(tool: &str, builder: RequestBuilder) -> Result<String, UpstreamError> {
    let start = Instant::now();
    let res: Result<String, UpstreamError> = async {
        let resp = builder.send().await?;
        let status = resp.status();
        tracing::debug!(tool, url = %resp.url(), %status, "upstream response");
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status, body });
        }
        Ok(resp.text().await?)
    }
    .await;
    match &res {
        Ok(_) => {
            let elapsed_ms = start.elapsed().as_millis() as f64;
            log_metric(tool, "upstream_latency_ms", elapsed_ms);
        }
        Err(e) => {
            log_metric(tool, "upstream_error_total", 1.0);
            tracing::warn!(tool, kind = e.kind(), error = %e, "upstream request failed");
        }
    }
    res
}
