use thiserror::Error;

/// Tagged failure of a single upstream HTTP call.
///
/// Every client call resolves to `Result<T, UpstreamError>`, so tool handlers
/// have one failure branch and can still see what went wrong.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("upstream status {status}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed response: {0}")]
    Parse(String),
}

impl UpstreamError {
    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Timeout(_) => "timeout",
            UpstreamError::Network(_) => "network",
            UpstreamError::Status { .. } => "status",
            UpstreamError::Parse(_) => "parse",
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout(e.to_string())
        } else if e.is_decode() {
            UpstreamError::Parse(e.to_string())
        } else {
            UpstreamError::Network(e.to_string())
        }
    }
}

/// Errors raised by the tool registry before a handler runs.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}

/// Gateway-wide error model for startup and configuration.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("config: {0}")]
    Config(String),
    #[error("{0}")]
    Message(String),
}

impl From<anyhow::Error> for GatewayError {
    fn from(e: anyhow::Error) -> Self {
        GatewayError::Message(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_displays_message() {
        let e = GatewayError::Message("boom".into());
        assert_eq!(e.to_string(), "boom");
    }

    #[test]
    fn it_converts_from_anyhow() {
        let any: anyhow::Error = anyhow::anyhow!("nope");
        let gw: GatewayError = any.into();
        assert_eq!(gw.to_string(), "nope");
    }

    #[test]
    fn status_error_hides_body_in_display() {
        let e = UpstreamError::Status {
            status: reqwest::StatusCode::NOT_FOUND,
            body: "{\"detail\":\"missing\"}".into(),
        };
        assert_eq!(e.to_string(), "upstream status 404 Not Found");
        assert_eq!(e.kind(), "status");
    }

    #[test]
    fn tool_error_names_the_tool() {
        let e = ToolError::UnknownTool("get_tides".into());
        assert_eq!(e.to_string(), "unknown tool: get_tides");
    }
}
