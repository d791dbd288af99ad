pub fn init() {
    // Initialize tracing subscriber once, honoring RUST_LOG if set.
    // Default to info level; allow override via RUST_LOG (e.g., "debug").
    // Logs go to stderr: in stdio mode stdout carries MCP frames.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Record a metric through the `metrics` facade and mirror it as a log line.
/// Without an installed recorder the facade call is a no-op.
pub fn log_metric(tool: &str, metric: &str, value: f64) {
    match metric {
        "upstream_error_total" => {
            metrics::counter!("upstream_error_total", "tool" => tool.to_string()).increment(1)
        }
        _ => metrics::histogram!(metric.to_string(), "tool" => tool.to_string()).record(value),
    }
    tracing::info!(tool = tool, metric = metric, value = value, "metric");
}
