//! MCP transports (stdio + Streamable HTTP) over any handler/router pair.

use std::sync::Arc;

use rmcp::handler::server::router::Router;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::serve_server;
use rmcp::transport::streamable_http_server::tower::{StreamableHttpServerConfig, StreamableHttpService};

pub use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
pub use rmcp::ServerHandler;

pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Serve one MCP session over stdin/stdout until the client disconnects.
pub async fn serve_stdio<H>(factory: impl FnOnce() -> (H, ToolRouter<H>)) -> Result<(), TransportError>
where
    H: ServerHandler,
{
    let (handler, tools) = factory();
    tracing::info!(tools = tools.list_all().len(), "mode=stdio");
    let service = Router::new(handler).with_tools(tools);
    let running = serve_server(service, (tokio::io::stdin(), tokio::io::stdout())).await?;
    let reason = running.waiting().await?;
    tracing::info!(?reason, "stdio session closed");
    Ok(())
}

/// Tower service for `/mcp`. Every new session calls `factory`.
pub fn make_streamable_http_service<H>(
    factory: impl Fn() -> (H, ToolRouter<H>) + Send + Sync + Clone + 'static,
    session_mgr: Arc<LocalSessionManager>,
) -> StreamableHttpService<Router<H>, LocalSessionManager>
where
    H: ServerHandler,
{
    let service_factory = move || {
        let (handler, tools) = factory();
        tracing::debug!("new MCP session");
        Ok(Router::new(handler).with_tools(tools))
    };
    StreamableHttpService::new(service_factory, session_mgr, StreamableHttpServerConfig::default())
}
