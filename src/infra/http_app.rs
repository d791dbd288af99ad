use axum::{
    routing::{any_service, get, post},
    Router,
};
use std::sync::Arc;

use crate::infra::runtime::mcp_transport::{make_streamable_http_service, LocalSessionManager};
use crate::tools::mcp_router::make_factory;
use crate::tools::registry::{build_registry, ToolRegistry};
use crate::tools::Toolset;

/// Default app: `/healthz` + streamable MCP at `/mcp`.
pub fn build_app_default(tools: Toolset) -> Router {
    let session_mgr = Arc::new(LocalSessionManager::default());
    let mcp_service = make_streamable_http_service(make_factory(tools), session_mgr);

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route_service("/mcp", any_service(mcp_service))
}

/// Default app **plus** the legacy JSON-RPC route at `/v1/rpc`.
pub fn build_app_with_deprecated_api(tools: Toolset, registry: ToolRegistry) -> Router {
    let rpc = Router::new()
        .route("/v1/rpc", post(crate::api::rpc::http))
        .with_state(registry);
    build_app_default(tools).merge(rpc)
}

/// Pick the app shape from the `DEPRECATE_REST` toggle.
pub fn build_app(tools: Toolset, deprecate_rest: bool) -> Router {
    if deprecate_rest {
        build_app_default(tools)
    } else {
        let registry = build_registry(&tools);
        build_app_with_deprecated_api(tools, registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::config::UpstreamConfig;
    use axum::body::{to_bytes, Body};
    use hyper::{Request, StatusCode};
    use tower::ServiceExt;

    fn offline_toolset() -> Toolset {
        let cfg = UpstreamConfig {
            weather_base_url: "http://127.0.0.1:9".into(),
            hospital_base_url: "http://127.0.0.1:9".into(),
            ..UpstreamConfig::default()
        };
        Toolset::from_config(&cfg).unwrap()
    }

    #[tokio::test]
    async fn healthz_returns_ok() {
        let app = build_app(offline_toolset(), false);
        let req = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn deprecating_rest_removes_rpc_route() {
        let app = build_app(offline_toolset(), true);
        let req = Request::builder()
            .method("POST")
            .uri("/v1/rpc")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
