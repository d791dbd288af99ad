use axum::Router;
use http_body_util::BodyExt; // for .collect
use hyper::{header, Request, StatusCode};
use serde_json::{json, Value};
use tokio::time::{timeout, Duration};
use tower::ServiceExt; // for .oneshot

use weather_hospital_gateway::infra::config::UpstreamConfig;
use weather_hospital_gateway::infra::http_app::build_app;
use weather_hospital_gateway::tools::Toolset;

static MCP_PROTOCOL_VERSION: &str = "2025-03-26";

fn app_against(base: &str) -> Router {
    let cfg = UpstreamConfig {
        weather_base_url: base.into(),
        hospital_base_url: base.into(),
        ..UpstreamConfig::default()
    };
    build_app(Toolset::from_config(&cfg).unwrap(), true)
}

fn mcp_post(body: &Value, session_id: Option<&str>) -> Request<axum::body::Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header(header::ACCEPT, "application/json, text/event-stream")
        .header(header::CONTENT_TYPE, "application/json")
        .header("MCP-Protocol-Version", MCP_PROTOCOL_VERSION);
    if let Some(id) = session_id {
        builder = builder.header("MCP-Session-Id", id);
    }
    builder.body(axum::body::Body::from(body.to_string())).unwrap()
}

async fn first_sse_message(res: hyper::Response<axum::body::Body>) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let s = String::from_utf8_lossy(&bytes);
    s.lines()
        .find_map(|line| line.strip_prefix("data: ").map(|d| d.to_string()))
        .and_then(|d| serde_json::from_str::<Value>(&d).ok())
        .expect("no JSON-RPC message in SSE body")
}

async fn open_session(app: &Router) -> String {
    let init = json!({
        "jsonrpc":"2.0","id":1,"method":"initialize",
        "params":{ "protocolVersion":MCP_PROTOCOL_VERSION,"capabilities":{},"clientInfo":{"name":"test","version":"0.1"} }
    });
    let init_res = app.clone().oneshot(mcp_post(&init, None)).await.unwrap();
    assert!(init_res.status().is_success());
    let session_id = init_res
        .headers()
        .get("MCP-Session-Id")
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();

    let initialized = json!({"jsonrpc":"2.0","method":"notifications/initialized","params":{}});
    let res = app
        .clone()
        .oneshot(mcp_post(&initialized, Some(&session_id)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::ACCEPTED);
    session_id
}

#[tokio::test]
async fn initialize_list_and_call_over_streamable_http() {
    let server = httpmock::MockServer::start();
    server.mock(|when, then| {
        when.method(httpmock::Method::GET).path("/alerts/active/area/CA");
        then.status(200).json_body(json!({"features": []}));
    });

    let app = app_against(&server.base_url());
    let session_id = open_session(&app).await;

    let list = json!({"jsonrpc":"2.0","id":2,"method":"tools/list","params":{}});
    let list_res = timeout(
        Duration::from_secs(20),
        app.clone().oneshot(mcp_post(&list, Some(&session_id))),
    )
    .await
    .unwrap()
    .unwrap();
    assert!(list_res.status().is_success());
    let listed = first_sse_message(list_res).await;
    let mut names: Vec<String> = listed["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "book_appointment",
            "cancel_appointment",
            "check_availability",
            "get_alerts",
            "get_appointments",
            "get_doctors",
            "get_forecast",
            "reschedule_appointment",
        ]
    );

    let call = json!({
        "jsonrpc":"2.0","id":3,"method":"tools/call",
        "params": {"name":"get_alerts","arguments":{"state":"CA"}}
    });
    let call_res = app
        .clone()
        .oneshot(mcp_post(&call, Some(&session_id)))
        .await
        .unwrap();
    assert!(call_res.status().is_success());
    let v = first_sse_message(call_res).await;
    assert_eq!(v["result"]["content"][0]["text"], "No active alerts for this state.");
}

#[tokio::test]
async fn upstream_failure_is_text_not_protocol_error() {
    // Nothing listens on port 9.
    let app = app_against("http://127.0.0.1:9");
    let session_id = open_session(&app).await;

    let call = json!({
        "jsonrpc":"2.0","id":7,"method":"tools/call",
        "params": {"name":"get_forecast","arguments":{"latitude":37.77,"longitude":-122.42}}
    });
    let res = app
        .clone()
        .oneshot(mcp_post(&call, Some(&session_id)))
        .await
        .unwrap();
    let v = first_sse_message(res).await;
    assert!(v.get("error").is_none());
    assert_eq!(
        v["result"]["content"][0]["text"],
        "Unable to fetch forecast data for this location."
    );
}

#[tokio::test]
async fn healthz_is_served_alongside_mcp() {
    let app = app_against("http://127.0.0.1:9");
    let res = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
