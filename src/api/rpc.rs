//! Legacy JSON-RPC surface at `/v1/rpc`, served from the tool registry.
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value as J};

use crate::core::error::ToolError;
use crate::core::mcp::{initialize_result, RpcReq, RpcResp};
use crate::infra::http::json as http_json;
use crate::tools::registry::ToolRegistry;

fn tools_list(reg: &ToolRegistry) -> J {
    let tools: Vec<J> = reg
        .list()
        .into_iter()
        .map(|t| json!({ "name": t.name, "description": t.description, "inputSchema": t.input_schema }))
        .collect();
    json!({ "tools": tools })
}

async fn call_tool(reg: &ToolRegistry, params: &J) -> Result<J, ToolError> {
    let name = params
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ToolError::InvalidArguments("missing tool name".into()))?;
    let args = params.get("arguments").unwrap_or(&J::Null);
    let text = reg.call(name, args).await?;
    Ok(json!({ "content": [{ "type": "text", "text": text }] }))
}

pub async fn http(
    State(reg): State<ToolRegistry>,
    body: Result<Json<RpcReq>, JsonRejection>,
) -> Json<RpcResp> {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejecting malformed JSON-RPC body");
            return http_json::parse_error(format!("parse error: {rejection}"));
        }
    };
    tracing::debug!(method = %req.method, id = ?req.id, "HTTP handler invoked");
    let id = req.id.clone();
    let resp = match req.method.as_str() {
        "initialize" => http_json::ok(id, initialize_result()),
        "shutdown" => http_json::ok(id, J::Null),
        "tools.list" | "tools/list" => http_json::ok(id, tools_list(&reg)),
        "tools.call" | "tools/call" => match call_tool(&reg, &req.params).await {
            Ok(out) => http_json::ok(id, out),
            Err(e) => {
                tracing::warn!(error = %e, "tools.call error response");
                http_json::from_tool_error(id, e)
            }
        },
        _ => http_json::error(
            id,
            http_json::METHOD_NOT_FOUND,
            format!("unknown method: {}", req.method),
        ),
    };
    tracing::trace!(response = ?resp.0, "HTTP handler completed");
    resp
}
