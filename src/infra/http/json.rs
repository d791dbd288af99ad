use axum::Json;

use crate::core::error::ToolError;
use crate::core::mcp::{err as rpc_err, ok as rpc_ok, RpcErr, RpcResp};

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const APPLICATION_ERROR: i32 = -32000;

pub fn ok(id: serde_json::Value, result: serde_json::Value) -> Json<RpcResp> {
    Json(rpc_ok(id, result))
}

pub fn error(id: serde_json::Value, code: i32, message: impl Into<String>) -> Json<RpcResp> {
    Json(rpc_err(id, code, message, None))
}

pub fn parse_error(message: impl Into<String>) -> Json<RpcResp> {
    Json(RpcResp {
        jsonrpc: "2.0",
        id: serde_json::Value::Null,
        result: None,
        error: Some(RpcErr {
            code: PARSE_ERROR,
            message: message.into(),
            data: None,
        }),
    })
}

/// Map a registry-level ToolError into a JSON-RPC error response.
pub fn from_tool_error(id: serde_json::Value, err: ToolError) -> Json<RpcResp> {
    let code = match err {
        ToolError::InvalidArguments(_) => INVALID_PARAMS,
        ToolError::UnknownTool(_) => APPLICATION_ERROR,
    };
    error(id, code, err.to_string())
}
