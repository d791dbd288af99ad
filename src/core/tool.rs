use std::{future::Future, pin::Pin, sync::Arc};

use async_trait::async_trait;
use rmcp::schemars::{self, JsonSchema};
use serde::de::DeserializeOwned;

use crate::core::error::ToolError;

/// Minimal metadata every tool must expose.
pub trait ToolSpec {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn input_schema(&self) -> serde_json::Value;
}

/// Metadata plus a text-producing call.
///
/// Upstream failures never surface as `Err`: handlers render them as text.
/// `Err` is reserved for arguments that do not match the input schema.
#[async_trait]
pub trait Tool: ToolSpec + Send + Sync {
    async fn call(&self, arguments: &serde_json::Value) -> Result<String, ToolError>;
}

type TextFuture = Pin<Box<dyn Future<Output = Result<String, ToolError>> + Send>>;

/// A tool backed by a boxed async fn over a typed parameter struct.
/// The input schema is derived from the parameter type.
pub struct FnTool {
    name: &'static str,
    description: &'static str,
    input_schema: serde_json::Value,
    inner: Arc<dyn Fn(serde_json::Value) -> TextFuture + Send + Sync>,
}

impl FnTool {
    pub fn typed<P, F, Fut>(name: &'static str, description: &'static str, f: F) -> Self
    where
        P: DeserializeOwned + JsonSchema + Send + 'static,
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = String> + Send + 'static,
    {
        let input_schema = serde_json::to_value(schemars::schema_for!(P))
            .unwrap_or_else(|_| serde_json::json!({ "type": "object" }));
        Self {
            name,
            description,
            input_schema,
            inner: Arc::new(move |args: serde_json::Value| -> TextFuture {
                // Tools without parameters are called with no arguments at all.
                let args = if args.is_null() {
                    serde_json::Value::Object(Default::default())
                } else {
                    args
                };
                match serde_json::from_value::<P>(args) {
                    Ok(params) => {
                        let fut = f(params);
                        Box::pin(async move { Ok(fut.await) })
                    }
                    Err(e) => {
                        let err = ToolError::InvalidArguments(e.to_string());
                        Box::pin(async move { Err(err) })
                    }
                }
            }),
        }
    }
}

impl ToolSpec for FnTool {
    fn name(&self) -> &'static str {
        self.name
    }
    fn description(&self) -> &'static str {
        self.description
    }
    fn input_schema(&self) -> serde_json::Value {
        self.input_schema.clone()
    }
}

#[async_trait]
impl Tool for FnTool {
    async fn call(&self, arguments: &serde_json::Value) -> Result<String, ToolError> {
        (self.inner)(arguments.clone()).await
    }
}
