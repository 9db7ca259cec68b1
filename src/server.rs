//! Line-delimited JSON-RPC 2.0 front end for the tool registry.
//!
//! Each line read is one request or notification; each request produces one
//! response line. Notifications (no `id`) never produce output. Logging must
//! go to stderr so stdout stays a clean protocol stream.

use crate::core::config::ServerConfig;
use crate::prelude::Arc;
use crate::runtime::ToolDetailFetcher;
use crate::tools::{ToolContext, ToolOutput, ToolRegistry};
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const JSONRPC_VERSION: &str = "2.0";
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

#[derive(Debug, Deserialize)]
struct Request {
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Debug, Clone, PartialEq)]
struct RpcError {
    code: i64,
    message: String,
}

impl RpcError {
    fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<Error> for RpcError {
    fn from(error: Error) -> Self {
        let code = match &error {
            Error::InvalidArguments(_) | Error::UnknownTool(_) => INVALID_PARAMS,
            _ => INTERNAL_ERROR,
        };
        Self::new(code, error.to_string())
    }
}

fn success(id: Value, result: Value) -> Value {
    json!({ "jsonrpc": JSONRPC_VERSION, "id": id, "result": result })
}

fn failure(id: Value, error: RpcError) -> Value {
    json!({
        "jsonrpc": JSONRPC_VERSION,
        "id": id,
        "error": { "code": error.code, "message": error.message }
    })
}

fn call_result(output: ToolOutput) -> Value {
    let mut result = json!({
        "content": [{ "type": "text", "text": output.text }],
        "isError": false,
    });
    if let Some(structured) = output.structured_content {
        result["structuredContent"] = structured;
    }
    if let Some(widget) = output.widget {
        result["_meta"] = json!({ "widget": { "name": widget.name, "props": widget.props } });
    }
    result
}

/// One client connection: server identity, tools, and the session state
/// the tools share
pub struct McpServer {
    config: ServerConfig,
    registry: ToolRegistry,
    context: Arc<ToolContext>,
}

impl McpServer {
    pub fn new(config: ServerConfig, registry: ToolRegistry) -> Self {
        Self {
            config,
            registry,
            context: Arc::new(ToolContext::new()),
        }
    }

    pub fn with_builtin_tools(config: ServerConfig) -> Self {
        Self::new(config, ToolRegistry::with_builtin_tools())
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn context(&self) -> &Arc<ToolContext> {
        &self.context
    }

    /// Detail lookups for a viewer opened through this connection
    pub fn detail_fetcher(&self) -> ToolDetailFetcher {
        ToolDetailFetcher::new(self.registry.clone(), Arc::clone(&self.context))
    }

    /// Handle one raw protocol line
    pub async fn handle_line(&self, line: &str) -> Option<Value> {
        match serde_json::from_str::<Value>(line) {
            Ok(message) => self.handle(message).await,
            Err(e) => {
                log::warn!("unparseable message: {e}");
                Some(failure(Value::Null, RpcError::new(PARSE_ERROR, e.to_string())))
            }
        }
    }

    /// Handle one decoded message. Returns `None` for notifications.
    pub async fn handle(&self, message: Value) -> Option<Value> {
        let fallback_id = message.get("id").cloned().unwrap_or(Value::Null);
        let request: Request = match serde_json::from_value(message) {
            Ok(request) => request,
            Err(e) => {
                return Some(failure(
                    fallback_id,
                    RpcError::new(INVALID_REQUEST, e.to_string()),
                ))
            }
        };

        let Some(id) = request.id else {
            log::debug!("notification {}", request.method);
            return None;
        };

        Some(match self.dispatch(&request.method, request.params).await {
            Ok(result) => success(id, result),
            Err(error) => {
                log::warn!("{} failed: {}", request.method, error.message);
                failure(id, error)
            }
        })
    }

    async fn dispatch(&self, method: &str, params: Value) -> std::result::Result<Value, RpcError> {
        match method {
            "initialize" => Ok(self.initialize_result()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.registry.definitions() })),
            "tools/call" => {
                let params: CallParams = serde_json::from_value(params)
                    .map_err(|e| RpcError::new(INVALID_PARAMS, e.to_string()))?;
                let output = self
                    .registry
                    .call(&params.name, params.arguments, &self.context)
                    .await?;
                Ok(call_result(output))
            }
            other => Err(RpcError::new(
                METHOD_NOT_FOUND,
                format!("method not found: {other}"),
            )),
        }
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": { "listChanged": false } },
            "serverInfo": self.config,
        })
    }

    /// Serve requests from `reader` until end of input
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        log::info!(
            "{} {} serving {} tools",
            self.config.name,
            self.config.version,
            self.registry.len()
        );
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(&line).await {
                let mut bytes = serde_json::to_vec(&response)?;
                bytes.push(b'\n');
                writer.write_all(&bytes).await?;
                writer.flush().await?;
            }
        }
        log::info!("input closed, server stopping");
        Ok(())
    }
}
