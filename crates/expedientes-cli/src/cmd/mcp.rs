use crate::tools::{self, CaseTool, ToolContext};
use expedientes_core::{config::TimelinePolicy, store::RecordStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{BufRead, Write};
use std::path::Path;

// ---------------------------------------------------------------------------
// JSON-RPC 2.0 protocol types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<Value>,
    pub method: String,
    pub params: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ToolContent {
    r#type: &'static str,
    text: String,
}

#[derive(Debug, Serialize)]
struct ToolCallResult {
    content: Vec<ToolContent>,
    #[serde(rename = "isError")]
    is_error: bool,
}

impl JsonRpcResponse {
    fn ok(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn err(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Server loop
// ---------------------------------------------------------------------------

pub fn run(config_path: Option<&Path>) -> anyhow::Result<()> {
    let (config, store) = super::open_store(config_path)?;
    let tools = tools::all_tools();
    tracing::info!(url = %config.store.url, tools = tools.len(), "mcp server ready");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let raw: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                write_response(&stdout, &JsonRpcResponse::err(None, -32700, format!("parse error: {e}")))?;
                continue;
            }
        };

        // Notifications have no "id" key and get no response
        if !raw
            .as_object()
            .map(|o| o.contains_key("id"))
            .unwrap_or(false)
        {
            continue;
        }

        let request: JsonRpcRequest = match serde_json::from_value(raw) {
            Ok(r) => r,
            Err(e) => {
                write_response(&stdout, &JsonRpcResponse::err(None, -32600, format!("invalid request: {e}")))?;
                continue;
            }
        };

        let response = handle_request(&request, &tools, &store, &config.timeline);
        write_response(&stdout, &response)?;
    }

    Ok(())
}

fn write_response(stdout: &std::io::Stdout, resp: &JsonRpcResponse) -> anyhow::Result<()> {
    let mut out = stdout.lock();
    serde_json::to_writer(&mut out, resp)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Request dispatch (pub for unit tests)
// ---------------------------------------------------------------------------

pub fn handle_request(
    req: &JsonRpcRequest,
    tools: &[Box<dyn CaseTool>],
    store: &dyn RecordStore,
    policy: &TimelinePolicy,
) -> JsonRpcResponse {
    match req.method.as_str() {
        "initialize" => JsonRpcResponse::ok(
            req.id.clone(),
            serde_json::json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "expedientes",
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        ),

        "ping" => JsonRpcResponse::ok(req.id.clone(), serde_json::json!({})),

        "tools/list" => {
            let tool_list: Vec<Value> = tools
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "name": t.name(),
                        "description": t.description(),
                        "inputSchema": t.schema()
                    })
                })
                .collect();
            JsonRpcResponse::ok(req.id.clone(), serde_json::json!({ "tools": tool_list }))
        }

        "tools/call" => {
            let Some(params) = &req.params else {
                return JsonRpcResponse::err(req.id.clone(), -32602, "missing params");
            };
            let Some(tool_name) = params["name"].as_str() else {
                return JsonRpcResponse::err(req.id.clone(), -32602, "missing tool name in params");
            };
            let args = params.get("arguments").cloned().unwrap_or(Value::Null);

            let Some(tool) = tools.iter().find(|t| t.name() == tool_name) else {
                return JsonRpcResponse::err(
                    req.id.clone(),
                    -32601,
                    format!("tool not found: {tool_name}"),
                );
            };

            let ctx = ToolContext {
                store,
                policy,
                today: super::today(),
            };
            tracing::info!(tool = tool_name, "tool call");
            let (text, is_error) = match tool.call(args, &ctx) {
                Ok(v) => (
                    serde_json::to_string_pretty(&v)
                        .unwrap_or_else(|e| format!("serialization error: {e}")),
                    false,
                ),
                Err(e) => {
                    tracing::warn!(tool = tool_name, error = %e, "tool call failed");
                    (e, true)
                }
            };

            let call_result = ToolCallResult {
                content: vec![ToolContent {
                    r#type: "text",
                    text,
                }],
                is_error,
            };

            JsonRpcResponse::ok(
                req.id.clone(),
                serde_json::to_value(&call_result)
                    .unwrap_or_else(|e| serde_json::json!({"error": e.to_string()})),
            )
        }

        other => JsonRpcResponse::err(req.id.clone(), -32601, format!("method not found: {other}")),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
