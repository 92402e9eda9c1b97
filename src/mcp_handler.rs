use anyhow::Result;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::io::{self, BufRead, BufReader, Write};
use std::sync::Arc;
use tracing::{info, warn};

use crate::use_cases::LotteryUseCase;
use crate::validation::ValidationError;

const PARSE_ERROR: i32 = -32700;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;

#[derive(Debug, serde::Deserialize)]
struct JsonRpcRequest {
    #[serde(default = "default_jsonrpc")]
    #[allow(dead_code)]
    jsonrpc: String,
    method: String,
    params: Option<Value>,
    id: Option<Value>,
}

fn default_jsonrpc() -> String {
    "2.0".to_string()
}

#[derive(Debug, serde::Serialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
    id: Option<Value>,
}

impl JsonRpcResponse {
    fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id: Some(id.unwrap_or(json!(1))),
        }
    }

    fn failure(id: Option<Value>, code: i32, message: String, data: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data,
            }),
            id,
        }
    }
}

#[derive(Debug, serde::Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

#[derive(Debug, serde::Serialize)]
struct Tool {
    name: String,
    description: String,
    #[serde(rename = "inputSchema")]
    input_schema: Value,
}

pub struct MCPHandler {
    lottery_use_case: Arc<LotteryUseCase>,
}

impl MCPHandler {
    pub fn new(lottery_use_case: Arc<LotteryUseCase>) -> Self {
        Self { lottery_use_case }
    }

    /// Reads one JSON-RPC message per line and writes one response per request.
    pub async fn serve<R, W>(self, reader: R, mut writer: W) -> Result<()>
    where
        R: BufRead,
        W: Write,
    {
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let request: JsonRpcRequest = match serde_json::from_str::<JsonRpcRequest>(&line) {
                Ok(req) => req,
                Err(e) => {
                    warn!("Failed to parse request: {} - Line: {}", e, line);
                    let error_response = JsonRpcResponse::failure(
                        None,
                        PARSE_ERROR,
                        "Parse error".to_string(),
                        Some(json!(e.to_string())),
                    );
                    writeln!(writer, "{}", serde_json::to_string(&error_response)?)?;
                    writer.flush()?;
                    continue;
                }
            };

            // Notifications never get a response.
            if request.id.is_none() || request.method.starts_with("notifications/") {
                if request.method == "notifications/initialized" {
                    info!("Client initialized");
                }
                continue;
            }

            let response = self.handle_request(request).await;
            writeln!(writer, "{}", serde_json::to_string(&response)?)?;
            writer.flush()?;
        }

        Ok(())
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "tools/list" => JsonRpcResponse::success(request.id, json!({ "tools": self.get_tools() })),
            "tools/call" => self.handle_call_tool(request.params, request.id).await,
            _ => JsonRpcResponse::failure(
                Some(request.id.unwrap_or(json!(1))),
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
                None,
            ),
        }
    }

    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        info!("Initializing lottery status server");
        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": env!("CARGO_PKG_NAME"),
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        )
    }

    async fn handle_call_tool(&self, params: Option<Value>, id: Option<Value>) -> JsonRpcResponse {
        let id = Some(id.unwrap_or(json!(1)));

        let Some(params) = params else {
            return JsonRpcResponse::failure(id, INVALID_PARAMS, "Missing params".to_string(), None);
        };

        let Some(tool_name) = params.get("name").and_then(|n| n.as_str()) else {
            return JsonRpcResponse::failure(id, INVALID_PARAMS, "Missing tool name".to_string(), None);
        };

        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));
        let arguments_map: HashMap<String, Value> =
            serde_json::from_value(arguments).unwrap_or_default();

        match self.execute_tool(tool_name, &arguments_map).await {
            Ok(content) => JsonRpcResponse::success(
                id,
                json!({
                    "content": [
                        {
                            "type": "text",
                            "text": content
                        }
                    ]
                }),
            ),
            Err(e) => match e.downcast_ref::<ValidationError>() {
                Some(validation) => JsonRpcResponse::failure(
                    id,
                    INVALID_PARAMS,
                    validation.message.clone(),
                    Some(json!({ "code": validation.code, "message": validation.message })),
                ),
                None => {
                    warn!("tool {} failed: {:#}", tool_name, e);
                    JsonRpcResponse::failure(
                        id,
                        INTERNAL_ERROR,
                        format!("Tool execution error: {}", e),
                        None,
                    )
                }
            },
        }
    }

    async fn execute_tool(&self, tool_name: &str, arguments: &HashMap<String, Value>) -> Result<String> {
        match tool_name {
            "get_lottery_status" => self.lottery_use_case.get_lottery_status(arguments).await,
            "get_draw_result" => self.lottery_use_case.get_draw_result(arguments).await,
            "get_prize_table" => self.lottery_use_case.get_prize_table(arguments).await,
            _ => Err(anyhow::anyhow!("Unknown tool: {}", tool_name)),
        }
    }

    fn get_tools(&self) -> Vec<Tool> {
        vec![
            Tool {
                name: "get_lottery_status".to_string(),
                description: "Check picks against the winning numbers of a draw and report prizes".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "lotteryTicket": {
                            "type": "object",
                            "properties": {
                                "drawDate": {
                                    "type": "string",
                                    "description": "Draw date in YYYY-MM-DD format (Wednesday or Saturday)"
                                },
                                "picks": {
                                    "type": "array",
                                    "description": "Picks of five white balls (1-69) followed by the red ball (1-26)",
                                    "minItems": 1,
                                    "items": {
                                        "type": "array",
                                        "items": {"type": "integer"},
                                        "minItems": 6,
                                        "maxItems": 6
                                    }
                                }
                            },
                            "required": ["drawDate", "picks"]
                        }
                    },
                    "required": ["lotteryTicket"]
                }),
            },
            Tool {
                name: "get_draw_result".to_string(),
                description: "Get the cached winning numbers for a draw date".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "date": {
                            "type": "string",
                            "description": "Date in YYYY-MM-DD format"
                        }
                    },
                    "required": ["date"]
                }),
            },
            Tool {
                name: "get_prize_table".to_string(),
                description: "List the configured prize rules".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {}
                }),
            },
        ]
    }
}

pub fn stdio() -> (BufReader<io::Stdin>, io::Stdout) {
    (BufReader::new(io::stdin()), io::stdout())
}
