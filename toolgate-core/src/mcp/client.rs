use super::error::McpError;
use super::types::{CallToolResult, ListToolsResult, ToolPage};
use crate::constants::MCP_PROTOCOL_VERSION;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, warn};

const SESSION_HEADER: &str = "mcp-session-id";
const PROTOCOL_HEADER: &str = "mcp-protocol-version";
const ACCEPT_BOTH: &str = "application/json, text/event-stream";

/// MCP client bound to one gateway endpoint and one bearer token.
///
/// The session id handed out by the gateway during `initialize` is replayed on
/// every later request and released by [`GatewayMcpClient::close`].
pub struct GatewayMcpClient {
    endpoint: String,
    access_token: String,
    http: Client,
    session_id: AsyncMutex<Option<String>>,
    id_counter: AtomicU64,
}

impl GatewayMcpClient {
    pub fn new(endpoint: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self::with_http(Client::new(), endpoint, access_token)
    }

    pub fn with_http(
        http: Client,
        endpoint: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            access_token: access_token.into(),
            http,
            session_id: AsyncMutex::new(None),
            id_counter: AtomicU64::new(1),
        }
    }

    /// Build a client and run the MCP handshake.
    pub async fn connect(
        endpoint: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self, McpError> {
        let client = Self::new(endpoint, access_token);
        client.initialize().await?;
        Ok(client)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn initialize(&self) -> Result<Value, McpError> {
        let params = json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "clientInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            },
            "capabilities": {}
        });
        let result = self.send_request("initialize", params).await?;
        self.send_notification("notifications/initialized", json!({}))
            .await?;
        let server = server_name(&result);
        info!(endpoint = %self.endpoint, server, "MCP session initialised");
        Ok(result)
    }

    pub async fn list_tools_page(&self, cursor: Option<&str>) -> Result<ToolPage, McpError> {
        let params = match cursor {
            Some(cursor) => json!({ "cursor": cursor }),
            None => json!({}),
        };
        let result = self.send_request("tools/list", params).await?;
        let parsed: ListToolsResult =
            serde_json::from_value(result).map_err(|source| McpError::InvalidResult {
                method: "tools/list".to_string(),
                source,
            })?;
        Ok(parsed.into())
    }

    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<CallToolResult, McpError> {
        let params = json!({
            "name": name,
            "arguments": match arguments {
                Value::Null => Value::Object(Default::default()),
                other => other,
            }
        });
        let result = self.send_request("tools/call", params).await?;
        serde_json::from_value(result).map_err(|source| McpError::InvalidResult {
            method: "tools/call".to_string(),
            source,
        })
    }

    /// Terminate the gateway session, if one was opened.
    pub async fn close(&self) -> Result<(), McpError> {
        let Some(session) = self.session_id.lock().await.take() else {
            return Ok(());
        };
        let response = self
            .http
            .delete(&self.endpoint)
            .bearer_auth(&self.access_token)
            .header(SESSION_HEADER, session)
            .send()
            .await
            .map_err(McpError::http)?;
        let status = response.status();
        // 405: the server does not support explicit session termination
        if !status.is_success() && status != StatusCode::METHOD_NOT_ALLOWED {
            warn!(status = status.as_u16(), "Gateway refused session termination");
        }
        debug!("MCP session closed");
        Ok(())
    }

    async fn send_request(&self, method: &str, params: Value) -> Result<Value, McpError> {
        let id = self.next_id();
        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params
        });
        debug!(method, id, "Sending MCP request");

        let response = self.post(&payload).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await.map_err(McpError::http)?;
        let message = parse_rpc_body(content_type.as_deref(), &body)?;
        extract_result(message)
    }

    async fn send_notification(&self, method: &str, params: Value) -> Result<(), McpError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params
        });
        self.post(&payload).await?;
        Ok(())
    }

    async fn post(&self, payload: &Value) -> Result<Response, McpError> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.access_token)
            .header(ACCEPT, ACCEPT_BOTH)
            .json(payload);
        if let Some(session) = self.session_id.lock().await.clone() {
            request = request
                .header(SESSION_HEADER, session)
                .header(PROTOCOL_HEADER, MCP_PROTOCOL_VERSION);
        }

        let response = request.send().await.map_err(McpError::http)?;
        if let Some(session) = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
        {
            *self.session_id.lock().await = Some(session.to_string());
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(McpError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    fn next_id(&self) -> u64 {
        self.id_counter.fetch_add(1, Ordering::SeqCst)
    }
}

/// Extract the JSON-RPC response from a gateway reply body.
///
/// Plain JSON bodies are parsed as-is. Event streams may interleave
/// notifications with the response; the last event carrying `result` or
/// `error` wins.
pub fn parse_rpc_body(content_type: Option<&str>, body: &str) -> Result<Value, McpError> {
    let is_stream = content_type.is_some_and(|ct| ct.starts_with("text/event-stream"));
    if !is_stream {
        if body.trim().is_empty() {
            return Err(McpError::EmptyResponse);
        }
        return serde_json::from_str(body).map_err(|source| McpError::InvalidJson { source });
    }

    let normalized = body.replace("\r\n", "\n");
    let mut last = None;
    for event in normalized.split("\n\n") {
        let data: Vec<&str> = event
            .lines()
            .filter_map(|line| line.strip_prefix("data:"))
            .map(|data| data.strip_prefix(' ').unwrap_or(data))
            .collect();
        if data.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(&data.join("\n"))
            .map_err(|source| McpError::InvalidJson { source })?;
        if value.get("result").is_some() || value.get("error").is_some() {
            last = Some(value);
        }
    }
    last.ok_or(McpError::EmptyResponse)
}

fn server_name(initialize_result: &Value) -> &str {
    initialize_result
        .pointer("/serverInfo/name")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
}

fn extract_result(message: Value) -> Result<Value, McpError> {
    if let Some(error) = message.get("error") {
        let code = error.get("code").and_then(Value::as_i64).unwrap_or(-32000);
        let text = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(McpError::Rpc {
            code,
            message: text,
        });
    }
    match message {
        Value::Object(mut map) => Ok(map.remove("result").unwrap_or(Value::Null)),
        _ => Err(McpError::EmptyResponse),
    }
}
