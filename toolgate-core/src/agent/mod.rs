//! # Agent Module
//!
//! A tool-calling agent over the gateway catalog.
//!
//! Each user turn is sent to the model together with the tool catalog. When
//! the model asks for tools, they are invoked through the gateway and their
//! results fed back, until the model produces a final answer or the step
//! budget for the turn runs out.

mod errors;
mod runner;

pub use errors::AgentError;
pub use runner::GatewayAgent;

use crate::mcp::{CallToolResult, GatewayMcpClient, McpError};
use async_trait::async_trait;
use serde_json::Value;

/// Conversational agent driven by the interactive session.
#[async_trait]
pub trait ChatAgent: Send {
    async fn respond(&mut self, prompt: &str) -> Result<String, AgentError>;
}

/// Executes a named tool with JSON arguments.
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    async fn invoke_tool(&self, name: &str, arguments: Value) -> Result<CallToolResult, McpError>;
}

#[async_trait]
impl ToolInvoker for GatewayMcpClient {
    async fn invoke_tool(&self, name: &str, arguments: Value) -> Result<CallToolResult, McpError> {
        self.call_tool(name, arguments).await
    }
}

#[async_trait]
impl<T> ToolInvoker for &T
where
    T: ToolInvoker + ?Sized,
{
    async fn invoke_tool(&self, name: &str, arguments: Value) -> Result<CallToolResult, McpError> {
        (**self).invoke_tool(name, arguments).await
    }
}
