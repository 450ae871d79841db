//! # MCP gateway client
//!
//! JSON-RPC over the MCP streamable HTTP transport, authenticated with a bearer
//! token. Covers what the runner needs from a gateway: the handshake,
//! paginated `tools/list` and `tools/call`.

mod client;
mod error;
mod types;

pub use client::{GatewayMcpClient, parse_rpc_body};
pub use error::McpError;
pub use types::{CallToolResult, ToolContent, ToolDescriptor, ToolPage};
