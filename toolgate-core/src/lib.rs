//! # toolgate-core
//!
//! Client side of a managed tool gateway: the persisted gateway configuration,
//! OAuth token retrieval, the MCP client that talks to the gateway over
//! streamable HTTP, the paginated tool catalog, and the tool-calling agent that
//! drives the interactive session.

pub mod agent;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod mcp;
pub mod model;
pub mod session;
pub mod types;

pub use agent::{AgentError, ChatAgent, GatewayAgent, ToolInvoker};
pub use catalog::{CatalogError, CatalogLimits, ToolPager, list_all_tools};
pub use config::{ClientInfo, ConfigError, GatewayConfig, Region, ResourceNames};
pub use mcp::{GatewayMcpClient, McpError, ToolDescriptor, ToolPage};
pub use session::{SessionError, run_session};
