//! Application constants
//!
//! Single source of truth for values that are changed by editing code rather
//! than through runtime options.

use crate::config::Region;

/// Region every resource is provisioned in and every client talks to.
pub const DEFAULT_REGION: Region = Region::EuWest1;

/// Bedrock model driving the agent.
pub const MODEL_ID: &str = "eu.amazon.nova-lite-v1:0";

/// Prefix of per-run config files (`gateway_config_<suffix>.json`).
pub const CONFIG_FILE_PREFIX: &str = "gateway_config_";

/// Config file written by older setup runs, offered first when present.
pub const LEGACY_CONFIG_FILE: &str = "gateway_config.json";

/// Environment file consulted for AWS profile and credentials.
pub const ENV_PATH: &str = ".env";

/// MCP protocol revision announced during the gateway handshake.
pub const MCP_PROTOCOL_VERSION: &str = "2025-06-18";

/// Upper bound on `tools/list` pages fetched for one catalog.
pub const DEFAULT_MAX_CATALOG_PAGES: usize = 100;

/// Upper bound on model/tool round trips within a single user turn.
pub const MAX_TOOL_STEPS: usize = 10;

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant. Use the available tools to answer \
questions about the weather or the current time in a location. When a tool returns an error, \
explain it to the user.";
