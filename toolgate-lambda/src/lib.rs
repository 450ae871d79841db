//! # toolgate-lambda
//!
//! The gateway target: resolves which tool an invocation is for and runs one
//! of the mock tools, always answering with a 200 envelope.

pub mod dispatcher;
pub mod invocation;
pub mod tools;

pub use dispatcher::{HandlerResponse, dispatch, init_tracing};
pub use invocation::{InboundEvent, ToolInvocation, effective_tool_name};
pub use tools::{TOOL_SPECS, ToolError, ToolOutcome, ToolSpec};
