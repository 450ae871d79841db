//! Resolves the invoked tool, runs it and wraps the outcome in the 200 envelope.

use crate::invocation::{InboundEvent, ToolInvocation};
use crate::tools::{self, GET_TIME, GET_WEATHER, ToolError, ToolOutcome};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Once;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

static INIT_TRACING: Once = Once::new();

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Install the fmt subscriber once. The function runtime stamps every log
/// line already, so timestamps are left out.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .try_init();
    });
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl HandlerResponse {
    /// Decoded `result` field of the body, if the body is well formed.
    pub fn result(&self) -> Option<Value> {
        serde_json::from_str::<Value>(&self.body)
            .ok()
            .and_then(|mut body| body.get_mut("result").map(Value::take))
    }
}

pub fn dispatch(event: &Value, client_custom: Option<&HashMap<String, String>>) -> HandlerResponse {
    info!(event = %event, "received event");
    info!(client_context = ?client_custom, "invocation context");

    let invocation = ToolInvocation::from_event(InboundEvent::classify(event, client_custom));
    info!(tool = %invocation.tool_name, "resolved tool");
    info!(arguments = ?invocation.arguments, "tool arguments");

    let outcome = run_tool(&invocation);
    if let Err(err) = &outcome {
        warn!(tool = %invocation.tool_name, kind = err.kind(), error = %err, "tool failed");
    }
    let result = render_outcome(outcome);
    info!(result = %result, "tool result");

    HandlerResponse {
        status_code: 200,
        body: json!({ "result": result }).to_string(),
    }
}

fn run_tool(invocation: &ToolInvocation) -> ToolOutcome {
    match invocation.tool_name.as_str() {
        GET_WEATHER => {
            let location = invocation
                .argument("location")
                .ok_or(ToolError::MissingArgument("location"))?;
            tools::get_weather(location)
        }
        GET_TIME => {
            let timezone = invocation
                .argument("timezone")
                .ok_or(ToolError::MissingArgument("timezone"))?;
            match timezone {
                Value::String(name) => tools::get_time(name),
                other => tools::get_time(&other.to_string()),
            }
        }
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}

/// Success payloads travel as JSON text, failures as their bare message.
fn render_outcome(outcome: ToolOutcome) -> String {
    match outcome {
        Ok(payload) => payload.to_string(),
        Err(err) => err.to_string(),
    }
}
