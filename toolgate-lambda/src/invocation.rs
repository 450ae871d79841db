//! Normalises the two invocation shapes into one [`ToolInvocation`].
//!
//! Gateway calls carry the tool name in the client context; console test
//! events carry it in the event body. Either way the arguments are the
//! event's `arguments` object, or the event itself when that is absent.

use serde_json::{Map, Value};
use std::collections::HashMap;

pub const TOOL_NAME_KEY: &str = "bedrockAgentCoreToolName";
pub const TOOL_NAME_DELIMITER: &str = "___";
pub const UNKNOWN_TOOL_NAME: &str = "unknown";

#[derive(Debug, Clone, Copy)]
pub enum InboundEvent<'a> {
    /// No client context: everything comes from the event body.
    Direct { event: &'a Value },
    /// Invoked with a client context whose custom map names the tool.
    WrappedContext {
        event: &'a Value,
        custom: &'a HashMap<String, String>,
    },
}

impl<'a> InboundEvent<'a> {
    pub fn classify(event: &'a Value, client_custom: Option<&'a HashMap<String, String>>) -> Self {
        match client_custom {
            Some(custom) => InboundEvent::WrappedContext { event, custom },
            None => InboundEvent::Direct { event },
        }
    }

    fn event(self) -> &'a Value {
        match self {
            InboundEvent::Direct { event } | InboundEvent::WrappedContext { event, .. } => event,
        }
    }

    fn raw_tool_name(self) -> &'a str {
        match self {
            InboundEvent::Direct { event } => event
                .get(TOOL_NAME_KEY)
                .and_then(Value::as_str)
                .unwrap_or(UNKNOWN_TOOL_NAME),
            InboundEvent::WrappedContext { custom, .. } => custom
                .get(TOOL_NAME_KEY)
                .map(String::as_str)
                .unwrap_or(UNKNOWN_TOOL_NAME),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolInvocation {
    pub tool_name: String,
    pub arguments: Map<String, Value>,
}

impl ToolInvocation {
    pub fn from_event(inbound: InboundEvent<'_>) -> Self {
        let tool_name = effective_tool_name(inbound.raw_tool_name()).to_string();
        let event = inbound.event();
        let arguments = match event.get("arguments") {
            Some(Value::Object(arguments)) => arguments.clone(),
            Some(_) => Map::new(),
            None => event.as_object().cloned().unwrap_or_default(),
        };
        Self {
            tool_name,
            arguments,
        }
    }

    pub fn argument(&self, key: &str) -> Option<&Value> {
        self.arguments.get(key)
    }
}

/// Strip a `target___` style namespace: only the part after the last
/// delimiter names the tool.
pub fn effective_tool_name(raw: &str) -> &str {
    raw.rsplit_once(TOOL_NAME_DELIMITER)
        .map(|(_, name)| name)
        .unwrap_or(raw)
}
