//! Mock tool implementations and the catalog describing them to the gateway.

use chrono::{DateTime, Offset, Utc};
use chrono_tz::Tz;
use serde_json::{Value, json};
use thiserror::Error;

pub const GET_WEATHER: &str = "get_weather";
pub const GET_TIME: &str = "get_time";

/// Gateway-facing description of a single-argument tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub parameter: &'static str,
    pub parameter_description: &'static str,
}

pub const TOOL_SPECS: [ToolSpec; 2] = [
    ToolSpec {
        name: GET_WEATHER,
        description: "Get the current weather for a location",
        parameter: "location",
        parameter_description: "City or place to report the weather for",
    },
    ToolSpec {
        name: GET_TIME,
        description: "Get the current time in a timezone",
        parameter: "timezone",
        parameter_description: "IANA timezone identifier, for example Europe/Paris",
    },
];

/// Tool-level failures. The `Display` text is what callers receive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("Error: Missing '{0}' argument")]
    MissingArgument(&'static str),
    #[error("Unknown tool")]
    UnknownTool(String),
    #[error("Failed to get time for timezone {timezone}: {reason}")]
    Timezone { timezone: String, reason: String },
}

impl ToolError {
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::MissingArgument(_) => "missing_argument",
            ToolError::UnknownTool(_) => "unknown_tool",
            ToolError::Timezone { .. } => "timezone_resolution",
        }
    }
}

pub type ToolOutcome = Result<Value, ToolError>;

/// Fixed mock forecast; the location is echoed back untouched.
pub fn get_weather(location: &Value) -> ToolOutcome {
    Ok(json!({
        "location": location,
        "temperature": "18°C",
        "conditions": "Partially Sunny"
    }))
}

pub fn get_time(timezone: &str) -> ToolOutcome {
    get_time_at(timezone, Utc::now())
}

pub fn get_time_at(timezone: &str, now: DateTime<Utc>) -> ToolOutcome {
    let tz = timezone
        .parse::<Tz>()
        .map_err(|err| ToolError::Timezone {
            timezone: timezone.to_string(),
            reason: err.to_string(),
        })?;
    let local = now.with_timezone(&tz);
    let offset_seconds = local.offset().fix().local_minus_utc();

    Ok(json!({
        "timezone": local.format("%Z").to_string(),
        "UTC_offset": f64::from(offset_seconds) / 3600.0,
        "current_time": local.format("%Y-%m-%d %H:%M:%S").to_string()
    }))
}
