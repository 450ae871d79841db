// Function handler dispatch tests
//
// Exercises the envelope seen by the gateway: status 200 always, with the
// tool outcome carried in the `result` field of the body.

use serde_json::{Value, json};
use std::collections::HashMap;
use toolgate_lambda::{HandlerResponse, dispatch, effective_tool_name};

fn gateway_context(tool: &str) -> HashMap<String, String> {
    HashMap::from([("bedrockAgentCoreToolName".to_string(), tool.to_string())])
}

fn result_text(response: &HandlerResponse) -> String {
    let body: Value = serde_json::from_str(&response.body).expect("body is JSON");
    body["result"].as_str().expect("result is a string").to_string()
}

#[test]
fn weather_for_paris_decodes_to_mock_forecast() {
    let custom = gateway_context("get_weather");
    let response = dispatch(&json!({ "arguments": { "location": "Paris" } }), Some(&custom));

    assert_eq!(response.status_code, 200);
    let payload: Value = serde_json::from_str(&result_text(&response)).expect("payload is JSON");
    assert_eq!(
        payload,
        json!({ "location": "Paris", "temperature": "18°C", "conditions": "Partially Sunny" })
    );
}

#[test]
fn time_without_timezone_reports_missing_argument() {
    let custom = gateway_context("get_time");
    let response = dispatch(&json!({ "arguments": {} }), Some(&custom));

    assert_eq!(response.status_code, 200);
    assert_eq!(result_text(&response), "Error: Missing 'timezone' argument");
}

#[test]
fn unrecognised_tool_is_unknown() {
    let custom = gateway_context("get_stock_price");
    let response = dispatch(&json!({}), Some(&custom));

    assert_eq!(response.status_code, 200);
    assert_eq!(result_text(&response), "Unknown tool");
}

#[test]
fn missing_name_everywhere_is_unknown() {
    let response = dispatch(&json!({ "location": "Paris" }), None);
    assert_eq!(result_text(&response), "Unknown tool");
}

#[test]
fn without_context_name_comes_from_event() {
    let event = json!({
        "bedrockAgentCoreToolName": "console___get_weather",
        "location": "Lisbon"
    });
    let response = dispatch(&event, None);
    let payload: Value = serde_json::from_str(&result_text(&response)).expect("payload");
    assert_eq!(payload["location"], "Lisbon");
}

#[test]
fn namespaced_names_resolve_to_last_segment() {
    assert_eq!(effective_tool_name("ns1___ns2___get_time"), "get_time");
    assert_eq!(effective_tool_name("target___get_weather"), "get_weather");
    assert_eq!(effective_tool_name("get_weather"), "get_weather");

    let custom = gateway_context("ns1___ns2___get_time");
    let response = dispatch(&json!({ "arguments": {} }), Some(&custom));
    assert_eq!(result_text(&response), "Error: Missing 'timezone' argument");
}

#[test]
fn resolution_has_no_side_effects() {
    let event = json!({ "arguments": { "location": "Oslo" } });
    let custom = gateway_context("get_weather");
    let first = dispatch(&event, Some(&custom));
    let second = dispatch(&event, Some(&custom));
    assert_eq!(first, second);
}
