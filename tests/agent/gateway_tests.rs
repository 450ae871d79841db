// Agent round trip tests
//
// A scripted model drives the agent; tool calls are routed straight into the
// function handler the way the gateway would invoke it.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::sync::Mutex;
use toolgate_core::mcp::CallToolResult;
use toolgate_core::model::{ModelError, ModelProvider, ModelRequest, ModelResponse, StopReason};
use toolgate_core::session::SessionEnd;
use toolgate_core::types::{ChatMessage, ContentBlock, MessageRole};
use toolgate_core::{GatewayAgent, McpError, ToolDescriptor, ToolInvoker, run_session};

#[derive(Clone)]
struct ScriptedModel {
    responses: Arc<Mutex<Vec<ModelResponse>>>,
    recordings: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
}

impl ScriptedModel {
    fn new(responses: Vec<ModelResponse>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            recordings: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl ModelProvider for ScriptedModel {
    async fn converse(&self, request: ModelRequest<'_>) -> Result<ModelResponse, ModelError> {
        self.recordings.lock().await.push(request.messages.to_vec());
        let mut responses = self.responses.lock().await;
        if responses.is_empty() {
            return Err(ModelError::invalid_response("scripted", "script exhausted"));
        }
        Ok(responses.remove(0))
    }
}

/// Invokes the handler in-process, with the tool name in the client context.
struct InProcessGateway;

#[async_trait]
impl ToolInvoker for InProcessGateway {
    async fn invoke_tool(&self, name: &str, arguments: Value) -> Result<CallToolResult, McpError> {
        let custom = HashMap::from([("bedrockAgentCoreToolName".to_string(), name.to_string())]);
        let response = toolgate_lambda::dispatch(&json!({ "arguments": arguments }), Some(&custom));
        Ok(CallToolResult::text(response.body))
    }
}

fn tool_request(id: &str, name: &str, input: Value) -> ModelResponse {
    ModelResponse {
        message: ChatMessage::new(
            MessageRole::Assistant,
            vec![ContentBlock::ToolUse {
                id: id.to_string(),
                name: name.to_string(),
                input,
            }],
        ),
        stop_reason: StopReason::ToolUse,
    }
}

fn final_answer(text: &str) -> ModelResponse {
    ModelResponse {
        message: ChatMessage::assistant_text(text),
        stop_reason: StopReason::EndTurn,
    }
}

fn catalog() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new("AgentCoreLambdaTarget-0001___get_weather"),
        ToolDescriptor::new("AgentCoreLambdaTarget-0001___get_time"),
    ]
}

fn tool_result_of(messages: &[ChatMessage]) -> (String, bool) {
    messages
        .iter()
        .flat_map(|message| message.content.iter())
        .find_map(|block| match block {
            ContentBlock::ToolResult {
                content, is_error, ..
            } => Some((content.clone(), *is_error)),
            _ => None,
        })
        .expect("a tool result was sent to the model")
}

#[tokio::test]
async fn weather_question_reaches_the_handler() {
    let model = ScriptedModel::new(vec![
        tool_request(
            "tu-1",
            "AgentCoreLambdaTarget-0001___get_weather",
            json!({ "location": "Paris" }),
        ),
        final_answer("Partially sunny and 18°C in Paris."),
    ]);
    let mut agent = GatewayAgent::new(model.clone(), InProcessGateway, catalog());

    let input = BufReader::new(&b"What's the weather in Paris?\n\nexit\n"[..]);
    let mut output = Vec::new();
    let summary = run_session(&mut agent, input, &mut output)
        .await
        .expect("session");

    assert_eq!(summary.turns, 1);
    assert_eq!(summary.ended_by, SessionEnd::ExitKeyword);

    let recordings = model.recordings.lock().await.clone();
    assert_eq!(recordings.len(), 2);
    let (content, is_error) = tool_result_of(&recordings[1]);
    assert!(!is_error);
    assert!(content.contains("Partially Sunny"), "tool result: {content}");

    let printed = String::from_utf8(output).expect("utf8");
    assert!(printed.contains("Partially sunny and 18°C in Paris."));
    assert!(printed.contains("👋 Goodbye!"));
}

#[tokio::test]
async fn handler_errors_reach_the_model_as_text() {
    let model = ScriptedModel::new(vec![
        tool_request("tu-1", "AgentCoreLambdaTarget-0001___get_time", json!({})),
        final_answer("Which timezone do you mean?"),
    ]);
    let mut agent = GatewayAgent::new(model.clone(), InProcessGateway, catalog());

    let input = BufReader::new(&b"What time is it?\n"[..]);
    let mut output = Vec::new();
    let summary = run_session(&mut agent, input, &mut output)
        .await
        .expect("session");

    assert_eq!(summary.ended_by, SessionEnd::InputClosed);
    let recordings = model.recordings.lock().await.clone();
    let (content, _) = tool_result_of(&recordings[1]);
    assert!(content.contains("Error: Missing 'timezone' argument"), "tool result: {content}");
}
