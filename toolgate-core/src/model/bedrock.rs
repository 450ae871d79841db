//! Bedrock Converse backed model provider

use super::ModelProvider;
use super::types::{ModelError, ModelRequest, ModelResponse, StopReason};
use crate::config::Region;
use crate::mcp::ToolDescriptor;
use crate::types::{ChatMessage, ContentBlock, MessageRole};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::types::{
    ContentBlock as BedrockBlock, ConversationRole, ConverseOutput, Message,
    StopReason as BedrockStopReason, SystemContentBlock, Tool, ToolConfiguration,
    ToolInputSchema, ToolResultBlock, ToolResultContentBlock, ToolResultStatus,
    ToolSpecification, ToolUseBlock,
};
use aws_smithy_types::{Document, Number};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Clone)]
pub struct BedrockConverseModel {
    client: Client,
    model_id: String,
}

impl BedrockConverseModel {
    pub fn new(client: Client, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }

    /// Build a client from the default AWS credential chain for `region`.
    pub async fn for_region(region: Region, model_id: impl Into<String>) -> Self {
        let shared_config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(region.as_str()))
            .load()
            .await;
        Self::new(Client::new(&shared_config), model_id)
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }
}

#[async_trait]
impl ModelProvider for BedrockConverseModel {
    async fn converse(&self, request: ModelRequest<'_>) -> Result<ModelResponse, ModelError> {
        let model = self.model_id.as_str();
        let messages = request
            .messages
            .iter()
            .map(|message| to_bedrock_message(model, message))
            .collect::<Result<Vec<_>, _>>()?;

        let mut call = self
            .client
            .converse()
            .model_id(model)
            .set_messages(Some(messages));
        if let Some(system) = request.system_prompt {
            call = call.system(SystemContentBlock::Text(system.to_string()));
        }
        if !request.tools.is_empty() {
            call = call.tool_config(tool_configuration(model, request.tools)?);
        }

        info!(
            model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Sending request to Bedrock"
        );
        let output = call
            .send()
            .await
            .map_err(|err| ModelError::provider(model, DisplayErrorContext(&err).to_string()))?;

        let stop_reason = match output.stop_reason() {
            BedrockStopReason::EndTurn => StopReason::EndTurn,
            BedrockStopReason::ToolUse => StopReason::ToolUse,
            BedrockStopReason::MaxTokens => StopReason::MaxTokens,
            _ => StopReason::Other,
        };
        let message = match output.output() {
            Some(ConverseOutput::Message(message)) => from_bedrock_message(model, message)?,
            _ => return Err(ModelError::invalid_response(model, "missing output message")),
        };
        debug!(?stop_reason, blocks = message.content.len(), "Received Bedrock response");

        Ok(ModelResponse {
            message,
            stop_reason,
        })
    }
}

fn tool_configuration(model: &str, tools: &[ToolDescriptor]) -> Result<ToolConfiguration, ModelError> {
    let specs = tools
        .iter()
        .map(|tool| {
            ToolSpecification::builder()
                .name(&tool.name)
                .set_description(tool.description.clone().filter(|text| !text.is_empty()))
                .input_schema(ToolInputSchema::Json(json_to_document(&tool.input_schema)))
                .build()
                .map(Tool::ToolSpec)
                .map_err(|err| ModelError::invalid_request(model, err.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    ToolConfiguration::builder()
        .set_tools(Some(specs))
        .build()
        .map_err(|err| ModelError::invalid_request(model, err.to_string()))
}

fn to_bedrock_message(model: &str, message: &ChatMessage) -> Result<Message, ModelError> {
    let role = match message.role {
        MessageRole::User => ConversationRole::User,
        MessageRole::Assistant => ConversationRole::Assistant,
    };
    let content = message
        .content
        .iter()
        .map(|block| to_bedrock_block(model, block))
        .collect::<Result<Vec<_>, _>>()?;

    Message::builder()
        .role(role)
        .set_content(Some(content))
        .build()
        .map_err(|err| ModelError::invalid_request(model, err.to_string()))
}

fn to_bedrock_block(model: &str, block: &ContentBlock) -> Result<BedrockBlock, ModelError> {
    let built = match block {
        ContentBlock::Text { text } => BedrockBlock::Text(text.clone()),
        ContentBlock::ToolUse { id, name, input } => BedrockBlock::ToolUse(
            ToolUseBlock::builder()
                .tool_use_id(id)
                .name(name)
                .input(json_to_document(input))
                .build()
                .map_err(|err| ModelError::invalid_request(model, err.to_string()))?,
        ),
        ContentBlock::ToolResult {
            tool_use_id,
            content,
            is_error,
        } => {
            // Converse rejects empty text blocks
            let text = if content.is_empty() {
                "(no output)".to_string()
            } else {
                content.clone()
            };
            let status = if *is_error {
                ToolResultStatus::Error
            } else {
                ToolResultStatus::Success
            };
            BedrockBlock::ToolResult(
                ToolResultBlock::builder()
                    .tool_use_id(tool_use_id)
                    .content(ToolResultContentBlock::Text(text))
                    .status(status)
                    .build()
                    .map_err(|err| ModelError::invalid_request(model, err.to_string()))?,
            )
        }
    };
    Ok(built)
}

fn from_bedrock_message(model: &str, message: &Message) -> Result<ChatMessage, ModelError> {
    let role = match message.role() {
        ConversationRole::User => MessageRole::User,
        ConversationRole::Assistant => MessageRole::Assistant,
        other => {
            return Err(ModelError::invalid_response(
                model,
                format!("unexpected role '{}'", other.as_str()),
            ));
        }
    };
    let content = message
        .content()
        .iter()
        .filter_map(|block| match block {
            BedrockBlock::Text(text) => Some(ContentBlock::Text { text: text.clone() }),
            BedrockBlock::ToolUse(tool_use) => Some(ContentBlock::ToolUse {
                id: tool_use.tool_use_id().to_string(),
                name: tool_use.name().to_string(),
                input: document_to_json(tool_use.input()),
            }),
            _ => None,
        })
        .collect();
    Ok(ChatMessage::new(role, content))
}

pub(crate) fn json_to_document(value: &Value) -> Document {
    match value {
        Value::Null => Document::Null,
        Value::Bool(flag) => Document::Bool(*flag),
        Value::Number(number) => {
            if let Some(unsigned) = number.as_u64() {
                Document::Number(Number::PosInt(unsigned))
            } else if let Some(signed) = number.as_i64() {
                Document::Number(Number::NegInt(signed))
            } else {
                Document::Number(Number::Float(number.as_f64().unwrap_or_default()))
            }
        }
        Value::String(text) => Document::String(text.clone()),
        Value::Array(items) => Document::Array(items.iter().map(json_to_document).collect()),
        Value::Object(map) => Document::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), json_to_document(value)))
                .collect::<HashMap<_, _>>(),
        ),
    }
}

pub(crate) fn document_to_json(document: &Document) -> Value {
    match document {
        Document::Null => Value::Null,
        Document::Bool(flag) => Value::Bool(*flag),
        Document::Number(Number::PosInt(value)) => Value::from(*value),
        Document::Number(Number::NegInt(value)) => Value::from(*value),
        Document::Number(Number::Float(value)) => serde_json::Number::from_f64(*value)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Document::String(text) => Value::String(text.clone()),
        Document::Array(items) => Value::Array(items.iter().map(document_to_json).collect()),
        Document::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), document_to_json(value)))
                .collect::<Map<String, Value>>(),
        ),
    }
}
