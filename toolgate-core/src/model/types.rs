use crate::mcp::ToolDescriptor;
use crate::types::ChatMessage;
use thiserror::Error;

#[derive(Debug, Clone, Copy)]
pub struct ModelRequest<'a> {
    pub system_prompt: Option<&'a str>,
    pub messages: &'a [ChatMessage],
    pub tools: &'a [ToolDescriptor],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndTurn,
    ToolUse,
    MaxTokens,
    Other,
}

#[derive(Debug, Clone)]
pub struct ModelResponse {
    pub message: ChatMessage,
    pub stop_reason: StopReason,
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model '{model}' rejected the request: {message}")]
    Provider { model: String, message: String },
    #[error("could not build request for model '{model}': {reason}")]
    InvalidRequest { model: String, reason: String },
    #[error("model '{model}' returned invalid response: {reason}")]
    InvalidResponse { model: String, reason: String },
}

impl ModelError {
    pub fn provider(model: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            model: model.into(),
            message: message.into(),
        }
    }

    pub fn invalid_request(model: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            model: model.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_response(model: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            model: model.into(),
            reason: reason.into(),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ModelError::Provider { model, .. } => format!(
                "Model '{model}' could not answer. Check that it is enabled for your account and region."
            ),
            ModelError::InvalidRequest { .. } | ModelError::InvalidResponse { .. } => {
                self.to_string()
            }
        }
    }
}
