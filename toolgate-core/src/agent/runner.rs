use super::errors::AgentError;
use super::{ChatAgent, ToolInvoker};
use crate::constants::MAX_TOOL_STEPS;
use crate::mcp::ToolDescriptor;
use crate::model::{ModelProvider, ModelRequest, StopReason};
use crate::types::{ChatMessage, ContentBlock, MessageRole};
use async_trait::async_trait;
use tracing::{debug, info, warn};

pub struct GatewayAgent<M, T> {
    model: M,
    tools: T,
    catalog: Vec<ToolDescriptor>,
    system_prompt: Option<String>,
    history: Vec<ChatMessage>,
    max_tool_steps: usize,
}

impl<M, T> GatewayAgent<M, T>
where
    M: ModelProvider,
    T: ToolInvoker,
{
    pub fn new(model: M, tools: T, catalog: Vec<ToolDescriptor>) -> Self {
        Self {
            model,
            tools,
            catalog,
            system_prompt: None,
            history: Vec::new(),
            max_tool_steps: MAX_TOOL_STEPS,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_max_tool_steps(mut self, steps: usize) -> Self {
        self.max_tool_steps = steps;
        self
    }

    pub fn catalog(&self) -> &[ToolDescriptor] {
        &self.catalog
    }

    /// Full conversation so far, including tool traffic.
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn tools(&self) -> &T {
        &self.tools
    }

    async fn run_tools(&self, message: &ChatMessage) -> Vec<ContentBlock> {
        let mut results = Vec::new();
        for (id, name, input) in message.tool_uses() {
            info!(tool = name, "Agent requested tool execution");
            let block = match self.tools.invoke_tool(name, input.clone()).await {
                Ok(result) => ContentBlock::ToolResult {
                    tool_use_id: id.to_string(),
                    content: result.joined_text(),
                    is_error: result.is_error,
                },
                Err(err) => {
                    warn!(tool = name, %err, "Tool invocation failed");
                    ContentBlock::ToolResult {
                        tool_use_id: id.to_string(),
                        content: err.to_string(),
                        is_error: true,
                    }
                }
            };
            results.push(block);
        }
        results
    }
}

#[async_trait]
impl<M, T> ChatAgent for GatewayAgent<M, T>
where
    M: ModelProvider,
    T: ToolInvoker,
{
    async fn respond(&mut self, prompt: &str) -> Result<String, AgentError> {
        let turn_start = self.history.len();
        self.history.push(ChatMessage::user_text(prompt));
        let outcome = self.complete_turn().await;
        if outcome.is_err() {
            // keep the transcript valid for the next turn
            self.history.truncate(turn_start);
        }
        outcome
    }
}

impl<M, T> GatewayAgent<M, T>
where
    M: ModelProvider,
    T: ToolInvoker,
{
    async fn complete_turn(&mut self) -> Result<String, AgentError> {
        let mut steps = 0usize;

        loop {
            let request = ModelRequest {
                system_prompt: self.system_prompt.as_deref(),
                messages: &self.history,
                tools: &self.catalog,
            };
            let response = self.model.converse(request).await?;
            let message = response.message;

            let wants_tools =
                response.stop_reason == StopReason::ToolUse && !message.tool_uses().is_empty();
            if !wants_tools {
                let answer = message.text();
                self.history.push(message);
                debug!(messages = self.history.len(), "Agent returned final response");
                return Ok(answer);
            }

            if steps >= self.max_tool_steps {
                warn!(limit = self.max_tool_steps, "Agent exceeded max tool interactions");
                return Err(AgentError::ToolStepLimit {
                    limit: self.max_tool_steps,
                });
            }
            steps += 1;

            let results = self.run_tools(&message).await;
            self.history.push(message);
            self.history.push(ChatMessage::new(MessageRole::User, results));
        }
    }
}
