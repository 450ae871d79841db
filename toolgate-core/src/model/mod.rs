//! # Model seam
//!
//! The agent talks to the language model through [`ModelProvider`]; the
//! Bedrock Converse implementation lives in [`bedrock`].

pub mod bedrock;
mod types;

pub use bedrock::BedrockConverseModel;
pub use types::{ModelError, ModelRequest, ModelResponse, StopReason};

use async_trait::async_trait;

#[async_trait]
pub trait ModelProvider: Send + Sync {
    async fn converse(&self, request: ModelRequest<'_>) -> Result<ModelResponse, ModelError>;
}
