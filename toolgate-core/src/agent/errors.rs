use crate::model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("agent exceeded {limit} tool interactions in a single turn")]
    ToolStepLimit { limit: usize },
}

impl AgentError {
    pub fn user_message(&self) -> String {
        match self {
            AgentError::Model(err) => err.user_message(),
            AgentError::ToolStepLimit { .. } => {
                "The agent kept calling tools without reaching an answer. Try rephrasing the request."
                    .to_string()
            }
        }
    }
}
