use thiserror::Error;

#[derive(Debug, Error)]
pub enum McpError {
    #[error("gateway request failed: {source}")]
    Http {
        #[source]
        source: reqwest::Error,
    },
    #[error("gateway returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("gateway returned invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
    #[error("gateway returned JSON-RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("gateway response carried no JSON-RPC message")]
    EmptyResponse,
    #[error("unexpected '{method}' result: {source}")]
    InvalidResult {
        method: String,
        #[source]
        source: serde_json::Error,
    },
}

impl McpError {
    pub fn http(source: reqwest::Error) -> Self {
        Self::Http { source }
    }

    pub fn user_message(&self) -> String {
        match self {
            McpError::Http { source } if source.is_connect() => {
                "Could not connect to the gateway. Check the gateway URL and your network."
                    .to_string()
            }
            McpError::Status { status: 401 | 403, .. } => {
                "The gateway rejected the access token. Run setup again or refresh the client credentials."
                    .to_string()
            }
            other => other.to_string(),
        }
    }
}
