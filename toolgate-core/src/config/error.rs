use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading, validating or writing a gateway config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode config: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("refusing to overwrite existing config at {path:?}")]
    AlreadyExists { path: PathBuf },

    #[error("gateway_url '{url}' is not a valid URL: {reason}")]
    InvalidGatewayUrl { url: String, reason: String },

    #[error("suffix '{suffix}' must be exactly four digits")]
    InvalidSuffix { suffix: String },

    #[error("unknown region '{0}'")]
    UnknownRegion(String),
}

/// Errors raised while picking which config file the runner should use
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("specified config '{0}' not found")]
    NotFound(String),

    #[error("invalid config search pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("failed to read selection: {0}")]
    Io(#[from] io::Error),

    #[error("input closed before a config was selected")]
    InputClosed,
}
