use aws_smithy_types::error::display::DisplayErrorContext;
use aws_smithy_types::error::operation::BuildError;
use std::error::Error as StdError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("{service} {operation} failed: {message}")]
    Service {
        service: &'static str,
        operation: &'static str,
        message: String,
    },
    #[error("{operation} response did not include {field}")]
    MissingField {
        operation: &'static str,
        field: &'static str,
    },
    #[error("invalid request: {0}")]
    Build(#[from] BuildError),
    #[error("failed to read function package {path}: {source}")]
    Package {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{resource} entered status {status}")]
    ResourceFailed { resource: String, status: String },
    #[error("{resource} not ready after {attempts} checks (last status {last_status})")]
    NotReady {
        resource: String,
        attempts: u32,
        last_status: String,
    },
}

impl ProvisionError {
    /// Wrap an SDK error, keeping the full cause chain in the message.
    pub fn service<E>(service: &'static str, operation: &'static str, err: E) -> Self
    where
        E: StdError,
    {
        Self::Service {
            service,
            operation,
            message: DisplayErrorContext(err).to_string(),
        }
    }

    pub fn missing(operation: &'static str, field: &'static str) -> Self {
        Self::MissingField { operation, field }
    }

    pub fn user_message(&self) -> String {
        match self {
            ProvisionError::Service {
                service, operation, ..
            } => format!("{service} {operation} failed; check AWS credentials and permissions"),
            ProvisionError::Package { path, .. } => format!(
                "Function package {} not found; build it first or pass --lambda-arn",
                path.display()
            ),
            other => other.to_string(),
        }
    }
}
