//! AWS layer: the identity provider client seam, its IAM SDK implementation,
//! and ARN/name helpers.

pub mod arn;
pub mod client;
pub mod iam;
pub mod naming;

use thiserror::Error;

/// Errors raised by the AWS layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AwsError {
    #[error("AWS configuration error: {0}")]
    ConfigError(String),

    /// Failure reported by the remote API. `code` is the machine-readable error
    /// code (e.g. `NoSuchEntity`), `message` the human-readable text.
    #[error("{code}: {message}")]
    Remote { code: String, message: String },

    #[error("{operation} response is missing {field}")]
    MalformedResponse {
        operation: &'static str,
        field: &'static str,
    },
}

impl AwsError {
    pub fn remote(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Remote {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Machine-readable error code, when the remote API supplied one
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Remote { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Result type alias for the AWS layer
pub type AwsResult<T> = Result<T, AwsError>;
