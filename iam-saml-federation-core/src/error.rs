//! Error types for SAML provider reconciliation

use crate::aws::AwsError;
use serde::Serialize;
use thiserror::Error;

/// Remote call that failed, with the values it was attempted with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureContext {
    Lookup { name: String },
    Fetch { arn: String },
    Create { name: String, metadata: String },
    Update { arn: String, metadata: String },
    Delete { arn: String },
}

impl FailureContext {
    /// Diagnostic fields reported alongside the failure message
    #[must_use]
    pub fn debug_fields(&self) -> Vec<String> {
        match self {
            Self::Lookup { name } => vec![name.clone()],
            Self::Fetch { arn } | Self::Delete { arn } => vec![arn.clone()],
            Self::Create { name, metadata } => vec![name.clone(), metadata.clone()],
            Self::Update { arn, metadata } => vec![arn.clone(), metadata.clone()],
        }
    }
}

/// Errors that terminate a reconciliation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// Rejected before any remote call
    #[error("{0}")]
    InvalidInput(String),

    /// The identity provider client failed; the remote message is kept verbatim.
    ///
    /// `remote` is not a chained source: its text already is this error's message.
    #[error("{remote}")]
    RemoteClient {
        remote: AwsError,
        context: FailureContext,
    },
}

/// Result type for reconciliation operations
pub type ReconcileResultWithError<T> = Result<T, ReconcileError>;

impl ReconcileError {
    #[must_use]
    pub fn missing_metadata() -> Self {
        Self::InvalidInput("saml_metadata_document must be defined for present state".to_string())
    }

    pub(crate) fn remote(context: FailureContext) -> impl FnOnce(AwsError) -> Self {
        move |remote| Self::RemoteClient { remote, context }
    }

    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    #[must_use]
    pub fn debug_fields(&self) -> Vec<String> {
        match self {
            Self::InvalidInput(_) => Vec::new(),
            Self::RemoteClient { context, .. } => context.debug_fields(),
        }
    }
}

/// Failure details as reported to the caller
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorInfo {
    /// Always `true`; marks the enclosing result as a failure
    pub failed: bool,
    pub msg: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub debug: Vec<String>,
}

impl From<&ReconcileError> for ErrorInfo {
    fn from(error: &ReconcileError) -> Self {
        Self {
            failed: true,
            msg: error.to_string(),
            debug: error.debug_fields(),
        }
    }
}
