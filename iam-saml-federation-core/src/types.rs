//! Core type definitions for SAML provider reconciliation

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::aws::naming::validate_provider_name;
use crate::error::{ErrorInfo, ReconcileError, ReconcileResultWithError};

/// Whether the named provider should exist
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DesiredState {
    #[default]
    Present,
    Absent,
}

impl fmt::Display for DesiredState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present => write!(f, "present"),
            Self::Absent => write!(f, "absent"),
        }
    }
}

/// Declarative description of one SAML provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DesiredSpec {
    pub name: String,
    #[serde(default, rename = "saml_metadata_document")]
    pub metadata_document: Option<String>,
    #[serde(default, rename = "state")]
    pub desired_state: DesiredState,
}

impl DesiredSpec {
    #[must_use]
    pub fn present(name: impl Into<String>, metadata_document: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata_document: Some(metadata_document.into()),
            desired_state: DesiredState::Present,
        }
    }

    #[must_use]
    pub fn absent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata_document: None,
            desired_state: DesiredState::Absent,
        }
    }

    /// Check the spec before any remote call is made.
    ///
    /// The name must be a valid IAM SAML provider name, and a present-state
    /// spec must carry a non-blank metadata document.
    pub fn validate(&self) -> ReconcileResultWithError<()> {
        validate_provider_name(&self.name).map_err(ReconcileError::InvalidInput)?;
        if self.desired_state == DesiredState::Present {
            require_metadata(self.metadata_document.as_deref())?;
        }
        Ok(())
    }
}

/// Present-state precondition on the metadata document
pub(crate) fn require_metadata(metadata: Option<&str>) -> ReconcileResultWithError<&str> {
    match metadata {
        Some(document) if !document.trim().is_empty() => Ok(document),
        _ => Err(ReconcileError::missing_metadata()),
    }
}

/// A provider as seen in IAM.
///
/// `locate` only knows the ARN; `metadata_document` is filled by
/// `ProviderReconciler::fetch` when the stored document is read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteProvider {
    pub arn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_document: Option<String>,
}

impl RemoteProvider {
    #[must_use]
    pub fn reference(arn: impl Into<String>) -> Self {
        Self {
            arn: arn.into(),
            metadata_document: None,
        }
    }
}

/// Options controlling how the reconciler applies changes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcilerOptions {
    /// Compute the decision but skip the mutating call
    pub check_mode: bool,
}

/// Outcome of one reconciliation
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReconcileResult {
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_arn: Option<String>,
    #[serde(flatten)]
    pub error: Option<ErrorInfo>,
}

impl ReconcileResult {
    #[must_use]
    pub fn unchanged(provider_arn: Option<String>) -> Self {
        Self {
            changed: false,
            provider_arn,
            error: None,
        }
    }

    #[must_use]
    pub fn changed(provider_arn: Option<String>) -> Self {
        Self {
            changed: true,
            provider_arn,
            error: None,
        }
    }

    /// Failed result carrying the error message and diagnostic context
    #[must_use]
    pub fn failed(error: &ReconcileError) -> Self {
        Self {
            changed: false,
            provider_arn: None,
            error: Some(ErrorInfo::from(error)),
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

impl From<ReconcileResultWithError<ReconcileResult>> for ReconcileResult {
    fn from(value: ReconcileResultWithError<ReconcileResult>) -> Self {
        value.unwrap_or_else(|e| Self::failed(&e))
    }
}
