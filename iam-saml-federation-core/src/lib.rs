//! This crate provides the core logic for managing an AWS IAM SAML identity provider:
//! - Desired-state model and validation
//! - The `IdentityProviderClient` seam and its `aws-sdk-iam` implementation
//! - `ProviderReconciler`, which converges one named provider with at most one mutation
//!

pub mod aws;
mod error;
mod reconciler;
#[cfg(test)]
mod testing;
mod types;

// Re-exports for a small, focused public API
pub use aws::arn::provider_name_from_arn;
pub use aws::client::{IdentityProviderClient, ProviderDocument, ProviderListEntry};
pub use aws::iam::{AwsIdentityProviderClient, ConnectionConfig, StaticCredentials};
pub use aws::{AwsError, AwsResult};
pub use error::{ErrorInfo, FailureContext, ReconcileError, ReconcileResultWithError};
pub use reconciler::ProviderReconciler;
pub use types::{DesiredSpec, DesiredState, ReconcileResult, ReconcilerOptions, RemoteProvider};
