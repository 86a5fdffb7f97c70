//! Identity provider client seam
//!
//! The reconciler talks to IAM only through [`IdentityProviderClient`], so it
//! can be driven by the SDK-backed [`super::iam::AwsIdentityProviderClient`]
//! in production and by an in-memory implementation in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::aws::AwsResult;

/// One entry of a `ListSAMLProviders` response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderListEntry {
    pub arn: String,
}

impl ProviderListEntry {
    #[must_use]
    pub fn new(arn: impl Into<String>) -> Self {
        Self { arn: arn.into() }
    }
}

/// Body of a `GetSAMLProvider` response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderDocument {
    pub metadata_document: String,
}

/// Operations against the IAM SAML provider API
#[async_trait]
pub trait IdentityProviderClient: Send + Sync {
    /// List every SAML provider in the account
    async fn list_providers(&self) -> AwsResult<Vec<ProviderListEntry>>;

    /// Fetch the stored metadata document of a provider
    async fn get_provider(&self, arn: &str) -> AwsResult<ProviderDocument>;

    /// Create a provider, returning the ARN assigned by IAM
    async fn create_provider(&self, name: &str, metadata_document: &str) -> AwsResult<String>;

    /// Replace the metadata document of a provider, returning its ARN
    async fn update_provider(&self, arn: &str, metadata_document: &str) -> AwsResult<String>;

    async fn delete_provider(&self, arn: &str) -> AwsResult<()>;
}
