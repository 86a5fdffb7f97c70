//! Reconciliation of one named SAML identity provider
//!
//! Each call re-reads IAM and performs at most one mutating request:
//!
//! 1. `locate` lists providers and matches the name suffix of each ARN
//! 2. present: fetch the stored metadata and compare it after trimming whitespace
//! 3. create, update or delete as needed, unless running in check mode
//!
//! Nothing is cached between calls. IAM exposes no version token on SAML
//! providers, so two concurrent invocations against the same name can both
//! observe "not found" and race to create it; the loser gets the remote
//! `EntityAlreadyExists` error.

use log::{debug, info};

use crate::aws::arn::arn_matches_name;
use crate::aws::client::IdentityProviderClient;
use crate::error::{FailureContext, ReconcileError, ReconcileResultWithError};
use crate::types::{
    require_metadata, DesiredSpec, DesiredState, ReconcileResult, ReconcilerOptions,
    RemoteProvider,
};

/// Converges one SAML identity provider to its desired state
#[derive(Debug)]
pub struct ProviderReconciler<C> {
    client: C,
    options: ReconcilerOptions,
}

impl<C: IdentityProviderClient> ProviderReconciler<C> {
    #[must_use]
    pub fn new(client: C, options: ReconcilerOptions) -> Self {
        Self { client, options }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    #[must_use]
    pub fn options(&self) -> ReconcilerOptions {
        self.options
    }

    /// Validate `spec` and converge toward it
    pub async fn reconcile(&self, spec: &DesiredSpec) -> ReconcileResultWithError<ReconcileResult> {
        spec.validate()?;
        match spec.desired_state {
            DesiredState::Present => {
                let metadata = require_metadata(spec.metadata_document.as_deref())?;
                self.ensure_present(&spec.name, metadata).await
            }
            DesiredState::Absent => self.ensure_absent(&spec.name).await,
        }
    }

    /// Find the provider whose ARN ends in `/{name}`.
    ///
    /// The first match wins if IAM ever returns colliding suffixes.
    pub async fn locate(&self, name: &str) -> ReconcileResultWithError<Option<RemoteProvider>> {
        let providers = self
            .client
            .list_providers()
            .await
            .map_err(ReconcileError::remote(FailureContext::Lookup {
                name: name.to_string(),
            }))?;

        let found = providers
            .into_iter()
            .find(|entry| arn_matches_name(&entry.arn, name))
            .map(|entry| RemoteProvider::reference(entry.arn));

        match &found {
            Some(provider) => debug!("Located SAML provider {name}: {}", provider.arn),
            None => debug!("SAML provider {name} not found"),
        }
        Ok(found)
    }

    /// Create the provider, or update its metadata if it differs
    pub async fn ensure_present(
        &self,
        name: &str,
        metadata: &str,
    ) -> ReconcileResultWithError<ReconcileResult> {
        require_metadata(Some(metadata))?;

        match self.locate(name).await? {
            Some(provider) => self.converge_metadata(provider, metadata).await,
            None => self.create(name, metadata).await,
        }
    }

    /// Delete the provider if it exists
    pub async fn ensure_absent(&self, name: &str) -> ReconcileResultWithError<ReconcileResult> {
        let Some(provider) = self.locate(name).await? else {
            return Ok(ReconcileResult::unchanged(None));
        };

        if self.options.check_mode {
            info!("Check mode: would delete SAML provider {}", provider.arn);
            return Ok(ReconcileResult::changed(None));
        }

        self.client
            .delete_provider(&provider.arn)
            .await
            .map_err(ReconcileError::remote(FailureContext::Delete {
                arn: provider.arn.clone(),
            }))?;
        info!("Deleted SAML provider {}", provider.arn);
        Ok(ReconcileResult::changed(None))
    }

    /// Read the stored metadata document of a located provider
    pub async fn fetch(
        &self,
        mut provider: RemoteProvider,
    ) -> ReconcileResultWithError<RemoteProvider> {
        let document = self
            .client
            .get_provider(&provider.arn)
            .await
            .map_err(ReconcileError::remote(FailureContext::Fetch {
                arn: provider.arn.clone(),
            }))?;
        provider.metadata_document = Some(document.metadata_document);
        Ok(provider)
    }

    async fn converge_metadata(
        &self,
        provider: RemoteProvider,
        metadata: &str,
    ) -> ReconcileResultWithError<ReconcileResult> {
        let provider = self.fetch(provider).await?;
        let current = provider.metadata_document.as_deref().unwrap_or_default();

        if current.trim() == metadata.trim() {
            debug!("SAML provider {} metadata is up to date", provider.arn);
            return Ok(ReconcileResult::unchanged(Some(provider.arn)));
        }

        if self.options.check_mode {
            info!("Check mode: would update SAML provider {}", provider.arn);
            return Ok(ReconcileResult::changed(Some(provider.arn)));
        }

        let arn = self
            .client
            .update_provider(&provider.arn, metadata)
            .await
            .map_err(ReconcileError::remote(FailureContext::Update {
                arn: provider.arn.clone(),
                metadata: metadata.to_string(),
            }))?;
        info!("Updated SAML provider {arn}");
        Ok(ReconcileResult::changed(Some(arn)))
    }

    async fn create(&self, name: &str, metadata: &str) -> ReconcileResultWithError<ReconcileResult> {
        if self.options.check_mode {
            info!("Check mode: would create SAML provider {name}");
            return Ok(ReconcileResult::changed(None));
        }

        let arn = self
            .client
            .create_provider(name, metadata)
            .await
            .map_err(ReconcileError::remote(FailureContext::Create {
                name: name.to_string(),
                metadata: metadata.to_string(),
            }))?;
        info!("Created SAML provider {arn}");
        Ok(ReconcileResult::changed(Some(arn)))
    }
}
