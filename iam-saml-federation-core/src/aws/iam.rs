//! IAM SDK implementation of [`IdentityProviderClient`]

use std::fmt;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_iam::config::{Credentials, Region};
use aws_sdk_iam::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_iam::Client as IamClient;
use aws_smithy_runtime_api::client::result::SdkError;
use log::{debug, trace};

use crate::aws::client::{IdentityProviderClient, ProviderDocument, ProviderListEntry};
use crate::aws::{AwsError, AwsResult};

/// IAM is a global service; requests are signed for this region when none is configured
pub const DEFAULT_IAM_REGION: &str = "us-east-1";

const CREDENTIALS_PROVIDER_NAME: &str = "iam-saml-federation-static";

/// Static credentials supplied explicitly instead of through the default chain
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl StaticCredentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> AwsResult<Self> {
        let access_key_id = access_key_id.into();
        let secret_access_key = secret_access_key.into();
        if access_key_id.is_empty() || secret_access_key.is_empty() {
            return Err(AwsError::ConfigError(
                "access key and secret key must both be non-empty".to_string(),
            ));
        }
        Ok(Self {
            access_key_id,
            secret_access_key,
            session_token: session_token.filter(|token| !token.is_empty()),
        })
    }
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &self.session_token.as_ref().map(|_| "** redacted **"))
            .finish()
    }
}

/// Connection parameters passed through to the SDK unmodified.
///
/// Anything left as `None` falls back to the `aws-config` default chain
/// (environment, shared config files, instance metadata).
#[derive(Debug, Clone, Default)]
pub struct ConnectionConfig {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub endpoint_url: Option<String>,
    pub credentials: Option<StaticCredentials>,
}

/// [`IdentityProviderClient`] backed by `aws-sdk-iam`
#[derive(Debug, Clone)]
pub struct AwsIdentityProviderClient {
    client: IamClient,
}

impl AwsIdentityProviderClient {
    /// Build a client from explicit connection parameters
    pub async fn from_config(config: &ConnectionConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint_url) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }
        if let Some(credentials) = &config.credentials {
            loader = loader.credentials_provider(Credentials::new(
                credentials.access_key_id.clone(),
                credentials.secret_access_key.clone(),
                credentials.session_token.clone(),
                None,
                CREDENTIALS_PROVIDER_NAME,
            ));
        }

        let sdk_config = loader.load().await;
        let mut builder = aws_sdk_iam::config::Builder::from(&sdk_config);
        if sdk_config.region().is_none() {
            debug!("No region configured, using {DEFAULT_IAM_REGION}");
            builder = builder.region(Region::new(DEFAULT_IAM_REGION));
        }

        Self {
            client: IamClient::from_conf(builder.build()),
        }
    }

    /// Wrap an already configured IAM client
    #[must_use]
    pub fn with_client(client: IamClient) -> Self {
        Self { client }
    }
}

/// Convert an SDK failure into [`AwsError::Remote`], keeping the service's code and message
fn remote_error<E>(
    operation: &'static str,
    err: SdkError<E, aws_smithy_runtime_api::http::Response>,
) -> AwsError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    match err.code() {
        Some(code) => AwsError::remote(code, err.message().unwrap_or_default()),
        None => AwsError::remote(
            "Unknown",
            format!("{operation} failed: {}", DisplayErrorContext(&err)),
        ),
    }
}

#[async_trait]
impl IdentityProviderClient for AwsIdentityProviderClient {
    async fn list_providers(&self) -> AwsResult<Vec<ProviderListEntry>> {
        let response = self
            .client
            .list_saml_providers()
            .send()
            .await
            .map_err(|e| remote_error("ListSAMLProviders", e))?;

        let providers: Vec<ProviderListEntry> = response
            .saml_provider_list()
            .iter()
            .filter_map(|entry| entry.arn())
            .map(ProviderListEntry::new)
            .collect();

        trace!("ListSAMLProviders returned {} providers", providers.len());
        Ok(providers)
    }

    async fn get_provider(&self, arn: &str) -> AwsResult<ProviderDocument> {
        let response = self
            .client
            .get_saml_provider()
            .saml_provider_arn(arn)
            .send()
            .await
            .map_err(|e| remote_error("GetSAMLProvider", e))?;

        let metadata_document = response
            .saml_metadata_document()
            .ok_or(AwsError::MalformedResponse {
                operation: "GetSAMLProvider",
                field: "SAMLMetadataDocument",
            })?
            .to_string();

        Ok(ProviderDocument { metadata_document })
    }

    async fn create_provider(&self, name: &str, metadata_document: &str) -> AwsResult<String> {
        let response = self
            .client
            .create_saml_provider()
            .name(name)
            .saml_metadata_document(metadata_document)
            .send()
            .await
            .map_err(|e| remote_error("CreateSAMLProvider", e))?;

        response
            .saml_provider_arn()
            .map(std::string::ToString::to_string)
            .ok_or(AwsError::MalformedResponse {
                operation: "CreateSAMLProvider",
                field: "SAMLProviderArn",
            })
    }

    async fn update_provider(&self, arn: &str, metadata_document: &str) -> AwsResult<String> {
        let response = self
            .client
            .update_saml_provider()
            .saml_provider_arn(arn)
            .saml_metadata_document(metadata_document)
            .send()
            .await
            .map_err(|e| remote_error("UpdateSAMLProvider", e))?;

        response
            .saml_provider_arn()
            .map(std::string::ToString::to_string)
            .ok_or(AwsError::MalformedResponse {
                operation: "UpdateSAMLProvider",
                field: "SAMLProviderArn",
            })
    }

    async fn delete_provider(&self, arn: &str) -> AwsResult<()> {
        self.client
            .delete_saml_provider()
            .saml_provider_arn(arn)
            .send()
            .await
            .map_err(|e| remote_error("DeleteSAMLProvider", e))?;
        Ok(())
    }
}
