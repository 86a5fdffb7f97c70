//! In-memory identity provider client for unit tests

use std::sync::Mutex;

use async_trait::async_trait;

use crate::aws::client::{IdentityProviderClient, ProviderDocument, ProviderListEntry};
use crate::aws::{AwsError, AwsResult};

pub(crate) const TEST_ARN_PREFIX: &str = "arn:aws:iam::123456789012:saml-provider/";

/// A recorded client call
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    List,
    Get(String),
    Create(String),
    Update(String),
    Delete(String),
}

impl Call {
    fn is_mutation(&self) -> bool {
        matches!(self, Self::Create(_) | Self::Update(_) | Self::Delete(_))
    }
}

#[derive(Debug, Default)]
struct State {
    // (arn, metadata) in list order
    providers: Vec<(String, String)>,
    calls: Vec<Call>,
    failures: Vec<(Call, AwsError)>,
}

/// Client that keeps providers in memory, records every call and can be told
/// to fail a specific call
#[derive(Debug, Default)]
pub(crate) struct InMemoryProviderClient {
    state: Mutex<State>,
}

impl InMemoryProviderClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_provider(self, name: &str, metadata: &str) -> Self {
        self.with_raw_entry(&format!("{TEST_ARN_PREFIX}{name}"), metadata)
    }

    pub(crate) fn with_raw_entry(self, arn: &str, metadata: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .providers
            .push((arn.to_string(), metadata.to_string()));
        self
    }

    pub(crate) fn fail_on(self, call: Call, error: AwsError) -> Self {
        self.state.lock().unwrap().failures.push((call, error));
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub(crate) fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    fn record(state: &mut State, call: Call) -> AwsResult<()> {
        state.calls.push(call.clone());
        match state.failures.iter().find(|(failing, _)| *failing == call) {
            Some((_, error)) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn no_such_entity(arn: &str) -> AwsError {
        AwsError::remote("NoSuchEntity", format!("SAML provider {arn} does not exist."))
    }
}

#[async_trait]
impl IdentityProviderClient for InMemoryProviderClient {
    async fn list_providers(&self) -> AwsResult<Vec<ProviderListEntry>> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, Call::List)?;
        Ok(state
            .providers
            .iter()
            .map(|(arn, _)| ProviderListEntry::new(arn.clone()))
            .collect())
    }

    async fn get_provider(&self, arn: &str) -> AwsResult<ProviderDocument> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, Call::Get(arn.to_string()))?;
        state
            .providers
            .iter()
            .find(|(stored, _)| stored == arn)
            .map(|(_, metadata)| ProviderDocument {
                metadata_document: metadata.clone(),
            })
            .ok_or_else(|| Self::no_such_entity(arn))
    }

    async fn create_provider(&self, name: &str, metadata_document: &str) -> AwsResult<String> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, Call::Create(name.to_string()))?;
        let arn = format!("{TEST_ARN_PREFIX}{name}");
        if state.providers.iter().any(|(stored, _)| *stored == arn) {
            return Err(AwsError::remote(
                "EntityAlreadyExists",
                format!("SAML provider {name} already exists."),
            ));
        }
        state
            .providers
            .push((arn.clone(), metadata_document.to_string()));
        Ok(arn)
    }

    async fn update_provider(&self, arn: &str, metadata_document: &str) -> AwsResult<String> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, Call::Update(arn.to_string()))?;
        let entry = state
            .providers
            .iter_mut()
            .find(|(stored, _)| stored == arn)
            .ok_or_else(|| Self::no_such_entity(arn))?;
        entry.1 = metadata_document.to_string();
        Ok(arn.to_string())
    }

    async fn delete_provider(&self, arn: &str) -> AwsResult<()> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, Call::Delete(arn.to_string()))?;
        let before = state.providers.len();
        state.providers.retain(|(stored, _)| stored != arn);
        if state.providers.len() == before {
            return Err(Self::no_such_entity(arn));
        }
        Ok(())
    }
}
