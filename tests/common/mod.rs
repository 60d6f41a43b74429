#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use species_hub::config::ChatSettings;
use species_hub::services::completion::{
    CompletionProvider, CompletionRequest, ProviderError, Role,
};
use species_hub::state::AppState;

/// Answers every question and remembers what it was sent.
#[derive(Default)]
pub struct RecordingProvider {
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl RecordingProvider {
    pub fn last_user_message(&self) -> Option<String> {
        let requests = self.requests.lock().unwrap();
        requests.last().and_then(|req| {
            req.messages
                .iter()
                .find(|m| m.role == Role::User)
                .map(|m| m.content.clone())
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionProvider for RecordingProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(Some("Tigers are carnivores and mostly hunt deer and wild boar.".to_string()))
    }
}

pub struct FailingProvider;

#[async_trait]
impl CompletionProvider for FailingProvider {
    async fn complete(&self, _request: &CompletionRequest) -> Result<Option<String>, ProviderError> {
        Err(ProviderError::Status {
            status: 503,
            body: "upstream connect error".to_string(),
        })
    }
}

pub struct EmptyProvider;

#[async_trait]
impl CompletionProvider for EmptyProvider {
    async fn complete(&self, _request: &CompletionRequest) -> Result<Option<String>, ProviderError> {
        Ok(None)
    }
}

pub struct PanickingProvider;

#[async_trait]
impl CompletionProvider for PanickingProvider {
    async fn complete(&self, _request: &CompletionRequest) -> Result<Option<String>, ProviderError> {
        panic!("provider blew up");
    }
}

pub fn state_with(provider: Arc<dyn CompletionProvider>) -> AppState {
    AppState::new(provider, ChatSettings::default())
}

/// Answers after a fixed delay.
pub struct SlowProvider(pub Duration);

#[async_trait]
impl CompletionProvider for SlowProvider {
    async fn complete(&self, _request: &CompletionRequest) -> Result<Option<String>, ProviderError> {
        tokio::time::sleep(self.0).await;
        Ok(Some("Some tortoises live for more than a century.".to_string()))
    }
}
