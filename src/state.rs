// src/state.rs
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::config::{ChatSettings, Config};
use crate::services::catalog::Catalog;
use crate::services::completion::{CompletionProvider, OpenAiClient};
use crate::services::metrics_manager::MetricsManager;
use crate::services::species_chat::SpeciesChat;

pub type SharedState = Arc<AppState>;

#[derive(Debug)]
pub struct AppState {
    pub chat: SpeciesChat,
    pub metrics: MetricsManager,
    pub catalog: Catalog,
    pub animals_csv_path: PathBuf,
    pub admin_api_key: Option<String>,
}

impl AppState {
    pub fn new(provider: Arc<dyn CompletionProvider>, settings: ChatSettings) -> Self {
        Self {
            chat: SpeciesChat::new(provider, settings),
            metrics: MetricsManager::new(),
            catalog: Catalog::default(),
            animals_csv_path: PathBuf::from("public/sample_animals.csv"),
            admin_api_key: None,
        }
    }

    /// Wire the real OpenAI client and load the species snapshot.
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = Arc::new(OpenAiClient::new(
            config.openai_base_url.clone(),
            config.openai_api_key.clone(),
        ));

        Ok(Self::new(provider, config.chat.clone())
            .with_catalog(Catalog::from_json_file(&config.species_catalog_path)?)
            .with_animals_csv(config.animals_csv_path.clone())
            .with_admin_key(config.admin_api_key.clone()))
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_animals_csv(mut self, path: impl Into<PathBuf>) -> Self {
        self.animals_csv_path = path.into();
        self
    }

    pub fn with_admin_key(mut self, key: Option<String>) -> Self {
        self.admin_api_key = key;
        self
    }
}
