// src/services/species_chat.rs
use std::sync::Arc;

use tracing::{error, warn};

use crate::config::ChatSettings;
use crate::services::completion::{CompletionProvider, CompletionRequest, PromptMessage, Role};
use crate::services::metrics_manager::ChatOutcome;

/// Keeps the assistant on animal and species topics. This is only an
/// instruction to the model; replies are not checked locally.
pub const SYSTEM_INSTRUCTION: &str = "You are a specialized chatbot that only answers questions about animals, species, wildlife, and biodiversity. You can discuss:

- Animal habitats, diets, and behaviors
- Conservation status and threats
- Species characteristics and adaptations
- Animal facts and scientific information
- Comparisons between different species
- Wildlife biology and ecology

If a user asks about anything unrelated to animals or species (like technology, cooking, politics, etc.), politely respond that you only handle species-related queries and ask them to ask about animals instead.

Keep your responses informative, accurate, and engaging. Use markdown formatting when appropriate for better readability.";

pub const EMPTY_INPUT_REPLY: &str = "Please ask me a question about animals or species!";
pub const EMPTY_GENERATION_REPLY: &str =
    "I couldn't generate a response. Please try asking your question again.";
pub const UPSTREAM_FALLBACK_REPLY: &str = "I'm having trouble processing your request right now. Please try again in a moment, or ask me about a different animal species!";

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub outcome: ChatOutcome,
}

impl Reply {
    fn new(text: impl Into<String>, outcome: ChatOutcome) -> Self {
        Self { text: text.into(), outcome }
    }
}

/// Turns one user question into one assistant reply. Holds no conversation
/// state; the provider handle is shared across requests.
#[derive(Clone)]
pub struct SpeciesChat {
    provider: Arc<dyn CompletionProvider>,
    settings: ChatSettings,
}

impl SpeciesChat {
    pub fn new(provider: Arc<dyn CompletionProvider>, settings: ChatSettings) -> Self {
        Self { provider, settings }
    }

    pub fn build_request(&self, message: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.settings.model.clone(),
            messages: vec![
                PromptMessage::new(Role::System, SYSTEM_INSTRUCTION),
                PromptMessage::new(Role::User, message.trim()),
            ],
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        }
    }

    /// Always yields non-empty text. Provider failures are logged and
    /// replaced by a fallback reply.
    pub async fn generate_response(&self, message: &str) -> Reply {
        if message.trim().is_empty() {
            return Reply::new(EMPTY_INPUT_REPLY, ChatOutcome::Rejected);
        }

        let request = self.build_request(message);
        match self.provider.complete(&request).await {
            Ok(Some(text)) => Reply::new(text, ChatOutcome::Answered),
            Ok(None) => {
                warn!(model = %request.model, "completion provider returned no content");
                Reply::new(EMPTY_GENERATION_REPLY, ChatOutcome::EmptyGeneration)
            }
            Err(err) => {
                error!(error = %err, "error generating response");
                Reply::new(UPSTREAM_FALLBACK_REPLY, ChatOutcome::UpstreamFallback)
            }
        }
    }
}

impl std::fmt::Debug for SpeciesChat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeciesChat")
            .field("settings", &self.settings)
            .finish()
    }
}
