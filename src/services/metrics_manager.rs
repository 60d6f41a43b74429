use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsData {
    pub chat_requests: u64,
    pub rejected_requests: u64,
    pub answered: u64,
    pub empty_generations: u64,
    pub upstream_fallbacks: u64,
    pub generation_failures: u64,
}

/// How a single chat request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatOutcome {
    Rejected,
    Answered,
    EmptyGeneration,
    UpstreamFallback,
    GenerationFailed,
}

#[derive(Debug, Clone)]
pub struct MetricsManager {
    inner: Arc<RwLock<MetricsData>>,
}

impl Default for MetricsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MetricsData::default())),
        }
    }

    pub async fn record(&self, outcome: ChatOutcome) {
        let mut data = self.inner.write().await;
        data.chat_requests += 1;
        let counter = match outcome {
            ChatOutcome::Rejected => &mut data.rejected_requests,
            ChatOutcome::Answered => &mut data.answered,
            ChatOutcome::EmptyGeneration => &mut data.empty_generations,
            ChatOutcome::UpstreamFallback => &mut data.upstream_fallbacks,
            ChatOutcome::GenerationFailed => &mut data.generation_failures,
        };
        *counter += 1;
    }

    pub async fn get_metrics(&self) -> MetricsData {
        self.inner.read().await.clone()
    }
}
