pub mod config;
pub mod health_stats;
mod hosted;
mod stub;

use advisor_core::DetailLevel;
use thiserror::Error;

pub use config::LlmConfig;
pub use health_stats::{HealthStatsClient, IndicatorRecord, IndicatorReport};
pub use hosted::HostedSearchClient;
pub use stub::{RecordedQuery, StubSearch};

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search service is not configured: {0}")]
    NotConfigured(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("run ended with status {0}")]
    RunFailed(String),
    #[error("run still pending after {0} polls")]
    PollExhausted(u32),
    #[error("service returned no answer text")]
    EmptyAnswer,
    #[error("{0}")]
    Stub(String),
}

/// Answers a free-text query with a hosted language model.
pub trait QueryService: Send + Sync {
    fn name(&self) -> &'static str;

    async fn search(&self, query: &str, detail: DetailLevel) -> Result<String, SearchError>;
}

#[derive(Debug, Clone)]
pub enum SearchBackend {
    Hosted(HostedSearchClient),
    Stub(StubSearch),
}

impl SearchBackend {
    pub fn hosted(config: LlmConfig) -> Result<Self, SearchError> {
        Ok(Self::Hosted(HostedSearchClient::new(config)?))
    }

    pub fn stub(stub: StubSearch) -> Self {
        Self::Stub(stub)
    }

    /// Hosted when an API key is configured, otherwise an offline echo stub.
    pub fn from_config(config: LlmConfig) -> Result<Self, SearchError> {
        if config.api_key.is_some() {
            Self::hosted(config)
        } else {
            tracing::warn!("ADVISOR_LLM_API_KEY not set; answering with the offline echo service");
            Ok(Self::Stub(StubSearch::echo()))
        }
    }
}

impl QueryService for SearchBackend {
    fn name(&self) -> &'static str {
        match self {
            SearchBackend::Hosted(client) => client.name(),
            SearchBackend::Stub(stub) => stub.name(),
        }
    }

    async fn search(&self, query: &str, detail: DetailLevel) -> Result<String, SearchError> {
        match self {
            SearchBackend::Hosted(client) => client.search(query, detail).await,
            SearchBackend::Stub(stub) => stub.search(query, detail).await,
        }
    }
}
