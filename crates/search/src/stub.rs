use std::sync::Arc;

use advisor_core::DetailLevel;
use parking_lot::Mutex;

use crate::{QueryService, SearchError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedQuery {
    pub query: String,
    pub detail: DetailLevel,
}

#[derive(Debug, Clone)]
enum StubReply {
    Fixed(String),
    Echo,
    Fail(String),
}

/// Deterministic in-process query service. Records every call it receives.
#[derive(Debug, Clone)]
pub struct StubSearch {
    reply: StubReply,
    calls: Arc<Mutex<Vec<RecordedQuery>>>,
}

impl StubSearch {
    pub fn fixed(answer: impl Into<String>) -> Self {
        Self::with_reply(StubReply::Fixed(answer.into()))
    }

    /// Answers with the detail level and query it was given.
    pub fn echo() -> Self {
        Self::with_reply(StubReply::Echo)
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(StubReply::Fail(message.into()))
    }

    fn with_reply(reply: StubReply) -> Self {
        Self {
            reply,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<RecordedQuery> {
        self.calls.lock().clone()
    }

    pub fn last_call(&self) -> Option<RecordedQuery> {
        self.calls.lock().last().cloned()
    }
}

impl QueryService for StubSearch {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn search(&self, query: &str, detail: DetailLevel) -> Result<String, SearchError> {
        self.calls.lock().push(RecordedQuery {
            query: query.to_string(),
            detail,
        });

        match &self.reply {
            StubReply::Fixed(answer) => Ok(answer.clone()),
            StubReply::Echo => Ok(format!("[{detail}] {query}")),
            StubReply::Fail(message) => Err(SearchError::Stub(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_calls_in_order() {
        let stub = StubSearch::fixed("ok");
        stub.search("first", DetailLevel::Critical).await.unwrap();
        stub.search("second", DetailLevel::Detailed).await.unwrap();

        let calls = stub.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].query, "first");
        assert_eq!(calls[1].detail, DetailLevel::Detailed);
    }

    #[tokio::test]
    async fn echo_and_failure_modes() {
        let echo = StubSearch::echo();
        assert_eq!(
            echo.search("q", DetailLevel::Critical).await.unwrap(),
            "[critical] q"
        );

        let failing = StubSearch::failing("quota exceeded");
        let error = failing.search("q", DetailLevel::Detailed).await.unwrap_err();
        assert_eq!(error.to_string(), "quota exceeded");
        assert_eq!(failing.calls().len(), 1);
    }
}
