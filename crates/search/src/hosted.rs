use advisor_core::DetailLevel;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::LlmConfig;
use crate::{QueryService, SearchError};

/// Client for an OpenAI-compatible Responses API.
#[derive(Debug, Clone)]
pub struct HostedSearchClient {
    http: Client,
    api_key: String,
    config: LlmConfig,
}

impl HostedSearchClient {
    pub fn new(config: LlmConfig) -> Result<Self, SearchError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| SearchError::NotConfigured("ADVISOR_LLM_API_KEY is not set".into()))?;

        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            api_key,
            config,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    async fn create_response(&self, query: &str, detail: DetailLevel) -> Result<Value, SearchError> {
        let payload = json!({
            "model": self.config.model,
            "instructions": detail.framing(),
            "input": query,
        });

        let response = self
            .http
            .post(format!("{}/responses", self.config.base_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        read_json(response).await
    }

    async fn fetch_response(&self, id: &str) -> Result<Value, SearchError> {
        let response = self
            .http
            .get(format!("{}/responses/{}", self.config.base_url, id))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        read_json(response).await
    }

    async fn run_to_completion(&self, mut body: Value) -> Result<Value, SearchError> {
        let mut polls = 0_u32;

        loop {
            match run_status(&body) {
                RunStatus::Completed => return Ok(body),
                RunStatus::Pending => {}
                RunStatus::Failed(status) => return Err(SearchError::RunFailed(status)),
            }

            if polls >= self.config.max_polls {
                return Err(SearchError::PollExhausted(polls));
            }
            let id = body
                .get("id")
                .and_then(Value::as_str)
                .ok_or(SearchError::EmptyAnswer)?
                .to_string();

            tokio::time::sleep(self.config.poll_interval).await;
            polls += 1;
            debug!(response_id = %id, polls, "polling pending response");
            body = self.fetch_response(&id).await?;
        }
    }
}

impl QueryService for HostedSearchClient {
    fn name(&self) -> &'static str {
        "hosted"
    }

    async fn search(&self, query: &str, detail: DetailLevel) -> Result<String, SearchError> {
        debug!(model = %self.config.model, detail = %detail, "hosted search started");
        let created = self.create_response(query, detail).await?;
        let finished = self.run_to_completion(created).await.inspect_err(|error| {
            warn!(error = %error, "hosted search did not complete");
        })?;

        extract_output_text(&finished)
            .filter(|text| !text.trim().is_empty())
            .ok_or(SearchError::EmptyAnswer)
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value, SearchError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SearchError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json().await?)
}

#[derive(Debug, PartialEq, Eq)]
enum RunStatus {
    Completed,
    Pending,
    Failed(String),
}

fn run_status(body: &Value) -> RunStatus {
    match body.get("status").and_then(Value::as_str) {
        None | Some("completed") => RunStatus::Completed,
        Some("queued") | Some("in_progress") => RunStatus::Pending,
        Some(other) => RunStatus::Failed(other.to_string()),
    }
}

pub(crate) fn extract_output_text(payload: &Value) -> Option<String> {
    if let Some(value) = payload.get("output_text").and_then(Value::as_str) {
        return Some(value.to_string());
    }
    let output = payload.get("output")?.as_array()?;
    let mut chunks = Vec::new();
    for item in output {
        if let Some(content) = item.get("content").and_then(Value::as_array) {
            for content_item in content {
                if content_item.get("type").and_then(Value::as_str) == Some("output_text") {
                    if let Some(text) = content_item.get("text").and_then(Value::as_str) {
                        chunks.push(text.to_string());
                    }
                }
            }
        }
    }
    if chunks.is_empty() {
        None
    } else {
        Some(chunks.join("\n\n"))
    }
}
