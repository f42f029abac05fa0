use std::env;
use std::time::Duration;

pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_WHO_BASE_URL: &str = "https://ghoapi.azureedge.net/api";

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub poll_interval: Duration,
    pub max_polls: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_LLM_BASE_URL.to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
            connect_timeout: Duration::from_secs(6),
            timeout: Duration::from_secs(60),
            poll_interval: Duration::from_millis(1_000),
            max_polls: 120,
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_key: env::var("ADVISOR_LLM_API_KEY")
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
            base_url: env::var("ADVISOR_LLM_BASE_URL")
                .ok()
                .map(|value| value.trim().trim_end_matches('/').to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or(defaults.base_url),
            model: env::var("ADVISOR_LLM_MODEL").unwrap_or(defaults.model),
            connect_timeout: defaults.connect_timeout,
            timeout: env_parse::<u64>("ADVISOR_LLM_TIMEOUT_SECONDS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            poll_interval: env_parse::<u64>("ADVISOR_LLM_POLL_INTERVAL_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.poll_interval),
            max_polls: env_parse::<u32>("ADVISOR_LLM_MAX_POLLS")
                .map(|value| value.clamp(1, 10_000))
                .unwrap_or(defaults.max_polls),
        }
    }
}

pub fn who_base_url_from_env() -> String {
    env::var("ADVISOR_WHO_BASE_URL")
        .ok()
        .map(|value| value.trim().trim_end_matches('/').to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_WHO_BASE_URL.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
}
