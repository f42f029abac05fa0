use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::SearchError;

pub const SAMPLE_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRecord {
    pub country: Value,
    pub year: Value,
    pub value: Value,
    pub gender: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorReport {
    pub indicator: String,
    pub records_found: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_data: Option<Vec<IndicatorRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IndicatorReport {
    fn failed(indicator: &str, error: impl Into<String>) -> Self {
        Self {
            indicator: indicator.to_string(),
            records_found: 0,
            sample_data: None,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// WHO Global Health Observatory client.
#[derive(Debug, Clone)]
pub struct HealthStatsClient {
    http: Client,
    base_url: String,
}

impl HealthStatsClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SearchError> {
        let http = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(6))
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Never fails: transport and decoding problems land in `error`.
    pub async fn indicator(&self, code: &str, filter: Option<&str>) -> IndicatorReport {
        match self.fetch(code, filter).await {
            Ok(body) => summarize(code, &body),
            Err(error) => {
                warn!(indicator = %code, error = %error, "health statistics request failed");
                IndicatorReport::failed(code, format!("API request failed: {error}"))
            }
        }
    }

    pub async fn country(&self, iso3: &str, code: &str) -> IndicatorReport {
        let filter = country_filter(iso3);
        self.indicator(code, Some(&filter)).await
    }

    async fn fetch(&self, code: &str, filter: Option<&str>) -> Result<Value, SearchError> {
        let mut url = format!("{}/{}", self.base_url, code.trim());
        if let Some(filter) = filter.map(str::trim).filter(|value| !value.is_empty()) {
            url.push('?');
            url.push_str(filter);
        }

        let response = self.http.get(url).send().await?;
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
}

pub fn country_filter(iso3: &str) -> String {
    format!(
        "$filter=SpatialDim eq '{}'",
        iso3.trim().to_uppercase().replace('\'', "")
    )
}

pub fn summarize(code: &str, body: &Value) -> IndicatorReport {
    let records = body
        .get("value")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    if records.is_empty() {
        return IndicatorReport {
            indicator: code.to_string(),
            records_found: 0,
            sample_data: None,
            message: Some("No data available for this indicator".to_string()),
            error: None,
        };
    }

    let sample = records
        .iter()
        .take(SAMPLE_LIMIT)
        .map(|record| IndicatorRecord {
            country: field_or_na(record, "SpatialDim"),
            year: field_or_na(record, "TimeDim"),
            value: field_or_na(record, "NumericValue"),
            gender: field_or_na(record, "Dim1"),
        })
        .collect();

    IndicatorReport {
        indicator: code.to_string(),
        records_found: records.len(),
        sample_data: Some(sample),
        message: None,
        error: None,
    }
}

fn field_or_na(record: &Value, key: &str) -> Value {
    match record.get(key) {
        Some(Value::Null) | None => Value::String("N/A".to_string()),
        Some(value) => value.clone(),
    }
}
