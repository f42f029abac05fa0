use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_STAY_DAYS: u32 = 7;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelerProfile {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub health_conditions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_condition: Option<String>,
    #[serde(default, deserialize_with = "deserialize_stay")]
    pub planned_stay: Option<u32>,
    #[serde(default)]
    pub budget_range: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
}

impl TravelerProfile {
    pub fn country(&self) -> Option<&str> {
        present(&self.country)
    }

    pub fn city(&self) -> Option<&str> {
        present(&self.city)
    }

    pub fn nationality(&self) -> Option<&str> {
        present(&self.nationality)
    }

    pub fn budget_range(&self) -> Option<&str> {
        present(&self.budget_range)
    }

    pub fn season(&self) -> Option<&str> {
        present(&self.season)
    }

    pub fn gender(&self) -> String {
        present(&self.gender)
            .map(str::to_lowercase)
            .unwrap_or_else(|| "male".to_string())
    }

    pub fn is_female(&self) -> bool {
        self.gender() == "female"
    }

    pub fn purpose(&self) -> &str {
        present(&self.purpose).unwrap_or("Business")
    }

    /// Planned stay in days; zero counts as not given.
    pub fn stay(&self) -> Option<u32> {
        self.planned_stay.filter(|days| *days > 0)
    }

    pub fn stay_days(&self) -> u32 {
        self.stay().unwrap_or(DEFAULT_STAY_DAYS)
    }

    /// The declared health condition under either spelling, or `None` when
    /// absent or "none".
    pub fn health(&self) -> Option<&str> {
        present(&self.health_conditions)
            .or_else(|| present(&self.health_condition))
            .filter(|value| !value.eq_ignore_ascii_case("none"))
    }

    /// "City, Country" when a city is known, otherwise just the country.
    pub fn location(&self) -> String {
        match (self.city(), self.country()) {
            (Some(city), Some(country)) => format!("{city}, {country}"),
            (Some(city), None) => city.to_string(),
            (None, Some(country)) => country.to_string(),
            (None, None) => String::new(),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn deserialize_stay<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|v| *v >= 0.0).map(|v| v as u64))
            .map(|days| days.min(u32::MAX as u64) as u32),
        Some(Value::String(text)) => text.trim().parse::<u32>().ok(),
        _ => None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailLevel {
    Critical,
    Detailed,
}

impl DetailLevel {
    /// `Critical` only when a stay is known and shorter than `threshold` days.
    pub fn for_stay(planned_stay: Option<u32>, threshold: u32) -> Self {
        match planned_stay {
            Some(days) if days > 0 && days < threshold => Self::Critical,
            _ => Self::Detailed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Detailed => "detailed",
        }
    }

    pub fn framing(self) -> &'static str {
        match self {
            Self::Critical => {
                "You are a travel and compliance assistant. Provide ONLY the most critical, essential information that a traveler must know. Be concise and focus on must-know facts, requirements, and safety information:"
            }
            Self::Detailed => {
                "You are a travel and compliance assistant. Provide detailed, comprehensive, up-to-date information with all relevant details and recommendations:"
            }
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no agent named {0:?}")]
pub struct UnknownAgent(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Compliance,
    Health,
    Travel,
    Accommodation,
    NewsAlert,
    LanguageGuide,
    EmergencyContact,
    #[serde(rename = "currency_agent")]
    Currency,
}

impl AgentKind {
    pub const ALL: [AgentKind; 8] = [
        Self::Compliance,
        Self::Health,
        Self::Travel,
        Self::Accommodation,
        Self::NewsAlert,
        Self::LanguageGuide,
        Self::EmergencyContact,
        Self::Currency,
    ];

    pub fn parse(value: &str) -> Result<Self, UnknownAgent> {
        match value.trim().to_lowercase().as_str() {
            "compliance" => Ok(Self::Compliance),
            "health" => Ok(Self::Health),
            "travel" => Ok(Self::Travel),
            "accommodation" => Ok(Self::Accommodation),
            "news_alert" => Ok(Self::NewsAlert),
            "language_guide" => Ok(Self::LanguageGuide),
            "emergency_contact" => Ok(Self::EmergencyContact),
            "currency_agent" | "currency" => Ok(Self::Currency),
            _ => Err(UnknownAgent(value.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compliance => "compliance",
            Self::Health => "health",
            Self::Travel => "travel",
            Self::Accommodation => "accommodation",
            Self::NewsAlert => "news_alert",
            Self::LanguageGuide => "language_guide",
            Self::EmergencyContact => "emergency_contact",
            Self::Currency => "currency_agent",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgentOutput {
    Currency { currency: String },
    Text(String),
}

impl AgentOutput {
    pub fn text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Currency { currency } => format!("Currency: {currency}"),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Currency { .. } => None,
        }
    }
}

impl From<String> for AgentOutput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_profile_uses_defaults() {
        let profile = TravelerProfile::default();
        assert_eq!(profile.gender(), "male");
        assert_eq!(profile.purpose(), "Business");
        assert_eq!(profile.stay_days(), 7);
        assert_eq!(profile.health(), None);
        assert_eq!(profile.location(), "");
    }

    #[test]
    fn profile_accepts_loose_json() {
        let profile: TravelerProfile = serde_json::from_value(json!({
            "country": "USA",
            "city": "New York",
            "planned_stay": "12",
            "health_condition": "Diabetes",
            "unrelated": true
        }))
        .unwrap();

        assert_eq!(profile.planned_stay, Some(12));
        assert_eq!(profile.health(), Some("Diabetes"));
        assert_eq!(profile.location(), "New York, USA");
    }

    #[test]
    fn zero_day_stay_is_treated_as_missing() {
        let profile: TravelerProfile =
            serde_json::from_value(json!({ "planned_stay": 0 })).unwrap();

        assert_eq!(profile.stay(), None);
        assert_eq!(profile.stay_days(), 7);
        assert_eq!(DetailLevel::for_stay(Some(0), 10), DetailLevel::Detailed);
        assert_eq!(DetailLevel::for_stay(Some(9), 10), DetailLevel::Critical);
    }

    #[test]
    fn none_health_condition_is_absent() {
        let profile = TravelerProfile {
            health_conditions: Some("None".to_string()),
            ..Default::default()
        };
        assert_eq!(profile.health(), None);
    }

    #[test]
    fn detail_level_threshold_is_strict() {
        assert_eq!(DetailLevel::for_stay(Some(5), 10), DetailLevel::Critical);
        assert_eq!(DetailLevel::for_stay(Some(10), 10), DetailLevel::Detailed);
        assert_eq!(DetailLevel::for_stay(None, 10), DetailLevel::Detailed);
    }

    #[test]
    fn agent_kind_parses_request_names() {
        for kind in AgentKind::ALL {
            assert_eq!(AgentKind::parse(kind.as_str()), Ok(kind));
        }
        assert_eq!(AgentKind::parse(" Currency "), Ok(AgentKind::Currency));
        assert!(AgentKind::parse("unknown_agent").is_err());
        for shorthand in ["news", "language", "emergency"] {
            assert!(AgentKind::parse(shorthand).is_err(), "{shorthand} should not resolve");
        }
    }

    #[test]
    fn currency_output_serializes_as_object() {
        let output = AgentOutput::Currency {
            currency: "INR".to_string(),
        };
        assert_eq!(serde_json::to_value(&output).unwrap(), json!({"currency": "INR"}));
        assert_eq!(
            serde_json::to_value(AgentOutput::Text("hi".into())).unwrap(),
            json!("hi")
        );
    }
}
