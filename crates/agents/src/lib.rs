mod accommodation;
mod compliance;
mod currency;
mod emergency_contact;
mod health;
mod language_guide;
mod news_alert;
mod orchestrator;
mod travel;

use advisor_core::{AgentKind, DetailLevel, TravelerProfile};

pub use accommodation::{AccommodationAgent, LOW_BUDGET_NOTE};
pub use compliance::ComplianceAgent;
pub use currency::{extract_currency_code, CurrencyAgent, DEFAULT_CURRENCY};
pub use emergency_contact::EmergencyContactAgent;
pub use health::HealthAgent;
pub use language_guide::{CultureMode, LanguageGuideAgent};
pub use news_alert::NewsAlertAgent;
pub use orchestrator::{Orchestrator, SERVICE_ERROR_PREFIX};
pub use travel::{TravelAgent, MISSING_COUNTRY_MESSAGE};

/// Joins the sub-queries of agents that ask several things at once.
pub const QUERY_SEPARATOR: &str = " | ";

/// Turns a traveler profile into the query sent to the search service.
///
/// Planning is pure: the same profile always yields the same plan.
pub trait Agent: Send + Sync {
    fn kind(&self) -> AgentKind;
    fn plan(&self, profile: &TravelerProfile) -> QueryPlan;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finish {
    Verbatim,
    Prefixed(String),
    CurrencyCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPlan {
    Search {
        query: String,
        detail: DetailLevel,
        finish: Finish,
    },
    /// Returned to the caller as-is, without contacting the service.
    Answer(String),
}

impl QueryPlan {
    pub fn search(query: String, detail: DetailLevel) -> Self {
        Self::Search {
            query,
            detail,
            finish: Finish::Verbatim,
        }
    }

    pub fn query(&self) -> Option<&str> {
        match self {
            Self::Search { query, .. } => Some(query),
            Self::Answer(_) => None,
        }
    }

    pub fn detail(&self) -> Option<DetailLevel> {
        match self {
            Self::Search { detail, .. } => Some(*detail),
            Self::Answer(_) => None,
        }
    }
}

pub fn default_agents() -> Vec<Box<dyn Agent>> {
    vec![
        Box::new(ComplianceAgent),
        Box::new(HealthAgent),
        Box::new(TravelAgent),
        Box::new(AccommodationAgent),
        Box::new(NewsAlertAgent::default()),
        Box::new(LanguageGuideAgent),
        Box::new(EmergencyContactAgent),
        Box::new(CurrencyAgent),
    ]
}
