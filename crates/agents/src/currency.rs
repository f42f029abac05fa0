use advisor_core::{AgentKind, DetailLevel, TravelerProfile};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::{Agent, Finish, QueryPlan};

pub const DEFAULT_CURRENCY: &str = "USD";

static CURRENCY_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z]{3}").expect("currency pattern is valid"));

/// Looks up the ISO 4217 code for the traveler's home currency.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrencyAgent;

impl Agent for CurrencyAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Currency
    }

    fn plan(&self, profile: &TravelerProfile) -> QueryPlan {
        let query = format!(
            "What is the official currency code (like USD, EUR, INR, etc.) for a person whose nationality is '{}'? Only return the ISO currency code.",
            profile.nationality().unwrap_or_default()
        );
        debug!(agent = "currency", query = %query, "generated query");

        QueryPlan::Search {
            query,
            detail: DetailLevel::Critical,
            finish: Finish::CurrencyCode,
        }
    }
}

/// First three-capital run in the answer other than the word "ISO".
pub fn extract_currency_code(answer: &str) -> String {
    CURRENCY_CODE
        .find_iter(answer)
        .map(|found| found.as_str())
        .find(|code| *code != "ISO")
        .unwrap_or(DEFAULT_CURRENCY)
        .to_string()
}
