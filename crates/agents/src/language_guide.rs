use advisor_core::{is_domestic, is_same_language_context, AgentKind, DetailLevel, TravelerProfile};
use serde::Serialize;
use tracing::debug;

use crate::{Agent, QueryPlan};

const CRITICAL_STAY_DAYS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CultureMode {
    CulturalCoaching,
    RegionalNuance,
    Translation,
}

impl CultureMode {
    pub fn classify(profile: &TravelerProfile) -> Self {
        let same_language = is_same_language_context(profile.nationality(), profile.country());
        let domestic = is_domestic(profile.nationality(), profile.country());

        if same_language && !domestic {
            Self::CulturalCoaching
        } else if domestic {
            Self::RegionalNuance
        } else {
            Self::Translation
        }
    }
}

/// Business etiquette, local language and cultural intelligence.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageGuideAgent;

impl Agent for LanguageGuideAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::LanguageGuide
    }

    fn plan(&self, profile: &TravelerProfile) -> QueryPlan {
        let nationality = profile.nationality().unwrap_or("Foreign");
        let country = profile.country().unwrap_or_default();
        let city = profile.city().unwrap_or_default();
        let mode = CultureMode::classify(profile);

        let query = match mode {
            CultureMode::CulturalCoaching => format!(
                "Business etiquette differences between {nationality} and {country} corporate culture. \
                 Local slang words and 'small talk' topics used in {city} business meetings. \
                 Tipping culture in {country} for business dinners and taxis. \
                 What are cultural faux pas or taboos a {nationality} professional should avoid in {country}?"
            ),
            CultureMode::RegionalNuance => format!(
                "Regional business culture in {city} compared to rest of {country}. \
                 Local language greetings or specific cultural norms for doing business in {city}. \
                 Dress code and punctuality expectations in {city} corporate offices."
            ),
            CultureMode::Translation => format!(
                "Essential business phrases in local language of {country} for a {nationality} speaker. \
                 Pronunciation guide for: Greetings, 'Nice to meet you', 'Thank you'. \
                 Key non-verbal communication tips (eye contact, handshakes) in {country}."
            ),
        };

        debug!(agent = "language_guide", mode = ?mode, query = %query, "generated query");

        QueryPlan::search(
            query,
            DetailLevel::for_stay(profile.stay(), CRITICAL_STAY_DAYS),
        )
    }
}
