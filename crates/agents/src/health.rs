use advisor_core::{is_domestic, AgentKind, DetailLevel, TravelerProfile};

use tracing::debug;

use crate::{Agent, QueryPlan};

const CRITICAL_STAY_DAYS: u32 = 10;

#[derive(Debug, Clone, Copy, Default)]
pub struct HealthAgent;

impl Agent for HealthAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Health
    }

    fn plan(&self, profile: &TravelerProfile) -> QueryPlan {
        let detail = DetailLevel::for_stay(profile.stay(), CRITICAL_STAY_DAYS);
        let domestic = is_domestic(profile.nationality(), profile.country());
        let country = profile.country().unwrap_or_default();
        let gender = profile.gender();
        let condition = profile.health();

        let stay = profile
            .stay()
            .map(|days| days.to_string())
            .unwrap_or_else(|| "several".to_string());
        let city = profile
            .city()
            .map(|city| format!("{city}, "))
            .unwrap_or_default();

        let mut query = format!(
            "A {} traveler is visiting {city}{country} for {stay} days.",
            profile.nationality().unwrap_or("foreign")
        );

        if domestic {
            query.push_str(" This is DOMESTIC travel within their home country.");
        } else {
            query.push_str(" This is INTERNATIONAL travel.");
        }

        let mut details = Vec::new();
        let declared_gender = profile
            .gender
            .as_deref()
            .map(|value| value.trim().to_lowercase())
            .filter(|value| matches!(value.as_str(), "female" | "male" | "other"));
        if let Some(declared) = declared_gender {
            details.push(format!("Gender: {declared}"));
        }
        if let Some(condition) = condition {
            details.push(format!("Health condition(s): {condition}"));
        }

        let condition = condition.unwrap_or("no declared conditions");
        match (details.is_empty(), detail) {
            (false, DetailLevel::Critical) => {
                query.push_str(&format!(" Traveler profile: {}.", details.join(", ")));
                query.push_str(&format!(
                    " You are a medical travel advisor. Provide ONLY the most CRITICAL and essential health recommendations for a {gender} traveler with {condition}. \
                     Focus ONLY on: 1) Essential medication needs, 2) Critical dietary warnings, 3) Nearest emergency care, 4) Required vaccinations/documents. \
                     Keep it brief and action-oriented."
                ));
            }
            (false, DetailLevel::Detailed) => {
                query.push_str(&format!(" Traveler profile: {}.", details.join(", ")));
                query.push_str(&format!(
                    " You are a medical travel advisor. ONLY provide practical, actionable, and specific recommendations for a traveler with {condition} who identifies as {gender} visiting {country}. \
                     Do NOT include any generic travel or health advice. \
                     Focus on: 1) Medication and prescription needs, 2) Diet and food safety, 3) Emergency care and hospital access, 4) Vaccination or health documentation, 5) Gender-specific risks or needs, 6) Any travel restrictions or special alerts for this profile. \
                     If there is no special advice for this profile, say 'No special advice for this profile.'"
                ));
            }
            (true, DetailLevel::Critical) => query.push_str(
                " Provide ONLY CRITICAL health information: required vaccinations, health alerts, and emergency contacts. Keep it brief.",
            ),
            (true, DetailLevel::Detailed) => query.push_str(
                " Please provide general health, vaccination, and travel recommendations, risks, and precautions for this traveler.",
            ),
        }

        query.push_str(" Include any region-specific health precautions.");
        debug!(agent = "health", domestic, detail = %detail, query = %query, "generated query");

        QueryPlan::search(query, detail)
    }
}
