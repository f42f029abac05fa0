use advisor_core::{AgentKind, DetailLevel, TravelPersona, TravelerProfile};
use tracing::debug;

use crate::{Agent, QueryPlan};

pub const MISSING_COUNTRY_MESSAGE: &str =
    "Please provide at least a country for travel recommendations.";

struct PersonaStrategy {
    instruction: &'static str,
    commute: &'static str,
    avoid: &'static str,
    priority: &'static str,
}

impl PersonaStrategy {
    fn for_persona(persona: TravelPersona) -> Self {
        match persona {
            TravelPersona::Business => Self {
                instruction: "Act as a Corporate Logistics Manager.",
                commute: "Premium Cabs (Uber Premier/Ola), Metro Rail (fastest route).",
                avoid: "Crowded local buses, shared autos, unmetered taxis, walking in heat.",
                priority: "Punctuality, Traffic Hotspots (e.g. peak hour delays), Proximity to business districts.",
            },
            TravelPersona::Leisure => Self {
                instruction: "Act as a Local Guide.",
                commute: "Tourist buses, Metro, Auto-rickshaws, Walking tours.",
                avoid: "Overpriced private charters.",
                priority: "Scenic routes, connectivity to landmarks, cost-effectiveness.",
            },
        }
    }
}

/// Local commuting and logistics, shaped by persona, safety and health.
#[derive(Debug, Clone, Copy, Default)]
pub struct TravelAgent;

impl Agent for TravelAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Travel
    }

    fn plan(&self, profile: &TravelerProfile) -> QueryPlan {
        if profile.country().is_none() {
            return QueryPlan::Answer(MISSING_COUNTRY_MESSAGE.to_string());
        }

        let purpose = profile.purpose().to_lowercase();
        let gender = profile.gender();
        let persona = TravelPersona::classify(&purpose);
        let strategy = PersonaStrategy::for_persona(persona);

        let mut sections = vec![
            format!(
                "{} Plan commute for a {} {gender} traveler in {} staying {} days for '{purpose}'.",
                strategy.instruction,
                profile.nationality().unwrap_or_default(),
                profile.location(),
                profile.stay_days(),
            ),
            format!("RECOMMEND: {}", strategy.commute),
            format!("AVOID: {}", strategy.avoid),
            format!("FOCUS ON: {}", strategy.priority),
        ];

        if profile.is_female() {
            sections.push(
                "CRITICAL SAFETY FOR FEMALE TRAVELER: \
                 Highlight 'Ladies Coach' availability in Metro/Trains. \
                 Recommend ride-sharing apps with 'Share Ride' features over street-hailing. \
                 Identify safe vs unsafe zones at night."
                    .to_string(),
            );
        }

        if let Some(condition) = profile.health() {
            sections.push(format!(
                "MEDICAL CONDITION ALERT ({}): \
                 Identify nearest top-tier hospitals to business districts. \
                 Advise on carrying food/glucose if traffic jams are common (risk of missed meals). \
                 Check accessibility of transport if relevant.",
                condition.to_lowercase()
            ));
        }

        if let Some(season) = profile.season() {
            sections.push(format!(
                "Considering the season is {season}, warn about specific commute disruptions \
                 (e.g., Monsoon flooding roads, heatwave fatigue)."
            ));
        }

        sections.push(
            "Provide 3 distinct sections: 'Recommended Commute', 'Safety & Health', and 'Traffic/Logistics Alerts'."
                .to_string(),
        );

        let query = sections.join(" ");
        debug!(agent = "travel", persona = ?persona, query = %query, "generated strategy");

        QueryPlan::search(query, DetailLevel::Detailed)
    }
}
