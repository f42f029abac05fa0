use advisor_core::{
    is_developed_destination, is_low_budget, AgentKind, DetailLevel, TravelerProfile,
};
use tracing::debug;

use crate::{Agent, Finish, QueryPlan};

const FEMALE_SAFETY_CRITERIA: &str = "CRITICAL SAFETY CRITERIA: \
    1. Must have 24-hour front desk and security. \
    2. AVOID properties with 'Exterior Corridors' (rooms opening directly to parking lot). \
    3. Prefer hotels with 'Women-only floors' or key-card access elevators. \
    4. Location must be in a safe, busy district, not highway exits.";

const GENERAL_SAFETY_CRITERIA: &str =
    "Ensure property is in a safe area with good transport connectivity.";

pub const LOW_BUDGET_NOTE: &str = "⚠️ **Note:** Your budget is very low for this city. \
    Options may be limited to hostels or motels far from the center.\n\n";

/// Hotel and rental recommendations with a low-budget safety check.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccommodationAgent;

impl Agent for AccommodationAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Accommodation
    }

    fn plan(&self, profile: &TravelerProfile) -> QueryPlan {
        let gender = profile.gender();
        let location = profile.location();
        let city = profile.city().unwrap_or_default();
        let country = profile.country().unwrap_or_default();
        let budget = profile.budget_range().unwrap_or("unspecified");

        let budget_risk =
            is_low_budget(profile.budget_range()) && is_developed_destination(profile.country());

        if profile.is_female() && budget_risk {
            let query = format!(
                "Safety risks of staying in hotels under $50 in {location} for a solo female traveler. \
                 Is it safe to stay in cheap motels in {city}? \
                 Are there any safe hostels with female-only dorms or Airbnb Superhosts in this price range? \
                 Explain why business travelers should increase their budget."
            );
            let banner = format!(
                "⚠️ **CRITICAL BUDGET WARNING:**\n\
                 Your budget ({budget}) is **too low** for a safe business-standard hotel in {country}. \
                 Most options in this range are highway motels or unverified rentals which may pose safety risks (exterior doors, lack of security). \
                 **Recommendation:** Please increase budget to $100+ for safety, or consider the specific hostels/Airbnbs listed below.\n\n"
            );
            debug!(agent = "accommodation", budget_risk, query = %query, "budget warning mode");
            return QueryPlan::Search {
                query,
                detail: DetailLevel::Detailed,
                finish: Finish::Prefixed(banner),
            };
        }

        let safety = if profile.is_female() {
            FEMALE_SAFETY_CRITERIA
        } else {
            GENERAL_SAFETY_CRITERIA
        };
        let query = format!(
            "Recommend top rated safe business accommodation in {location} for a {} {gender} traveler. \
             Purpose: {}. \
             Budget: {budget}. \
             {safety} \
             Prioritize locations near {city} business districts (e.g. Downtown). \
             List 3 specific options with pros/cons.",
            profile.nationality().unwrap_or_default(),
            profile.purpose(),
        );

        let finish = if budget_risk {
            Finish::Prefixed(LOW_BUDGET_NOTE.to_string())
        } else {
            Finish::Verbatim
        };

        QueryPlan::Search {
            query,
            detail: DetailLevel::Detailed,
            finish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traveler(gender: &str, budget: &str, country: &str) -> TravelerProfile {
        TravelerProfile {
            country: Some(country.to_string()),
            city: Some("Chicago".to_string()),
            nationality: Some("Indian".to_string()),
            gender: Some(gender.to_string()),
            budget_range: Some(budget.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn female_low_budget_in_developed_nation_gets_warning() {
        let plan = AccommodationAgent.plan(&traveler("female", "$0-50", "USA"));
        let QueryPlan::Search { query, finish, .. } = plan else {
            panic!("expected a search plan");
        };
        assert!(query.starts_with("Safety risks of staying in hotels under $50 in Chicago, USA"));
        match finish {
            Finish::Prefixed(banner) => {
                assert!(banner.contains("CRITICAL BUDGET WARNING"));
                assert!(banner.contains("Your budget ($0-50)"));
            }
            other => panic!("unexpected finish {other:?}"),
        }
    }

    #[test]
    fn higher_budget_gets_normal_recommendations() {
        let plan = AccommodationAgent.plan(&traveler("female", "$200-300", "USA"));
        let QueryPlan::Search { query, finish, .. } = plan else {
            panic!("expected a search plan");
        };
        assert_eq!(finish, Finish::Verbatim);
        assert!(query.contains("Women-only floors"));
        assert!(query.contains("for a Indian female traveler"));
    }

    #[test]
    fn male_low_budget_gets_soft_note() {
        let plan = AccommodationAgent.plan(&traveler("male", "$0-50", "Germany"));
        let QueryPlan::Search { query, finish, .. } = plan else {
            panic!("expected a search plan");
        };
        assert_eq!(finish, Finish::Prefixed(LOW_BUDGET_NOTE.to_string()));
        assert!(query.starts_with("Recommend top rated safe business accommodation"));
        assert!(query.contains(GENERAL_SAFETY_CRITERIA));
    }

    #[test]
    fn low_budget_outside_developed_list_has_no_banner() {
        let plan = AccommodationAgent.plan(&traveler("female", "$0-50", "India"));
        assert!(matches!(
            plan,
            QueryPlan::Search {
                finish: Finish::Verbatim,
                ..
            }
        ));
    }
}
