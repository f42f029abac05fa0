use advisor_core::{is_domestic, AgentKind, DetailLevel, TravelerProfile};
use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::{Agent, QueryPlan, QUERY_SEPARATOR};

const CRITICAL_STAY_DAYS: u32 = 5;

/// Live disruption, safety and diplomatic alerts for the destination.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewsAlertAgent {
    as_of: Option<NaiveDate>,
}

impl NewsAlertAgent {
    /// Pins the month mentioned in queries instead of reading the clock.
    pub fn as_of(date: NaiveDate) -> Self {
        Self { as_of: Some(date) }
    }

    fn current_month(&self) -> String {
        let date = self.as_of.unwrap_or_else(|| Local::now().date_naive());
        date.format("%B %Y").to_string()
    }
}

impl Agent for NewsAlertAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::NewsAlert
    }

    fn plan(&self, profile: &TravelerProfile) -> QueryPlan {
        let location = profile.location();
        let city = profile.city().unwrap_or_default();
        let country = profile.country().unwrap_or_default();
        let nationality = profile.nationality().unwrap_or_default();
        let month = self.current_month();

        let mut queries = vec![format!(
            "Active travel disruptions in {location} during {month}. \
             Search for: 'Transport strikes scheduled in {location}', \
             'Severe weather warnings for {city} next 7 days', \
             'Flight cancellations {country} recent news'."
        )];

        let mut safety = format!(
            "Recent safety incidents in {location} business districts last 30 days. \
             Check for: 'Protests in {city}', 'Civil unrest alerts {country}', \
             'Crime spike downtown {city}'."
        );
        if profile.is_female() {
            safety.push_str(&format!(
                " focus on 'Safety alerts for women in {city}', \
                 'Recent incidents involving female travelers in {country}'."
            ));
        }
        queries.push(safety);

        let domestic = is_domestic(profile.nationality(), profile.country());
        if !domestic {
            queries.push(format!(
                "Political tension between {nationality} and {country} currently. \
                 Latest Embassy travel advisory for {nationality} citizens in {country}."
            ));
        }

        let query = queries.join(QUERY_SEPARATOR);
        debug!(agent = "news_alert", domestic, query = %query, "real-time scan query");

        QueryPlan::search(
            query,
            DetailLevel::for_stay(profile.stay(), CRITICAL_STAY_DAYS),
        )
    }
}
