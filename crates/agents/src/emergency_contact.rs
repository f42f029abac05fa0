use advisor_core::{is_domestic, AgentKind, DetailLevel, TravelerProfile};
use tracing::debug;

use crate::{Agent, QueryPlan, QUERY_SEPARATOR};

/// Consulate, hospital and police contacts for the destination city.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmergencyContactAgent;

impl Agent for EmergencyContactAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::EmergencyContact
    }

    fn plan(&self, profile: &TravelerProfile) -> QueryPlan {
        let nationality = profile.nationality().unwrap_or("Foreign");
        let city = profile.city().unwrap_or_default();
        let country = profile.country().unwrap_or_default();
        let domestic = is_domestic(profile.nationality(), profile.country());

        let mut queries = Vec::with_capacity(3);

        // Asking for the consulate with jurisdiction over the city avoids
        // embassies in unrelated countries.
        if domestic {
            queries.push(format!(
                "Local emergency services numbers (Police, Fire, Ambulance) in {city}, {country}."
            ));
        } else {
            queries.push(format!(
                "Emergency contact number and address for {nationality} Consulate having jurisdiction over {city}, {country}. \
                 Search for '{nationality} Consulate jurisdiction {city}'."
            ));
        }

        match profile.health() {
            Some(condition) => queries.push(format!(
                "Top-rated emergency hospital and 24-hour pharmacy in {city} for {condition} patients. \
                 Ambulance number for {city}."
            )),
            None => queries.push(format!(
                "General emergency ambulance number and nearest general hospital in {city}."
            )),
        }

        if profile.is_female() {
            queries.push(format!(
                "Women's safety helpline number in {city}, {country}. \
                 Police Non-Emergency number for {city} (for reporting theft/harassment)."
            ));
        } else {
            queries.push(format!(
                "Police Non-Emergency number for {city} (for reporting theft/lost items)."
            ));
        }

        let query = queries.join(QUERY_SEPARATOR);
        debug!(agent = "emergency_contact", domestic, query = %query, "jurisdiction search");

        QueryPlan::search(query, DetailLevel::Detailed)
    }
}
