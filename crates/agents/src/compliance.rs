use advisor_core::{is_domestic, AgentKind, DetailLevel, TravelerProfile};
use tracing::debug;

use crate::{Agent, QueryPlan, QUERY_SEPARATOR};

const DOMESTIC_LONG_STAY_DAYS: u32 = 30;
const INTERNATIONAL_LONG_STAY_DAYS: u32 = 90;

/// Entry, visa, labour-law and medical compliance.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplianceAgent;

impl Agent for ComplianceAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Compliance
    }

    fn plan(&self, profile: &TravelerProfile) -> QueryPlan {
        let nationality = profile.nationality().unwrap_or_default();
        let country = profile.country().unwrap_or_default();
        let days = profile.stay_days();
        let domestic = is_domestic(profile.nationality(), profile.country());

        let mut queries = Vec::new();

        if domestic {
            let base = format!(
                "Official domestic travel compliance rules for {nationality} citizen traveling to {}. \
                 IGNORE visa, immigration, and work permits. ",
                profile.location()
            );
            if days < DOMESTIC_LONG_STAY_DAYS {
                queries.push(format!(
                    "{base}Focus on: Accepted Government ID proofs for airport/hotel (Aadhar/DL), \
                     GST invoice requirements for hotel business stays, \
                     and any state-specific entry permits (e.g. Inner Line Permit if applicable)."
                ));
            } else {
                queries.push(format!(
                    "{base}Focus on: Long-term rental agreement norms for visitors, \
                     local business registration requirements if setting up an office."
                ));
            }
        } else {
            let base = format!(
                "Official business travel compliance for {nationality} citizen entering {country}. "
            );
            if days < INTERNATIONAL_LONG_STAY_DAYS {
                queries.push(format!(
                    "{base}Focus on: Business Visa requirements for {days} days stay, \
                     Invitation letter requirements, Passport validity rules (6 months rule), \
                     and Return ticket requirements."
                ));
            } else {
                queries.push(format!(
                    "{base}CRITICAL: Check Tax Residency rules (183-day rule) for {country}, \
                     Long-term Work Permit (not Business Visa) requirements, \
                     Social Security contribution mandates for expats."
                ));
            }
        }

        if let Some(condition) = profile.health() {
            queries.push(format!(
                "Airport security and customs regulations for carrying {condition} medicines/equipment \
                 (like insulin/syringes) into {country}. Prescription requirements."
            ));
        }

        if profile.is_female() && !domestic {
            queries.push(format!(
                "Female business traveler legal restrictions or dress code laws for {country} business meetings."
            ));
        }

        let query = queries.join(QUERY_SEPARATOR);
        debug!(agent = "compliance", domestic, days, query = %query, "generated query");

        QueryPlan::search(query, DetailLevel::Detailed)
    }
}
