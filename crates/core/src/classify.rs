use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Country {
    India,
    UnitedStates,
    UnitedKingdom,
    Germany,
    France,
    China,
    Japan,
    Canada,
    Australia,
    NewZealand,
    Singapore,
    Ireland,
    Italy,
    Spain,
    Mexico,
    Brazil,
    UnitedArabEmirates,
    SaudiArabia,
}

impl Country {
    /// Resolves a country name, abbreviation or demonym. Whole-string match only.
    pub fn resolve(value: &str) -> Option<Self> {
        match normalize(value).as_str() {
            "india" | "indian" | "bharat" => Some(Self::India),
            "usa" | "us" | "u.s." | "u.s.a." | "united states" | "united states of america"
            | "america" | "american" => Some(Self::UnitedStates),
            "uk" | "u.k." | "united kingdom" | "great britain" | "britain" | "england"
            | "british" | "english" => Some(Self::UnitedKingdom),
            "germany" | "german" | "deutschland" => Some(Self::Germany),
            "france" | "french" => Some(Self::France),
            "china" | "chinese" => Some(Self::China),
            "japan" | "japanese" => Some(Self::Japan),
            "canada" | "canadian" => Some(Self::Canada),
            "australia" | "australian" => Some(Self::Australia),
            "new zealand" | "new zealander" | "kiwi" => Some(Self::NewZealand),
            "singapore" | "singaporean" => Some(Self::Singapore),
            "ireland" | "irish" => Some(Self::Ireland),
            "italy" | "italian" => Some(Self::Italy),
            "spain" | "spanish" => Some(Self::Spain),
            "mexico" | "mexican" => Some(Self::Mexico),
            "brazil" | "brazilian" => Some(Self::Brazil),
            "uae" | "united arab emirates" | "emirati" => Some(Self::UnitedArabEmirates),
            "saudi arabia" | "saudi" | "ksa" => Some(Self::SaudiArabia),
            _ => None,
        }
    }

    pub fn is_developed(self) -> bool {
        matches!(
            self,
            Self::UnitedStates | Self::UnitedKingdom | Self::Canada | Self::France | Self::Germany
        )
    }
}

pub fn normalize(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub fn is_domestic(nationality: Option<&str>, country: Option<&str>) -> bool {
    let (Some(nationality), Some(country)) = (nationality, country) else {
        return false;
    };

    let nat = normalize(nationality);
    let cnt = normalize(country);
    if nat.is_empty() || cnt.is_empty() {
        return false;
    }
    if nat == cnt {
        return true;
    }

    match (Country::resolve(&nat), Country::resolve(&cnt)) {
        (Some(home), Some(destination)) => home == destination,
        _ => false,
    }
}

pub fn is_developed_destination(country: Option<&str>) -> bool {
    let Some(country) = country else {
        return false;
    };
    normalize(country) == "london" || Country::resolve(country).is_some_and(Country::is_developed)
}

const ENGLISH_ORIGINS: &[&str] = &["indian", "american", "british", "australian", "canadian"];
const ENGLISH_DESTINATIONS: &[&str] = &[
    "usa",
    "united states",
    "us",
    "uk",
    "united kingdom",
    "australia",
    "canada",
    "new zealand",
];

/// Business English on both sides, so translation would be pointless.
pub fn is_same_language_context(nationality: Option<&str>, country: Option<&str>) -> bool {
    let (Some(nationality), Some(country)) = (nationality, country) else {
        return false;
    };
    let nat = normalize(nationality);
    let cnt = normalize(country);
    ENGLISH_ORIGINS.contains(&nat.as_str()) && ENGLISH_DESTINATIONS.contains(&cnt.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelPersona {
    Business,
    Leisure,
}

impl TravelPersona {
    pub fn classify(purpose: &str) -> Self {
        let lower = purpose.to_lowercase();
        if contains_any(
            &lower,
            &["business", "client", "meeting", "work", "conference"],
        ) {
            Self::Business
        } else {
            Self::Leisure
        }
    }
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}
