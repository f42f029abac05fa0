use crate::classify::Country;

pub fn hospitals_for(country: &str) -> Vec<&'static str> {
    match Country::resolve(country) {
        Some(Country::UnitedStates) => vec![
            "Mayo Clinic",
            "Cleveland Clinic",
            "Johns Hopkins Hospital",
        ],
        Some(Country::India) => vec!["Apollo Hospitals", "Fortis Healthcare", "AIIMS Delhi"],
        Some(Country::UnitedKingdom) => vec![
            "St Thomas' Hospital",
            "Royal London Hospital",
            "Addenbrooke's Hospital",
        ],
        Some(Country::Germany) => vec![
            "Charité – Universitätsmedizin Berlin",
            "University Hospital Heidelberg",
            "LMU Klinikum Munich",
        ],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_aliases() {
        assert_eq!(hospitals_for("USA"), hospitals_for("United States"));
        assert_eq!(hospitals_for("india")[0], "Apollo Hospitals");
    }

    #[test]
    fn unknown_country_is_empty() {
        assert!(hospitals_for("Atlantis").is_empty());
    }
}
