use serde::{Deserialize, Serialize};

/// Nightly spend at or below this is treated as a low budget.
pub const LOW_BUDGET_CEILING: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: f64,
    pub max: f64,
}

impl BudgetRange {
    /// Reads every number in free text such as "$0-50", "USD 1,200 - 1,500"
    /// or "under $40". Returns `None` when the text has no number.
    pub fn parse(text: &str) -> Option<Self> {
        let mut numbers = Vec::new();
        let mut current = String::new();

        for ch in text.chars() {
            if ch.is_ascii_digit() || (ch == '.' && !current.is_empty()) {
                current.push(ch);
            } else if ch == ',' && !current.is_empty() {
                continue;
            } else if !current.is_empty() {
                push_number(&mut numbers, &mut current);
            }
        }
        push_number(&mut numbers, &mut current);

        if numbers.is_empty() {
            return None;
        }

        Some(Self {
            min: numbers.iter().copied().fold(f64::INFINITY, f64::min),
            max: numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }

    pub fn is_low(&self) -> bool {
        self.max <= LOW_BUDGET_CEILING
    }
}

fn push_number(numbers: &mut Vec<f64>, current: &mut String) {
    if let Ok(value) = current.trim_end_matches('.').parse::<f64>() {
        numbers.push(value);
    }
    current.clear();
}

pub fn is_low_budget(budget_range: Option<&str>) -> bool {
    budget_range
        .and_then(BudgetRange::parse)
        .is_some_and(|range| range.is_low())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dollar_ranges() {
        let range = BudgetRange::parse("$0-50").unwrap();
        assert_eq!(range.min, 0.0);
        assert_eq!(range.max, 50.0);
        assert!(range.is_low());

        let range = BudgetRange::parse("$200-300").unwrap();
        assert_eq!(range.max, 300.0);
        assert!(!range.is_low());
    }

    #[test]
    fn digits_inside_larger_numbers_are_not_low() {
        assert!(!is_low_budget(Some("$140")));
        assert!(!is_low_budget(Some("240 per night")));
        assert!(!is_low_budget(Some("$1,300")));
    }

    #[test]
    fn single_low_values() {
        assert!(is_low_budget(Some("under $40")));
        assert!(is_low_budget(Some("30")));
        assert!(is_low_budget(Some("$50")));
    }

    #[test]
    fn missing_or_wordy_budget_is_not_low() {
        assert!(!is_low_budget(None));
        assert!(!is_low_budget(Some("cheap")));
    }
}
