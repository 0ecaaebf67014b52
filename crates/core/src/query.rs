use regex::Regex;

use crate::models::{City, Currency, ParsedQuery, PreferenceTag};

pub fn normalize_text(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Extraction of structured trip constraints from free text. Alternative
/// strategies (e.g. an LLM-backed extractor) plug in behind this seam.
pub trait QueryParser: Send + Sync {
    fn parse(&self, text: &str) -> ParsedQuery;
}

#[derive(Clone)]
pub struct RegexQueryParser {
    trip_length: Regex,
    budget: Regex,
}

impl RegexQueryParser {
    pub fn new() -> Self {
        Self {
            trip_length: Regex::new(r"(?i)(\d+)\s*[- ]?\s*(day|days|night|nights)")
                .expect("valid trip length regex"),
            budget: Regex::new(r"(?i)(?:under|budget|cost|price)\s*(\d+)\s*(AED|Dhs|\$|USD)?")
                .expect("valid budget regex"),
        }
    }

    fn extract_days(&self, text: &str) -> Option<u32> {
        let caps = self.trip_length.captures(text)?;
        let value: u32 = caps.get(1)?.as_str().parse().ok()?;
        let unit = caps.get(2)?.as_str().to_lowercase();
        // N nights means N + 1 days on the ground.
        if unit.starts_with("night") {
            value.checked_add(1)
        } else {
            Some(value)
        }
    }

    fn extract_budget(&self, text: &str) -> (Option<u32>, Option<Currency>) {
        let Some(caps) = self.budget.captures(text) else {
            return (None, None);
        };
        let Some(amount) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) else {
            return (None, None);
        };
        let currency = caps
            .get(2)
            .and_then(|m| Currency::from_token(m.as_str()))
            .unwrap_or(Currency::Aed);
        (Some(amount), Some(currency))
    }
}

impl Default for RegexQueryParser {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryParser for RegexQueryParser {
    fn parse(&self, text: &str) -> ParsedQuery {
        let text = normalize_text(text);
        let (budget, currency) = self.extract_budget(&text);
        ParsedQuery {
            city: City::detect(&text),
            days: self.extract_days(&text),
            budget,
            currency,
            preferences: PreferenceTag::scan(&text),
        }
    }
}
