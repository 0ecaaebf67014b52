use serde::{Deserialize, Serialize};

use crate::error::PlanError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    Dubai,
    #[serde(rename = "Abu Dhabi")]
    AbuDhabi,
    Sharjah,
    Ajman,
    Fujairah,
    #[serde(rename = "Ras Al Khaimah")]
    RasAlKhaimah,
    #[serde(rename = "Umm Al Quwain")]
    UmmAlQuwain,
}

impl City {
    // Detection priority order: earlier entries win when a query mentions
    // more than one city.
    pub const ALL: [City; 7] = [
        City::Dubai,
        City::AbuDhabi,
        City::Sharjah,
        City::Ajman,
        City::Fujairah,
        City::RasAlKhaimah,
        City::UmmAlQuwain,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Dubai => "Dubai",
            Self::AbuDhabi => "Abu Dhabi",
            Self::Sharjah => "Sharjah",
            Self::Ajman => "Ajman",
            Self::Fujairah => "Fujairah",
            Self::RasAlKhaimah => "Ras Al Khaimah",
            Self::UmmAlQuwain => "Umm Al Quwain",
        }
    }

    /// First known city mentioned anywhere in the text, case-insensitive.
    pub fn detect(text: &str) -> Option<Self> {
        let haystack = text.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|city| haystack.contains(&city.name().to_lowercase()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "AED")]
    Aed,
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    /// Folds symbols and local aliases onto canonical codes.
    pub fn from_token(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "AED" | "DHS" => Some(Self::Aed),
            "$" | "USD" => Some(Self::Usd),
            _ => None,
        }
    }

    pub fn as_code(self) -> &'static str {
        match self {
            Self::Aed => "AED",
            Self::Usd => "USD",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferenceTag {
    Culture,
    Food,
    Shopping,
    Adventure,
    Nature,
    Beach,
    Museum,
    Luxury,
    #[serde(rename = "theme park")]
    ThemePark,
}

impl PreferenceTag {
    pub const VOCABULARY: [PreferenceTag; 9] = [
        PreferenceTag::Culture,
        PreferenceTag::Food,
        PreferenceTag::Shopping,
        PreferenceTag::Adventure,
        PreferenceTag::Nature,
        PreferenceTag::Beach,
        PreferenceTag::Museum,
        PreferenceTag::Luxury,
        PreferenceTag::ThemePark,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Culture => "culture",
            Self::Food => "food",
            Self::Shopping => "shopping",
            Self::Adventure => "adventure",
            Self::Nature => "nature",
            Self::Beach => "beach",
            Self::Museum => "museum",
            Self::Luxury => "luxury",
            Self::ThemePark => "theme park",
        }
    }

    /// Every vocabulary word present in the text, in vocabulary order.
    pub fn scan(text: &str) -> Vec<Self> {
        let haystack = text.to_lowercase();
        Self::VOCABULARY
            .into_iter()
            .filter(|tag| haystack.contains(tag.keyword()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedQuery {
    pub city: Option<City>,
    pub days: Option<u32>,
    pub budget: Option<u32>,
    pub currency: Option<Currency>,
    pub preferences: Vec<PreferenceTag>,
}

impl ParsedQuery {
    /// Validates the parse outcome into a request the planner can rely on:
    /// a known city and at least one day, checked up front.
    pub fn into_request(self) -> Result<TripRequest, PlanError> {
        let city = self.city.ok_or(PlanError::UnrecognizedCity)?;
        let days = match self.days {
            Some(days) if days >= 1 => days,
            _ => return Err(PlanError::MissingTripLength),
        };
        Ok(TripRequest {
            city,
            days,
            budget: self.budget,
            currency: self.currency,
            preferences: self.preferences,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    pub city: City,
    pub days: u32,
    pub budget: Option<u32>,
    pub currency: Option<Currency>,
    pub preferences: Vec<PreferenceTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    pub city: String,
    pub name: String,
    pub category: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub city: String,
    pub name: Option<String>,
    pub rating: Option<u8>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub city: String,
    pub name: Option<String>,
    pub cuisines: Option<String>,
    pub rating: Option<String>,
    pub votes: Option<String>,
    pub average_cost_for_two: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: u32,
    pub morning: String,
    pub afternoon: String,
    pub dinner: String,
    pub hotel: String,
}

impl DayPlan {
    pub fn label(&self) -> String {
        format!("Day {}", self.day)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary {
    pub days: Vec<DayPlan>,
}

impl Itinerary {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
