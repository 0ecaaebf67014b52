use serde::Deserialize;

use rihla_core::{Attraction, Hotel, Restaurant};

// Column names here follow the raw export headers, so the CSVs can be
// swapped for fresh exports without renaming anything.

#[derive(Debug, Deserialize)]
pub(crate) struct AttractionRow {
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Description")]
    pub description: String,
}

impl AttractionRow {
    pub(crate) fn into_record(self) -> Attraction {
        Attraction {
            city: self.city,
            name: self.name,
            category: self.category,
            description: self.description,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct HotelRow {
    #[serde(rename = "cityName")]
    pub city: String,
    #[serde(rename = "HotelName")]
    pub name: String,
    #[serde(rename = "HotelRating")]
    pub rating: String,
    #[serde(rename = "PhoneNumber")]
    pub phone: String,
    #[serde(rename = "HotelWebsiteUrl")]
    pub website: String,
}

impl HotelRow {
    pub(crate) fn into_record(self) -> Hotel {
        Hotel {
            city: self.city,
            name: clean(&self.name),
            rating: star_rating(&self.rating),
            phone: clean(&self.phone),
            website: clean(&self.website),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RestaurantRow {
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Restaurant Name")]
    pub name: String,
    #[serde(rename = "Cuisines")]
    pub cuisines: String,
    #[serde(rename = "Aggregate rating")]
    pub rating: String,
    #[serde(rename = "Votes")]
    pub votes: String,
    #[serde(rename = "Average Cost for two")]
    pub average_cost_for_two: String,
}

impl RestaurantRow {
    pub(crate) fn into_record(self) -> Restaurant {
        Restaurant {
            city: self.city,
            name: clean(&self.name),
            cuisines: clean(&self.cuisines),
            rating: clean(&self.rating),
            votes: clean(&self.votes),
            average_cost_for_two: numeric(&self.average_cost_for_two),
        }
    }
}

/// Null-ish markers left behind by the raw exports become `None`.
pub(crate) fn clean(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("none")
    {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub(crate) fn star_rating(label: &str) -> Option<u8> {
    match label.trim() {
        "OneStar" => Some(1),
        "TwoStar" => Some(2),
        "ThreeStar" => Some(3),
        "FourStar" => Some(4),
        "FiveStar" => Some(5),
        _ => None,
    }
}

pub(crate) fn numeric(value: &str) -> Option<f32> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}
