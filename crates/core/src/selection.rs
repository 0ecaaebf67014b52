use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::PlanError;
use crate::models::{Attraction, Hotel, PreferenceTag, Restaurant, TripRequest};

/// Per-request views over the catalog: city-scoped, shuffled, then adjusted
/// for preferences and budget. Discarded after the itinerary is assembled.
#[derive(Debug)]
pub struct CandidateSets<'a> {
    pub attractions: Vec<&'a Attraction>,
    pub hotels: Vec<&'a Hotel>,
    pub restaurants: Vec<&'a Restaurant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetTier {
    Low,
    Mid,
    High,
}

impl BudgetTier {
    pub fn for_amount(amount: u32) -> Self {
        if amount <= 2000 {
            Self::Low
        } else if amount <= 5000 {
            Self::Mid
        } else {
            Self::High
        }
    }

    fn admits_hotel(self, hotel: &Hotel) -> bool {
        // Unrated records never match a tier.
        let Some(rating) = hotel.rating else {
            return false;
        };
        match self {
            Self::Low => rating <= 3,
            Self::Mid => rating > 3 && rating <= 4,
            Self::High => rating > 4,
        }
    }

    fn admits_restaurant(self, restaurant: &Restaurant) -> bool {
        let Some(cost) = restaurant.average_cost_for_two else {
            return false;
        };
        match self {
            Self::Low => cost <= 150.0,
            Self::Mid => cost > 150.0 && cost <= 300.0,
            Self::High => cost > 300.0,
        }
    }
}

pub fn select_candidates<'a, R>(
    attractions: &'a [Attraction],
    hotels: &'a [Hotel],
    restaurants: &'a [Restaurant],
    request: &TripRequest,
    rng: &mut R,
) -> Result<CandidateSets<'a>, PlanError>
where
    R: Rng + ?Sized,
{
    let city = request.city.name();

    let mut attractions: Vec<&Attraction> = attractions
        .iter()
        .filter(|a| a.city.eq_ignore_ascii_case(city))
        .collect();
    if attractions.is_empty() {
        return Err(PlanError::EmptyAttractionPool {
            city: city.to_string(),
        });
    }

    let mut hotels: Vec<&Hotel> = hotels
        .iter()
        .filter(|h| h.city.eq_ignore_ascii_case(city))
        .collect();
    let mut restaurants: Vec<&Restaurant> = restaurants
        .iter()
        .filter(|r| r.city.eq_ignore_ascii_case(city))
        .collect();

    attractions.shuffle(rng);
    hotels.shuffle(rng);
    restaurants.shuffle(rng);

    if !request.preferences.is_empty() {
        attractions = reorder_by_preference(attractions, &request.preferences);
    }

    if let Some(amount) = request.budget {
        let tier = BudgetTier::for_amount(amount);
        retain_fail_open(&mut hotels, |h| tier.admits_hotel(h));
        retain_fail_open(&mut restaurants, |r| tier.admits_restaurant(r));
    }

    Ok(CandidateSets {
        attractions,
        hotels,
        restaurants,
    })
}

/// Moves preference-matching attractions to the front, keeping the shuffled
/// order within each half, and drops duplicate venue names. A query whose
/// preferences match nothing leaves the order untouched.
fn reorder_by_preference<'a>(
    shuffled: Vec<&'a Attraction>,
    preferences: &[PreferenceTag],
) -> Vec<&'a Attraction> {
    if !shuffled.iter().any(|a| matches_preference(a, preferences)) {
        return shuffled;
    }

    let (preferred, rest): (Vec<&Attraction>, Vec<&Attraction>) = shuffled
        .into_iter()
        .partition(|a| matches_preference(a, preferences));

    let mut seen = HashSet::new();
    preferred
        .into_iter()
        .chain(rest)
        .filter(|a| seen.insert(a.name.as_str()))
        .collect()
}

fn matches_preference(attraction: &Attraction, preferences: &[PreferenceTag]) -> bool {
    preferences
        .iter()
        .any(|tag| attraction.category.eq_ignore_ascii_case(tag.keyword()))
}

/// Keeps only admitted records unless that would leave nothing, in which
/// case the broader set survives.
fn retain_fail_open<T>(records: &mut Vec<&T>, admit: impl Fn(&T) -> bool) {
    let filtered: Vec<&T> = records.iter().copied().filter(|r| admit(r)).collect();
    if !filtered.is_empty() {
        *records = filtered;
    }
}
