use crate::error::PlanError;
use crate::models::{Attraction, DayPlan, Hotel, Itinerary, Restaurant, TripRequest};
use crate::selection::CandidateSets;

pub const NO_RESTAURANTS: &str = "No restaurants available";
pub const NO_HOTELS: &str = "No hotels available";

const NOT_AVAILABLE: &str = "Not Available";
const NOT_RATED: &str = "Not Rated";

/// Walks the trip day by day, drawing two attractions per day and one
/// restaurant and hotel, all by cyclic index so short pools wrap around
/// instead of running dry.
pub fn assemble(request: &TripRequest, candidates: &CandidateSets<'_>) -> Result<Itinerary, PlanError> {
    let attractions = &candidates.attractions;
    if attractions.is_empty() {
        return Err(PlanError::EmptyAttractionPool {
            city: request.city.name().to_string(),
        });
    }
    let hotels = &candidates.hotels;
    let restaurants = &candidates.restaurants;

    let mut days = Vec::with_capacity(request.days as usize);
    for day in 1..=request.days {
        let d = day as usize;
        let morning = attractions[(2 * d - 2) % attractions.len()];
        let afternoon = attractions[(2 * d - 1) % attractions.len()];

        let dinner = if restaurants.is_empty() {
            NO_RESTAURANTS.to_string()
        } else {
            render_restaurant(restaurants[(d - 1) % restaurants.len()])
        };
        let hotel = if hotels.is_empty() {
            NO_HOTELS.to_string()
        } else {
            render_hotel(hotels[(d - 1) % hotels.len()])
        };

        days.push(DayPlan {
            day,
            morning: render_attraction(morning),
            afternoon: render_attraction(afternoon),
            dinner,
            hotel,
        });
    }

    Ok(Itinerary { days })
}

fn render_attraction(attraction: &Attraction) -> String {
    format!(
        "{} ({}) – {}",
        attraction.name, attraction.category, attraction.description
    )
}

fn render_restaurant(restaurant: &Restaurant) -> String {
    format!(
        "{} 🍴 {} | ⭐ {} ({} reviews) | 💰 {} AED for 2 people",
        text_or(restaurant.name.as_deref(), NOT_AVAILABLE),
        text_or(restaurant.cuisines.as_deref(), NOT_AVAILABLE),
        text_or(restaurant.rating.as_deref(), NOT_RATED),
        text_or(restaurant.votes.as_deref(), "0"),
        cost_for_two(restaurant.average_cost_for_two),
    )
}

fn render_hotel(hotel: &Hotel) -> String {
    format!(
        "{} ⭐ {} | 📞 {} | 🌐 {}",
        text_or(hotel.name.as_deref(), NOT_AVAILABLE),
        star_label(hotel.rating),
        text_or(hotel.phone.as_deref(), "No contact"),
        text_or(hotel.website.as_deref(), "No website listed"),
    )
}

fn star_label(rating: Option<u8>) -> String {
    match rating {
        Some(stars) => format!("{stars}-Star"),
        None => NOT_RATED.to_string(),
    }
}

fn cost_for_two(cost: Option<f32>) -> String {
    match cost {
        Some(value) => format!("{value}"),
        None => "N/A".to_string(),
    }
}

fn text_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => fallback.to_string(),
    }
}
