mod rows;

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use rihla_core::{Attraction, Hotel, Restaurant};
use serde::Serialize;

use rows::{AttractionRow, HotelRow, RestaurantRow};

pub const ATTRACTIONS_FILE: &str = "uae_attractions.csv";
pub const HOTELS_FILE: &str = "uae_hotels.csv";
pub const RESTAURANTS_FILE: &str = "uae_restaurants.csv";

/// The three reference datasets, loaded once at startup and shared
/// read-only for the life of the process.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub attractions: Vec<Attraction>,
    pub hotels: Vec<Hotel>,
    pub restaurants: Vec<Restaurant>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub attractions: usize,
    pub hotels: usize,
    pub restaurants: usize,
    pub cities: usize,
}

impl Catalog {
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();

        let attractions = read_rows::<AttractionRow>(&dir.join(ATTRACTIONS_FILE))?
            .into_iter()
            .map(AttractionRow::into_record)
            .collect();
        let hotels = read_rows::<HotelRow>(&dir.join(HOTELS_FILE))?
            .into_iter()
            .map(HotelRow::into_record)
            .collect();
        let restaurants = read_rows::<RestaurantRow>(&dir.join(RESTAURANTS_FILE))?
            .into_iter()
            .map(RestaurantRow::into_record)
            .collect();

        Ok(Self {
            attractions,
            hotels,
            restaurants,
        })
    }

    pub fn stats(&self) -> CatalogStats {
        let mut cities: HashSet<String> = HashSet::new();
        cities.extend(self.attractions.iter().map(|a| a.city.to_lowercase()));
        cities.extend(self.hotels.iter().map(|h| h.city.to_lowercase()));
        cities.extend(self.restaurants.iter().map(|r| r.city.to_lowercase()));

        CatalogStats {
            attractions: self.attractions.len(),
            hotels: self.hotels.len(),
            restaurants: self.restaurants.len(),
            cities: cities.len(),
        }
    }
}

fn read_rows<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)
        .with_context(|| format!("failed to open dataset: {}", path.display()))?;

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row.with_context(|| format!("malformed row in {}", path.display()))?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_dir() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data")
    }

    #[test]
    fn loads_the_bundled_datasets() {
        let catalog = Catalog::load_from_dir(fixture_dir()).unwrap();
        assert!(!catalog.attractions.is_empty());
        assert!(!catalog.hotels.is_empty());
        assert!(!catalog.restaurants.is_empty());

        let stats = catalog.stats();
        assert_eq!(stats.attractions, catalog.attractions.len());
        assert!(stats.cities >= 2);
    }

    #[test]
    fn hotel_star_labels_become_numeric_ratings() {
        let catalog = Catalog::load_from_dir(fixture_dir()).unwrap();
        assert!(catalog
            .hotels
            .iter()
            .any(|h| matches!(h.rating, Some(1..=5))));
    }

    #[test]
    fn dirty_cells_become_none_not_text() {
        let catalog = Catalog::load_from_dir(fixture_dir()).unwrap();
        for restaurant in &catalog.restaurants {
            if let Some(name) = &restaurant.name {
                assert!(!name.trim().is_empty());
                assert!(!name.eq_ignore_ascii_case("nan"));
            }
            if let Some(cost) = restaurant.average_cost_for_two {
                assert!(cost.is_finite());
            }
        }
    }

    #[test]
    fn missing_directory_is_a_readable_error() {
        let err = Catalog::load_from_dir("does/not/exist").unwrap_err();
        assert!(err.to_string().contains("uae_attractions.csv"));
    }
}
