use std::{fs::File, io::Read, path::Path};

use serde::Deserialize;
use shared::{Coordinate, GeocodeResult, LocationSuggestion, RouteResult, polyline};

use crate::error::FixtureError;

pub const MAX_SUGGESTIONS: usize = 5;
pub const MIN_SUGGESTION_QUERY: usize = 3;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Place {
    pub display_name: String,
    pub lat: f64,
    pub lng: f64,
}

impl Place {
    /// Case-insensitive match on the leading name ("Chicago" for
    /// "Chicago, IL, USA"), on leading comma-separated parts
    /// ("Chicago, IL") or on the whole display name.
    pub fn matches(&self, address: &str) -> bool {
        let wanted = address.trim().to_lowercase();
        if wanted.is_empty() {
            return false;
        }
        let full = self.display_name.to_lowercase();
        let head = full.split(',').next().unwrap_or_default().trim();
        head == wanted || full == wanted || full.starts_with(&format!("{wanted},"))
    }

    fn to_geocode(&self) -> GeocodeResult {
        GeocodeResult {
            display_name: self.display_name.clone(),
            lat: self.lat,
            lng: self.lng,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FixtureFile {
    #[serde(default)]
    places: Vec<Place>,
    route: RouteResult,
}

/// Canned places and the route served for every resolvable trip.
#[derive(Debug, Clone)]
pub struct FixtureStore {
    places: Vec<Place>,
    route: RouteResult,
}

impl FixtureStore {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, FixtureError> {
        let fixture: FixtureFile = serde_json::from_reader(reader)?;
        Ok(Self::new(fixture.places, fixture.route))
    }

    pub fn new(places: Vec<Place>, mut route: RouteResult) -> Self {
        if route.polyline.is_empty() {
            let points: Vec<Coordinate> = route
                .stops
                .iter()
                .map(|stop| stop.location.coordinate())
                .collect();
            route.polyline = polyline::encode(&points);
        }
        Self { places, route }
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn route(&self) -> &RouteResult {
        &self.route
    }

    pub fn geocode(&self, address: &str) -> Option<GeocodeResult> {
        self.places
            .iter()
            .find(|place| place.matches(address))
            .map(Place::to_geocode)
    }

    pub fn suggestions(&self, query: &str) -> Vec<LocationSuggestion> {
        let query = query.trim().to_lowercase();
        if query.chars().count() < MIN_SUGGESTION_QUERY {
            return Vec::new();
        }
        self.places
            .iter()
            .filter(|place| place.display_name.to_lowercase().contains(&query))
            .take(MAX_SUGGESTIONS)
            .map(|place| LocationSuggestion {
                display_name: place.display_name.clone(),
                lat: Some(place.lat),
                lng: Some(place.lng),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use proptest::prelude::*;

    use super::*;

    const SAMPLE: &str = include_str!("../data/sample_fixture.json");

    fn store() -> FixtureStore {
        FixtureStore::from_reader(SAMPLE.as_bytes()).expect("sample fixture")
    }

    #[test]
    fn matches_leading_name_or_full_display_name() {
        let place = Place {
            display_name: "Chicago, IL, USA".into(),
            lat: 41.88,
            lng: -87.63,
        };
        assert!(place.matches("chicago"));
        assert!(place.matches("Chicago, IL"));
        assert!(place.matches("  CHICAGO, il, usa "));
        assert!(!place.matches("Chicago, TX"));
        assert!(!place.matches("Chic"));
        assert!(!place.matches(""));
    }

    #[test]
    fn geocode_misses_unknown_places() {
        let store = store();
        assert!(store.geocode("Atlantis").is_none());
        let found = store.geocode("Indianapolis").expect("known place");
        assert!(found.display_name.starts_with("Indianapolis"));
    }

    #[test]
    fn suggestions_need_three_characters_and_cap_at_five() {
        let store = store();
        assert!(store.suggestions("ch").is_empty());
        let hits = store.suggestions("chi");
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|hit| hit.display_name.to_lowercase().contains("chi")));

        let many: Vec<Place> = (0..8)
            .map(|i| Place {
                display_name: format!("Springfield {i}, USA"),
                lat: 39.0,
                lng: -89.0,
            })
            .collect();
        let crowded = FixtureStore::new(many, store.route().clone());
        assert_eq!(crowded.suggestions("spring").len(), MAX_SUGGESTIONS);
    }

    #[test]
    fn missing_polyline_is_encoded_from_stops() {
        let mut route = store().route().clone();
        route.polyline.clear();
        let filled = FixtureStore::new(Vec::new(), route.clone());
        let decoded = polyline::decode(&filled.route().polyline).expect("valid path");
        assert_eq!(decoded.len(), route.stops.len());
        for (point, stop) in decoded.iter().zip(&route.stops) {
            assert!((point.lat - stop.location.lat).abs() < 1e-5);
            assert!((point.lng - stop.location.lng).abs() < 1e-5);
        }
    }

    #[test]
    fn loads_from_file_and_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let loaded = FixtureStore::from_file(file.path()).unwrap();
        assert_eq!(loaded.places().len(), store().places().len());

        let err = FixtureStore::from_reader("{\"places\": []}".as_bytes()).unwrap_err();
        assert!(matches!(err, FixtureError::Parse(_)));
        let err = FixtureStore::from_file("/nonexistent/fixture.json").unwrap_err();
        assert!(matches!(err, FixtureError::Io(_)));
    }

    proptest! {
        #[test]
        fn suggestions_always_contain_the_query(query in "[a-zA-Z ,]{0,12}") {
            let hits = store().suggestions(&query);
            let needle = query.trim().to_lowercase();
            prop_assert!(hits.len() <= MAX_SUGGESTIONS);
            if needle.chars().count() < MIN_SUGGESTION_QUERY {
                prop_assert!(hits.is_empty());
            }
            for hit in hits {
                prop_assert!(hit.display_name.to_lowercase().contains(&needle));
            }
        }
    }
}
