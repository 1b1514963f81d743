//! Location text → coordinate resolution with cascading fallbacks.
//!
//! Resolution order, first success wins:
//! 1. ZIP lookup against the precomputed table (authoritative and fastest).
//! 2. A small fixed table of major service-area cities.
//! 3. Substring search over facility addresses, first hit in catalog order.
//!
//! Failure is not an error; the pipeline simply skips distance ranking.

use std::sync::Arc;

use carefinder_catalog::ZipTable;
use carefinder_core::{Coordinate, Facility};

/// Hardcoded coordinates for major cities in the service area, used when ZIP
/// lookup misses. Keys are pre-normalized (lowercase, no punctuation).
const CITY_COORDINATES: &[(&str, Coordinate)] = &[
    // Washington
    ("everett", Coordinate { lat: 47.9790, lng: -122.2021 }),
    ("seattle", Coordinate { lat: 47.6062, lng: -122.3321 }),
    ("tacoma", Coordinate { lat: 47.2529, lng: -122.4443 }),
    ("spokane", Coordinate { lat: 47.6588, lng: -117.4260 }),
    ("bellingham", Coordinate { lat: 48.7519, lng: -122.4787 }),
    ("olympia", Coordinate { lat: 47.0379, lng: -122.9007 }),
    ("vancouver", Coordinate { lat: 45.6387, lng: -122.6615 }), // Vancouver, WA
    ("kennewick", Coordinate { lat: 46.2112, lng: -119.1372 }),
    ("yakima", Coordinate { lat: 46.6021, lng: -120.5059 }),
    ("lacey", Coordinate { lat: 47.0343, lng: -122.8232 }),
    // Oregon
    ("portland", Coordinate { lat: 45.5152, lng: -122.6784 }),
    ("salem", Coordinate { lat: 44.9429, lng: -123.0351 }),
    ("eugene", Coordinate { lat: 44.0521, lng: -123.0868 }),
    ("medford", Coordinate { lat: 42.3265, lng: -122.8756 }),
    ("bend", Coordinate { lat: 44.0582, lng: -121.3153 }),
    ("corvallis", Coordinate { lat: 44.5646, lng: -123.2620 }),
    ("tigard", Coordinate { lat: 45.4312, lng: -122.7714 }),
    ("beaverton", Coordinate { lat: 45.4871, lng: -122.8037 }),
    ("lake oswego", Coordinate { lat: 45.4207, lng: -122.6706 }),
    // California
    ("los angeles", Coordinate { lat: 34.0522, lng: -118.2437 }),
    ("torrance", Coordinate { lat: 33.8358, lng: -118.3406 }),
    ("carson", Coordinate { lat: 33.8317, lng: -118.2820 }),
    ("santa rosa", Coordinate { lat: 38.4404, lng: -122.7141 }),
    ("petaluma", Coordinate { lat: 38.2324, lng: -122.6367 }),
];

/// Resolves free-text locations (ZIP codes or city names) to coordinates.
pub struct Geocoder {
    zip_table: Arc<ZipTable>,
}

impl Geocoder {
    #[must_use]
    pub fn new(zip_table: Arc<ZipTable>) -> Self {
        Geocoder { zip_table }
    }

    /// Resolves a location string, trying ZIP, known cities, then facility
    /// addresses in that order. Returns `None` when nothing matches.
    ///
    /// The address fallback returns the *first* facility in catalog order
    /// whose address contains the input — a known imprecision kept for
    /// behavioral fidelity with the catalog feed it was tuned against.
    #[must_use]
    pub fn resolve(&self, location: &str, facilities: &[Facility]) -> Option<Coordinate> {
        let location = location.trim();
        if location.is_empty() {
            return None;
        }

        // Strategy 1: ZIP code, after stripping any "-####" suffix.
        let clean_zip: String = location
            .split('-')
            .next()
            .unwrap_or_default()
            .chars()
            .take(5)
            .collect();
        if clean_zip.len() == 5 && clean_zip.chars().all(|c| c.is_ascii_digit()) {
            if let Some(coord) = self.zip_table.get(&clean_zip) {
                tracing::debug!(zip = %clean_zip, "geocoded via ZIP table");
                return Some(coord);
            }
        }

        // Strategy 2: known service-area cities.
        let normalized = normalize_city(location);
        if let Some((city, coord)) = CITY_COORDINATES
            .iter()
            .find(|(city, _)| *city == normalized)
        {
            tracing::debug!(%city, "geocoded via city table");
            return Some(*coord);
        }

        // Strategy 3: substring search over facility addresses.
        let search_term = strip_punctuation(&location.to_lowercase());
        for facility in facilities {
            let address = facility.address_plain.to_lowercase();
            if address.contains(&normalized) || address.contains(&search_term) {
                if let Some(coord) = facility.coordinate() {
                    tracing::debug!(facility = %facility.name, "geocoded via address match");
                    return Some(coord);
                }
            }
        }

        tracing::debug!(%location, "could not geocode location");
        None
    }
}

fn strip_punctuation(s: &str) -> String {
    s.replace(',', "").replace('.', "")
}

/// Normalizes a city name for the fixed-table lookup: lowercase, strip
/// commas/periods, then remove `" wa"`, `" or"`, and `" ca"` substrings.
///
/// The state-suffix removal is a lossy heuristic — a city whose name embeds
/// one of those letter pairs after a space would mis-normalize. Kept as-is;
/// it is a best-effort shortcut, not a gazetteer.
fn normalize_city(location: &str) -> String {
    strip_punctuation(&location.to_lowercase())
        .replace(" wa", "")
        .replace(" or", "")
        .replace(" ca", "")
        .trim()
        .to_string()
}
