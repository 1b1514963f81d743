//! Read-only facility catalog record shapes.
//!
//! These mirror the upstream catalog JSON (`{"locations": [...]}`). Unknown
//! fields are ignored and most fields are defaulted so that sparse catalog
//! entries deserialize without errors — the triage engine treats missing data
//! as "degrade gracefully", never as a hard failure.

use serde::{Deserialize, Serialize};

/// A resolved geographic point in decimal degrees.
///
/// Both components are always present. Catalog entries with a partial or
/// missing coordinate pair never produce a `Coordinate` (see
/// [`Facility::coordinate`]), so distance math never sees half a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Raw coordinate field as it appears in the catalog feed.
///
/// Upstream sometimes ships `null` for one or both components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinateField {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

/// A single named service value inside a category, e.g. `{"val": "X-Ray"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceValue {
    #[serde(default)]
    pub val: String,
}

/// A named group of service values, e.g. `"other"` or `"conditions treated"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCategory {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub values: Vec<ServiceValue>,
}

/// Today's opening window for a facility.
///
/// Either `is_24_hours` is set, or `start`/`end` carry clock strings in
/// `"H:MM am|pm"` form. Any other shape degrades to "Hours unavailable"
/// in the hours evaluator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoursToday {
    #[serde(default, rename = "is24hours")]
    pub is_24_hours: bool,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

/// One care facility record from the read-only catalog.
///
/// `id` is opaque and may repeat across catalog entries; the pipeline
/// collapses duplicates by `id` first and by `name` second. Booking and
/// display fields (`phone`, `url`, `image`, ratings) pass through the engine
/// unmodified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address_plain: String,
    #[serde(default)]
    pub coordinates: Option<CoordinateField>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub rating_value: Option<f64>,
    #[serde(default)]
    pub rating_count: Option<u32>,
    #[serde(default)]
    pub hours_today: Option<HoursToday>,
    #[serde(default)]
    pub is_express_care: bool,
    #[serde(default)]
    pub is_urgent_care: bool,
    #[serde(default)]
    pub services: Vec<ServiceCategory>,
}

impl Facility {
    /// Returns the facility's coordinate only when both components are
    /// present. Entries with partial coordinates cannot get a distance.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        let field = self.coordinates.as_ref()?;
        match (field.lat, field.lng) {
            (Some(lat), Some(lng)) => Some(Coordinate { lat, lng }),
            _ => None,
        }
    }

    /// Returns `true` if any service category carries at least one value.
    #[must_use]
    pub fn has_service_data(&self) -> bool {
        self.services.iter().any(|c| !c.values.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_requires_both_components() {
        let mut facility = Facility {
            coordinates: Some(CoordinateField {
                lat: Some(47.6),
                lng: None,
            }),
            ..Facility::default()
        };
        assert!(facility.coordinate().is_none());

        facility.coordinates = Some(CoordinateField {
            lat: Some(47.6),
            lng: Some(-122.3),
        });
        let coord = facility.coordinate().unwrap();
        assert!((coord.lat - 47.6).abs() < f64::EPSILON);
        assert!((coord.lng - -122.3).abs() < f64::EPSILON);
    }

    #[test]
    fn coordinate_none_when_field_absent() {
        let facility = Facility::default();
        assert!(facility.coordinate().is_none());
    }

    #[test]
    fn deserializes_sparse_catalog_entry() {
        let raw = r#"{"id": "loc-1", "name": "Swedish Express Care"}"#;
        let facility: Facility = serde_json::from_str(raw).unwrap();
        assert_eq!(facility.id, "loc-1");
        assert_eq!(facility.name, "Swedish Express Care");
        assert!(facility.coordinates.is_none());
        assert!(facility.services.is_empty());
        assert!(!facility.is_urgent_care);
    }

    #[test]
    fn deserializes_full_catalog_entry() {
        let raw = r#"{
            "id": "loc-2",
            "name": "Everett Walk-In Clinic",
            "address_plain": "1700 13th St, Everett, WA 98201",
            "coordinates": {"lat": 47.979, "lng": -122.2021},
            "phone": "(425) 555-0100",
            "rating_value": 4.5,
            "rating_count": 120,
            "hours_today": {"is24hours": false, "start": "8:00 am", "end": "5:00 pm"},
            "is_urgent_care": true,
            "services": [
                {"name": "other", "values": [{"val": "X-Ray"}, {"val": "Lab services"}]}
            ]
        }"#;
        let facility: Facility = serde_json::from_str(raw).unwrap();
        assert!(facility.coordinate().is_some());
        assert!(facility.is_urgent_care);
        assert!(facility.has_service_data());
        let hours = facility.hours_today.unwrap();
        assert!(!hours.is_24_hours);
        assert_eq!(hours.start.as_deref(), Some("8:00 am"));
    }

    #[test]
    fn hours_today_24h_flag_uses_wire_name() {
        let raw = r#"{"is24hours": true}"#;
        let hours: HoursToday = serde_json::from_str(raw).unwrap();
        assert!(hours.is_24_hours);
        assert!(hours.start.is_none());
    }

    #[test]
    fn has_service_data_false_for_empty_categories() {
        let facility = Facility {
            services: vec![ServiceCategory {
                name: "other".to_string(),
                values: vec![],
            }],
            ..Facility::default()
        };
        assert!(!facility.has_service_data());
    }
}
