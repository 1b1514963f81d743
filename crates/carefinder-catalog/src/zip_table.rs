//! ZIP→coordinate lookup table.
//!
//! Loaded once from a precomputed JSON dataset of the shape
//! `{"97202": [45.48, -122.65], ...}`. The table is immutable after load and
//! shared by reference across requests.

use std::collections::HashMap;
use std::path::Path;

use carefinder_core::Coordinate;

use crate::error::CatalogError;

/// Immutable ZIP code → coordinate mapping.
#[derive(Debug, Default)]
pub struct ZipTable {
    coords: HashMap<String, Coordinate>,
}

impl ZipTable {
    /// An empty table; every lookup misses.
    #[must_use]
    pub fn empty() -> Self {
        ZipTable::default()
    }

    /// Build a table from in-memory entries. Used by tests and fixtures.
    #[must_use]
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Coordinate)>,
        S: Into<String>,
    {
        ZipTable {
            coords: entries
                .into_iter()
                .map(|(zip, coord)| (zip.into(), coord))
                .collect(),
        }
    }

    /// Load the table from a JSON dataset file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ZipTableIo`] if the file cannot be read and
    /// [`CatalogError::ZipTableParse`] if it is not the expected JSON shape.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::ZipTableIo {
            path: path.display().to_string(),
            source: e,
        })?;

        let raw: HashMap<String, [f64; 2]> =
            serde_json::from_str(&content).map_err(|e| CatalogError::ZipTableParse {
                path: path.display().to_string(),
                source: e,
            })?;

        Ok(ZipTable {
            coords: raw
                .into_iter()
                .map(|(zip, [lat, lng])| (zip, Coordinate { lat, lng }))
                .collect(),
        })
    }

    /// Load the table, degrading to an empty table on any failure.
    ///
    /// A missing dataset file disables ZIP geocoding but never blocks
    /// startup; the geocoder's later fallback strategies still apply.
    #[must_use]
    pub fn load_or_empty(path: &Path) -> Self {
        match ZipTable::load(path) {
            Ok(table) => {
                tracing::info!(count = table.len(), path = %path.display(), "loaded ZIP table");
                table
            }
            Err(e) => {
                tracing::warn!(error = %e, "ZIP table unavailable — ZIP geocoding disabled");
                ZipTable::empty()
            }
        }
    }

    /// Look up a 5-digit ZIP code.
    #[must_use]
    pub fn get(&self, zip: &str) -> Option<Coordinate> {
        self.coords.get(zip).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn loads_dataset_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"97202": [45.48, -122.65], "98201": [47.979, -122.2021]}}"#
        )
        .unwrap();

        let table = ZipTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        let coord = table.get("97202").unwrap();
        assert!((coord.lat - 45.48).abs() < f64::EPSILON);
        assert!((coord.lng - -122.65).abs() < f64::EPSILON);
        assert!(table.get("00000").is_none());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = ZipTable::load(Path::new("/nonexistent/zips.json")).unwrap_err();
        assert!(matches!(err, CatalogError::ZipTableIo { .. }), "{err:?}");
    }

    #[test]
    fn load_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"97202": [45.48]}}"#).unwrap();

        let err = ZipTable::load(file.path()).unwrap_err();
        assert!(
            matches!(err, CatalogError::ZipTableParse { .. }),
            "{err:?}"
        );
    }

    #[test]
    fn load_or_empty_degrades_on_missing_file() {
        let table = ZipTable::load_or_empty(Path::new("/nonexistent/zips.json"));
        assert!(table.is_empty());
    }

    #[test]
    fn from_entries_builds_table() {
        let table = ZipTable::from_entries([(
            "97202",
            Coordinate {
                lat: 45.48,
                lng: -122.65,
            },
        )]);
        assert!(table.get("97202").is_some());
    }
}
