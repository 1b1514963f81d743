//! Wire shape of the upstream catalog endpoint.

use serde::Deserialize;

use carefinder_core::Facility;

/// Response body of the catalog endpoint: `{"locations": [...]}`.
///
/// A missing `locations` key deserializes to an empty catalog rather than an
/// error, matching the fail-soft contract.
#[derive(Debug, Deserialize)]
pub struct CatalogResponse {
    #[serde(default)]
    pub locations: Vec<Facility>,
}
