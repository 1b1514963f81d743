//! Process-lifetime facility catalog cache.
//!
//! The catalog is fetched at most once per process behind a
//! single-initialization barrier; concurrent cold-start callers share the one
//! in-flight fetch. A fetch failure degrades to an empty catalog — the triage
//! result is advisory, and zero matches beats a propagated network error.

use std::sync::Arc;

use tokio::sync::OnceCell;

use carefinder_core::Facility;

use crate::client::CatalogClient;

/// Read-only, lazily fetched facility catalog shared across requests.
pub struct FacilityCatalog {
    source: Option<(CatalogClient, String)>,
    facilities: OnceCell<Arc<Vec<Facility>>>,
}

impl FacilityCatalog {
    /// A catalog backed by the upstream endpoint, fetched on first access.
    #[must_use]
    pub fn new(client: CatalogClient, catalog_url: impl Into<String>) -> Self {
        FacilityCatalog {
            source: Some((client, catalog_url.into())),
            facilities: OnceCell::new(),
        }
    }

    /// A pre-populated catalog that never touches the network. Used by tests
    /// and any caller that manages its own data loading.
    #[must_use]
    pub fn from_facilities(facilities: Vec<Facility>) -> Self {
        FacilityCatalog {
            source: None,
            facilities: OnceCell::new_with(Some(Arc::new(facilities))),
        }
    }

    /// Returns the cached catalog, fetching it on first call.
    ///
    /// Fail-soft: any fetch error is logged and degrades to an empty catalog.
    /// The error outcome is cached like a success — a broken upstream does
    /// not get hammered once per request.
    pub async fn facilities(&self) -> Arc<Vec<Facility>> {
        let facilities = self
            .facilities
            .get_or_init(|| async {
                match &self.source {
                    Some((client, url)) => match client.fetch_facilities(url).await {
                        Ok(facilities) => {
                            tracing::info!(count = facilities.len(), "loaded facility catalog");
                            Arc::new(facilities)
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "catalog fetch failed — using empty catalog");
                            Arc::new(Vec::new())
                        }
                    },
                    None => Arc::new(Vec::new()),
                }
            })
            .await;
        Arc::clone(facilities)
    }
}
