//! The triage pipeline: emergency short-circuit, then
//! filter → rank → dedup → truncate over the facility catalog.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};

use carefinder_catalog::{CatalogClient, FacilityCatalog, ZipTable};
use carefinder_core::{AppConfig, Coordinate, Facility, ProcessedFacility, TriageRequest, TriageResult};

use crate::error::TriageError;
use crate::geocode::Geocoder;
use crate::matcher::{self, MatcherStrategy};
use crate::{emergency, geo, hours, requirements};

/// Maximum number of facilities in a triage result.
pub const DEFAULT_RESULT_LIMIT: usize = 7;

/// The engine owns the immutable catalog, the geocoder, and the matching
/// strategy; each `run` allocates only request-local data.
pub struct TriageEngine {
    catalog: FacilityCatalog,
    geocoder: Geocoder,
    matcher: MatcherStrategy,
    result_limit: usize,
}

impl TriageEngine {
    #[must_use]
    pub fn new(
        catalog: FacilityCatalog,
        zip_table: Arc<ZipTable>,
        matcher: MatcherStrategy,
        result_limit: usize,
    ) -> Self {
        TriageEngine {
            catalog,
            geocoder: Geocoder::new(zip_table),
            matcher,
            result_limit,
        }
    }

    /// Wires the engine from application configuration: HTTP catalog client,
    /// ZIP table from disk (missing file degrades to an empty table), and
    /// the configured matching strategy.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Catalog`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, TriageError> {
        let client = CatalogClient::new(
            config.catalog_request_timeout_secs,
            &config.catalog_user_agent,
            config.catalog_max_retries,
            config.catalog_retry_backoff_base_secs,
        )?;
        let catalog = FacilityCatalog::new(client, config.catalog_url.clone());
        let zip_table = Arc::new(ZipTable::load_or_empty(&config.zip_table_path));
        let matcher = MatcherStrategy::from_config(config);
        Ok(TriageEngine::new(
            catalog,
            zip_table,
            matcher,
            config.result_limit,
        ))
    }

    /// All unique service values across the catalog, sorted.
    pub async fn available_services(&self) -> Vec<String> {
        let facilities = self.catalog.facilities().await;
        matcher::available_services(&facilities)
    }

    /// Runs one triage query against the current wall clock.
    pub async fn run(&self, request: &TriageRequest) -> TriageResult {
        self.run_at(request, Local::now().naive_local()).await
    }

    /// Runs one triage query with an injected evaluation instant; only the
    /// hours evaluator is time-dependent.
    pub async fn run_at(&self, request: &TriageRequest, now: NaiveDateTime) -> TriageResult {
        // Emergency check comes first, unconditionally. A hit is terminal.
        if let Some(warning) = emergency::detect(&request.reason) {
            tracing::warn!(warning, "emergency red flag detected");
            return TriageResult::emergency(warning);
        }

        let detected = requirements::infer_requirements(&request.reason);
        let facilities = self.catalog.facilities().await;

        let origin = if request.location.trim().is_empty() {
            None
        } else {
            self.geocoder.resolve(&request.location, &facilities)
        };

        let processed = match origin {
            Some(origin) => {
                self.ranked_by_distance(&facilities, request, &detected, origin, now)
                    .await
            }
            None => self.catalog_order(&facilities, request, &detected, now).await,
        };

        tracing::debug!(
            matched = processed.len(),
            located = origin.is_some(),
            "triage complete"
        );

        TriageResult {
            is_emergency: false,
            emergency_warning: None,
            detected_requirements: detected,
            resolved_coordinates: origin,
            facilities: processed,
        }
    }

    /// Location-resolved branch: full scan, distance sort, name dedup,
    /// truncate. Facilities without coordinates never appear here.
    async fn ranked_by_distance(
        &self,
        facilities: &[Facility],
        request: &TriageRequest,
        detected: &[carefinder_core::ServiceRequirement],
        origin: Coordinate,
        now: NaiveDateTime,
    ) -> Vec<ProcessedFacility> {
        let mut seen_ids = HashSet::new();
        let mut processed = Vec::new();

        for facility in facilities {
            if !seen_ids.insert(facility.id.clone()) {
                continue;
            }
            let Some(match_reason) = self.filter(facility, request, detected).await else {
                continue;
            };
            let Some(coord) = facility.coordinate() else {
                continue;
            };

            let distance = geo::distance_miles(origin, coord);
            processed.push(self.project(facility, Some(round_tenth(distance)), match_reason, now));
        }

        processed.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        dedup_by_name(&mut processed);
        processed.truncate(self.result_limit);
        processed
    }

    /// Locationless branch: catalog order, no distances, stop at the limit.
    /// Which facilities appear is determined by catalog ordering, not merit.
    async fn catalog_order(
        &self,
        facilities: &[Facility],
        request: &TriageRequest,
        detected: &[carefinder_core::ServiceRequirement],
        now: NaiveDateTime,
    ) -> Vec<ProcessedFacility> {
        let mut seen_ids = HashSet::new();
        let mut seen_names = HashSet::new();
        let mut processed = Vec::new();

        for facility in facilities {
            if !seen_ids.insert(facility.id.clone()) {
                continue;
            }
            let Some(match_reason) = self.filter(facility, request, detected).await else {
                continue;
            };
            if !seen_names.insert(facility.name.clone()) {
                continue;
            }

            processed.push(self.project(facility, None, match_reason, now));
            if processed.len() >= self.result_limit {
                break;
            }
        }

        processed
    }

    /// Per-facility filter chain. First applicable rule wins, all pass/fail:
    /// explicit service filters take priority over reason matching, and
    /// inferred requirements gate the survivors of either.
    ///
    /// Returns the match description on a pass, `None` on a skip.
    async fn filter(
        &self,
        facility: &Facility,
        request: &TriageRequest,
        detected: &[carefinder_core::ServiceRequirement],
    ) -> Option<Option<String>> {
        let match_reason = if request.services.is_empty() {
            let outcome = self.matcher.matches(facility, &request.reason).await;
            if !request.reason.trim().is_empty() && !outcome.matches {
                return None;
            }
            outcome.description
        } else {
            if !self.matcher.offers_all(facility, &request.services) {
                return None;
            }
            Some(format!("Offers: {}", request.services.join(", ")))
        };

        if detected
            .iter()
            .any(|req| !self.matcher.has_service(facility, *req))
        {
            return None;
        }

        Some(match_reason)
    }

    fn project(
        &self,
        facility: &Facility,
        distance: Option<f64>,
        match_reason: Option<String>,
        now: NaiveDateTime,
    ) -> ProcessedFacility {
        let status = hours::open_status_at(facility.hours_today.as_ref(), now);
        ProcessedFacility {
            id: facility.id.clone(),
            name: facility.name.clone(),
            address_plain: facility.address_plain.clone(),
            coordinates: facility.coordinate(),
            distance,
            image: facility.image.clone(),
            phone: facility.phone.clone(),
            url: facility.url.clone(),
            rating_value: facility.rating_value,
            rating_count: facility.rating_count,
            hours_today: facility.hours_today.clone(),
            is_express_care: facility.is_express_care,
            is_urgent_care: facility.is_urgent_care,
            services: facility.services.clone(),
            is_open_now: status.is_open,
            open_status: status.label,
            match_reason,
        }
    }
}

fn round_tenth(miles: f64) -> f64 {
    (miles * 10.0).round() / 10.0
}

fn dedup_by_name(processed: &mut Vec<ProcessedFacility>) {
    let mut seen = HashSet::new();
    processed.retain(|f| seen.insert(f.name.clone()));
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
