//! Triage request and result types.
//!
//! All of these are created and discarded within a single triage call; the
//! engine never mutates a result after construction apart from the one
//! sorting pass over the final facility list.

use serde::{Deserialize, Serialize};

use crate::facility::{Coordinate, HoursToday, ServiceCategory};

/// A capability a facility must offer, inferred from the reason text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceRequirement {
    XRay,
    Lab,
    Procedure,
}

impl ServiceRequirement {
    /// The catalog-facing name of this requirement.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceRequirement::XRay => "x-ray",
            ServiceRequirement::Lab => "lab",
            ServiceRequirement::Procedure => "procedure",
        }
    }
}

impl std::fmt::Display for ServiceRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One triage query.
///
/// An empty `reason` means "match everything"; an empty `location` means no
/// distance sort, first-N catalog order. `services` are explicit caller
/// filters that take priority over reason matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriageRequest {
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub services: Vec<String>,
}

impl TriageRequest {
    #[must_use]
    pub fn new(reason: impl Into<String>, location: impl Into<String>) -> Self {
        TriageRequest {
            reason: reason.into(),
            location: location.into(),
            services: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_services(mut self, services: Vec<String>) -> Self {
        self.services = services;
        self
    }
}

/// Outcome of matching one facility against a reason or filter term.
///
/// The description is for display and audit only; it never feeds back into
/// filtering decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub matches: bool,
    pub description: Option<String>,
}

impl MatchOutcome {
    /// A match with a human-readable description of what matched.
    #[must_use]
    pub fn hit(description: impl Into<String>) -> Self {
        MatchOutcome {
            matches: true,
            description: Some(description.into()),
        }
    }

    /// A match with nothing worth describing (e.g. empty reason).
    #[must_use]
    pub fn hit_unlabeled() -> Self {
        MatchOutcome {
            matches: true,
            description: None,
        }
    }

    /// No match.
    #[must_use]
    pub fn miss() -> Self {
        MatchOutcome {
            matches: false,
            description: None,
        }
    }
}

/// A per-request projection of a facility with computed triage fields.
///
/// `distance` is `None` when no user coordinate was resolved or the facility
/// lacks coordinates. Booking/display fields pass through unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedFacility {
    pub id: String,
    pub name: String,
    pub address_plain: String,
    pub coordinates: Option<Coordinate>,
    /// Miles from the resolved user coordinate, rounded to one decimal.
    pub distance: Option<f64>,
    pub image: Option<String>,
    pub phone: Option<String>,
    pub url: Option<String>,
    pub rating_value: Option<f64>,
    pub rating_count: Option<u32>,
    pub hours_today: Option<HoursToday>,
    pub is_express_care: bool,
    pub is_urgent_care: bool,
    pub services: Vec<ServiceCategory>,
    pub is_open_now: bool,
    pub open_status: String,
    pub match_reason: Option<String>,
}

/// The answer to one triage query.
///
/// When `is_emergency` is set the facility list is always empty and
/// `emergency_warning` carries the safety directive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriageResult {
    pub is_emergency: bool,
    pub emergency_warning: Option<String>,
    pub detected_requirements: Vec<ServiceRequirement>,
    pub resolved_coordinates: Option<Coordinate>,
    pub facilities: Vec<ProcessedFacility>,
}

impl TriageResult {
    /// Terminal emergency result: no facilities, only the warning.
    #[must_use]
    pub fn emergency(warning: impl Into<String>) -> Self {
        TriageResult {
            is_emergency: true,
            emergency_warning: Some(warning.into()),
            detected_requirements: Vec::new(),
            resolved_coordinates: None,
            facilities: Vec::new(),
        }
    }
}
