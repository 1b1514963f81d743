//! Triage & matching engine.
//!
//! Turns a free-text reason for seeking care and a free-text location into
//! either an emergency safety directive or a ranked, deduplicated list of
//! nearby facilities. The decision chain: emergency red-flag detection first
//! (terminal on a hit), then service-requirement inference, geocoding with
//! cascading fallbacks, per-facility fuzzy service matching and open-hours
//! evaluation, and finally the filter→rank→dedup→truncate pipeline.
//!
//! Every failure mode in this crate degrades to a defined fallback value
//! (no distance, "Hours unavailable", empty catalog) rather than erroring —
//! the one exception is the emergency path, which is checked first and
//! unconditionally.

pub mod emergency;
pub mod error;
pub mod geo;
pub mod geocode;
pub mod hours;
pub mod matcher;
pub mod pipeline;
pub mod requirements;

pub use error::TriageError;
pub use geocode::Geocoder;
pub use matcher::{EmbeddingMatcher, MatcherStrategy};
pub use pipeline::{TriageEngine, DEFAULT_RESULT_LIMIT};
