//! Shared domain types and configuration for the carefinder workspace.
//!
//! Holds the facility catalog record shapes, the triage request/result types,
//! and the environment-driven application configuration. No I/O happens here;
//! the catalog and triage crates consume these types.

use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod facility;
pub mod triage;

pub use app_config::{AppConfig, Environment, MatcherKind};
pub use config::{load_app_config, load_app_config_from_env};
pub use facility::{Coordinate, CoordinateField, Facility, HoursToday, ServiceCategory, ServiceValue};
pub use triage::{
    MatchOutcome, ProcessedFacility, ServiceRequirement, TriageRequest, TriageResult,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
