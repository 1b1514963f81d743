//! External data collaborators for the triage engine.
//!
//! Wraps the upstream facility catalog endpoint in an HTTP client with
//! bounded timeouts and retry, caches the catalog for the process lifetime
//! behind a single-initialization barrier with a fail-soft contract (fetch
//! failure degrades to an empty catalog, never an error surfaced to triage),
//! and loads the precomputed ZIP→coordinate dataset.

pub mod cache;
pub mod client;
pub mod error;
pub mod types;
pub mod zip_table;

mod retry;

pub use cache::FacilityCatalog;
pub use client::CatalogClient;
pub use error::CatalogError;
pub use types::CatalogResponse;
pub use zip_table::ZipTable;
