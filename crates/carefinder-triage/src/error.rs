use thiserror::Error;

use carefinder_catalog::CatalogError;

/// Errors of the triage crate.
///
/// Only `Catalog` can reach a caller, and only from engine construction.
/// Matching errors never do: the embedding matcher swallows them and falls
/// back to keyword matching.
#[derive(Debug, Error)]
pub enum TriageError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("embedding error: {0}")]
    Embedding(String),
}
