//! Service matching strategies.
//!
//! Keyword matching is the default and always available. Embedding-backed
//! matching is opt-in via configuration and falls back to keyword matching
//! on any internal failure, so enabling it can only add matches.

pub mod embedding;
pub mod keyword;

use std::collections::BTreeSet;

use carefinder_core::{AppConfig, Facility, MatchOutcome, MatcherKind, ServiceRequirement};

pub use embedding::EmbeddingMatcher;

/// Strategy for matching a facility's service catalog against a reason.
pub enum MatcherStrategy {
    Keyword,
    Embedding(EmbeddingMatcher),
}

impl MatcherStrategy {
    /// Builds the strategy selected by configuration.
    ///
    /// An `Embedding` selection without an endpoint URL degrades to keyword
    /// matching; config validation normally rejects that combination before
    /// it gets here.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        match (config.matcher, config.embedding_url.as_deref()) {
            (MatcherKind::Embedding, Some(url)) => {
                tracing::info!(%url, "semantic matching enabled");
                MatcherStrategy::Embedding(EmbeddingMatcher::new(url))
            }
            (MatcherKind::Embedding, None) => {
                tracing::warn!("no embedding endpoint configured, using keyword matching");
                MatcherStrategy::Keyword
            }
            (MatcherKind::Keyword, _) => MatcherStrategy::Keyword,
        }
    }

    /// Matches one facility against the reason text.
    ///
    /// The embedding path tries semantic similarity first and falls back to
    /// the keyword chain when the endpoint errors or nothing clears the
    /// similarity threshold.
    pub async fn matches(&self, facility: &Facility, reason: &str) -> MatchOutcome {
        if let MatcherStrategy::Embedding(matcher) = self {
            match matcher.best_match(facility, reason).await {
                Ok(Some(description)) => {
                    return MatchOutcome::hit(format!("Semantic match: {description}"));
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "semantic matching failed, falling back to keywords");
                }
            }
        }
        keyword::matches_reason(facility, reason)
    }

    /// True iff the facility satisfies every required service term.
    ///
    /// Always evaluated with the keyword chain: explicit filters are exact
    /// user intent and must behave identically across strategies.
    #[must_use]
    pub fn offers_all(&self, facility: &Facility, required_services: &[String]) -> bool {
        keyword::offers_all(facility, required_services)
    }

    /// Strict capability check for an inferred requirement.
    #[must_use]
    pub fn has_service(&self, facility: &Facility, requirement: ServiceRequirement) -> bool {
        keyword::has_service(facility, requirement)
    }
}

/// Flattens every service value across every facility into a deduplicated,
/// case-preserving, alphabetically sorted list. Advertised to callers so
/// they can supply explicit service filters.
#[must_use]
pub fn available_services(facilities: &[Facility]) -> Vec<String> {
    let set: BTreeSet<&str> = facilities
        .iter()
        .flat_map(|f| &f.services)
        .flat_map(|cat| &cat.values)
        .map(|item| item.val.trim())
        .filter(|val| !val.is_empty())
        .collect();
    set.into_iter().map(str::to_string).collect()
}
