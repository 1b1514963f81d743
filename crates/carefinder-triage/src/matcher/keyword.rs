//! Keyword service matching with synonym expansion and fuzzy heuristics.
//!
//! The precedence chain inside [`matches_reason`] is a behavioral contract:
//! empty reason → very-general phrase → token overlap → substring →
//! 4-char prefix → general-term fallback → incomplete-data fallback.
//! Reordering any of these changes observable results.

use std::collections::HashSet;

use carefinder_core::{Facility, MatchOutcome, ServiceRequirement};

/// Reason strings too generic to discriminate between facilities; each
/// matches every facility unconditionally.
const VERY_GENERAL_QUERIES: &[&str] = &[
    "urgent care",
    "urgent",
    "walk-in",
    "walk in",
    "same day",
    "same-day",
    "express care",
    "immediate care",
    "covid test",
    "covid-19 test",
    "coronavirus test",
    "flu shot",
    "physical exam",
    "vaccination",
];

/// Medical term synonyms used to expand the reason token set.
const SYNONYMS: &[(&str, &[&str])] = &[
    (
        "urgent",
        &["immediate", "acute", "emergency", "same-day", "walk-in", "same", "day", "access"],
    ),
    (
        "emergency",
        &["urgent", "critical", "severe", "acute", "er", "life-threatening"],
    ),
    (
        "primary",
        &["family", "general", "routine", "preventive", "wellness"],
    ),
    ("lab", &["laboratory", "blood", "test", "diagnostic", "testing"]),
    (
        "imaging",
        &["x-ray", "ct", "mri", "scan", "radiology", "ultrasound"],
    ),
    (
        "therapy",
        &["physical", "occupational", "rehab", "rehabilitation"],
    ),
    (
        "mental",
        &["behavioral", "psychology", "psychiatry", "counseling"],
    ),
    (
        "pediatric",
        &["children", "child", "kids", "infant", "adolescent"],
    ),
    (
        "women",
        &["obstetric", "gynecology", "maternity", "pregnancy"],
    ),
    ("senior", &["geriatric", "elderly", "aging"]),
    (
        "care",
        &["clinic", "facility", "location", "center", "same-day", "walk-in"],
    ),
    (
        "covid",
        &["covid-19", "coronavirus", "covid19", "sars-cov-2", "pandemic"],
    ),
    (
        "test",
        &["testing", "exam", "examination", "screening", "check"],
    ),
    (
        "vaccination",
        &["vaccine", "shot", "immunization", "vaccinations"],
    ),
    ("flu", &["influenza", "flu-like", "seasonal"]),
];

/// Lenient fallback: reasons containing any of these are healthcare queries
/// generic enough to match any facility.
const GENERAL_TERMS: &[&str] = &[
    "care", "help", "medical", "health", "doctor", "clinic", "hospital",
];

/// Emergency-specific phrases excluded from the incomplete-data fallback;
/// those queries are routed by the red-flag detector, never by matching.
const EMERGENCY_TERMS: &[&str] = &["chest pain", "heart attack", "stroke", "unconscious", "911"];

/// Checks whether a facility's declared services satisfy the reason text.
#[must_use]
pub fn matches_reason(facility: &Facility, reason: &str) -> MatchOutcome {
    let reason = reason.trim();
    if reason.is_empty() {
        return MatchOutcome::hit_unlabeled();
    }

    let reason_lower = reason.to_lowercase();

    if VERY_GENERAL_QUERIES.contains(&reason_lower.as_str()) {
        return MatchOutcome::hit(reason);
    }

    let expanded = expand_tokens(&reason_lower);

    for category in &facility.services {
        for item in &category.values {
            let service_val = item.val.to_lowercase();
            let service_words: HashSet<&str> = service_val.split_whitespace().collect();

            // 1. Token overlap, including synonym-expanded tokens.
            if expanded.iter().any(|w| service_words.contains(w.as_str())) {
                return MatchOutcome::hit(reason);
            }

            // 2. Substring in either direction.
            if service_val.contains(&reason_lower) || reason_lower.contains(&service_val) {
                return MatchOutcome::hit(reason);
            }

            // 3. 4-char prefix match between any pair of long-enough tokens.
            for reason_word in &expanded {
                if reason_word.len() < 4 {
                    continue;
                }
                for service_word in &service_words {
                    if service_word.len() < 4 {
                        continue;
                    }
                    if prefix_overlap(reason_word, service_word) {
                        return MatchOutcome::hit(reason);
                    }
                }
            }
        }
    }

    if GENERAL_TERMS.iter().any(|t| reason_lower.contains(t)) {
        return MatchOutcome::hit(reason);
    }

    // Urgent/express facilities with no service data match non-emergency
    // queries; the catalog is known to have gaps for these.
    if (facility.is_urgent_care || facility.is_express_care)
        && !facility.has_service_data()
        && !EMERGENCY_TERMS.iter().any(|t| reason_lower.contains(t))
    {
        return MatchOutcome::hit("urgent/express care (incomplete service data)");
    }

    MatchOutcome::miss()
}

/// True iff the facility matches *every* required service term. Empty list
/// trivially passes. Each term goes through the same fuzzy chain as a reason
/// because catalog service names vary in casing and phrasing from
/// caller-supplied filter terms.
#[must_use]
pub fn offers_all(facility: &Facility, required_services: &[String]) -> bool {
    required_services
        .iter()
        .all(|service| matches_reason(facility, service).matches)
}

/// Strict capability check for inferred requirements.
///
/// Only the `"other"` service category is consulted, with literal substring
/// markers per requirement. Narrower than [`matches_reason`] because these
/// gate on actual capability, not topical relevance.
#[must_use]
pub fn has_service(facility: &Facility, requirement: ServiceRequirement) -> bool {
    facility
        .services
        .iter()
        .filter(|cat| cat.name.eq_ignore_ascii_case("other"))
        .flat_map(|cat| &cat.values)
        .any(|item| {
            let val = item.val.to_lowercase();
            match requirement {
                ServiceRequirement::XRay => val.contains("x-ray"),
                ServiceRequirement::Lab => val.contains("lab") || val.contains("laboratory"),
                ServiceRequirement::Procedure => {
                    val.contains("procedure") || val.contains("minor injuries")
                }
            }
        })
}

/// Splits the lowercased reason into tokens and unions in every synonym of
/// every token present in the table.
fn expand_tokens(reason_lower: &str) -> HashSet<String> {
    let words: HashSet<&str> = reason_lower.split_whitespace().collect();
    let mut expanded: HashSet<String> = words.iter().map(|w| (*w).to_string()).collect();
    for word in &words {
        if let Some((_, synonyms)) = SYNONYMS.iter().find(|(term, _)| term == word) {
            expanded.extend(synonyms.iter().map(|s| (*s).to_string()));
        }
    }
    expanded
}

/// True when either token starts with the other's first four bytes. Both
/// tokens are known to be ≥ 4 bytes; `get` keeps the slice on a char
/// boundary for non-ASCII input.
fn prefix_overlap(a: &str, b: &str) -> bool {
    let Some(a_prefix) = a.get(..4) else {
        return false;
    };
    let Some(b_prefix) = b.get(..4) else {
        return false;
    };
    a.starts_with(b_prefix) || b.starts_with(a_prefix)
}
