//! Service requirement inference from the reason text.
//!
//! Unlike emergency detection, the three keyword groups are independent: a
//! reason may trigger zero, one, two, or all three requirements at once.

use carefinder_core::ServiceRequirement;

const XRAY_KEYWORDS: &[&str] = &[
    "fracture",
    "broken bone",
    "sprain",
    "twisted ankle",
    "chest x-ray",
    "x-ray",
];

const LAB_KEYWORDS: &[&str] = &[
    "blood test",
    "lab work",
    "test results",
    "cholesterol",
    "std test",
    "sti test",
];

const PROCEDURE_KEYWORDS: &[&str] = &["stitches", "sutures", "deep cut", "wound", "laceration"];

/// Infers which facility capabilities the reason implies.
///
/// Returns a subset of `{x-ray, lab, procedure}` in that fixed order.
#[must_use]
pub fn infer_requirements(reason: &str) -> Vec<ServiceRequirement> {
    let reason = reason.trim().to_lowercase();
    if reason.is_empty() {
        return Vec::new();
    }

    let mut requirements = Vec::new();

    if XRAY_KEYWORDS.iter().any(|kw| reason.contains(kw)) {
        requirements.push(ServiceRequirement::XRay);
    }
    if LAB_KEYWORDS.iter().any(|kw| reason.contains(kw)) {
        requirements.push(ServiceRequirement::Lab);
    }
    if PROCEDURE_KEYWORDS.iter().any(|kw| reason.contains(kw)) {
        requirements.push(ServiceRequirement::Procedure);
    }

    requirements
}
