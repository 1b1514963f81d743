//! Emergency red-flag detection.
//!
//! Scans the reason text against a fixed, ordered table of red-flag keyword
//! groups. The first group (in declaration order) with any contained keyword
//! wins; there is no severity ranking across groups, so the declaration
//! order below is a behavioral contract — do not reorder.

/// Red-flag keyword groups and their warning messages, highest-priority first.
const RED_FLAGS: &[(&[&str], &str)] = &[
    // Cardiac
    (
        &["chest pain", "chest pressure", "chest tightness", "heart attack"],
        "chest pain or pressure - this could be a heart attack",
    ),
    // Respiratory
    (
        &[
            "difficulty breathing",
            "can't breathe",
            "cannot breathe",
            "shortness of breath",
            "severe breathing",
        ],
        "difficulty breathing - this requires immediate attention",
    ),
    // Neurological
    (
        &[
            "stroke",
            "face drooping",
            "arm weakness",
            "slurred speech",
            "severe headache",
            "worst headache",
        ],
        "stroke symptoms - time is critical",
    ),
    (
        &[
            "loss of consciousness",
            "unconscious",
            "passed out",
            "unresponsive",
        ],
        "loss of consciousness - call 911 immediately",
    ),
    (
        &["severe confusion", "altered mental state"],
        "altered mental state - needs immediate evaluation",
    ),
    // Bleeding/Trauma
    (
        &[
            "severe bleeding",
            "heavy bleeding",
            "bleeding won't stop",
            "severe trauma",
            "severe injury",
        ],
        "severe bleeding or trauma - needs emergency care",
    ),
    (
        &["severe head injury", "head trauma"],
        "head injury - needs immediate evaluation",
    ),
    // Allergic/Respiratory
    (
        &[
            "severe allergic reaction",
            "anaphylaxis",
            "throat swelling",
            "tongue swelling",
        ],
        "severe allergic reaction - use EpiPen if available and call 911",
    ),
    // Mental Health
    (
        &["suicidal", "want to die", "kill myself", "suicide"],
        "mental health crisis - call 988 Suicide & Crisis Lifeline or 911",
    ),
    // Other Critical
    (
        &["severe abdominal pain", "severe stomach pain"],
        "severe abdominal pain - could indicate serious condition",
    ),
    (
        &["coughing up blood", "vomiting blood", "blood in stool"],
        "bleeding from body - needs emergency evaluation",
    ),
    (
        &["seizure", "convulsion"],
        "seizure - needs immediate medical attention",
    ),
];

/// Detects life-threatening symptoms that require immediate ER attention.
///
/// Returns the warning message of the first matching red-flag group, or
/// `None` for an empty or benign reason.
#[must_use]
pub fn detect(reason: &str) -> Option<&'static str> {
    let reason = reason.trim().to_lowercase();
    if reason.is_empty() {
        return None;
    }

    for (keywords, warning) in RED_FLAGS {
        if keywords.iter().any(|kw| reason.contains(kw)) {
            return Some(warning);
        }
    }

    None
}
