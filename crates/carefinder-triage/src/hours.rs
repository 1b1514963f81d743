//! Open-hours evaluation for a facility's "today" window.
//!
//! Clock strings arrive as `"<h>[:mm] am|pm"`. Any parse failure degrades to
//! "Hours unavailable" — malformed catalog data must never fail a triage
//! request.

use chrono::{Local, NaiveDateTime, NaiveTime, Timelike};

use carefinder_core::HoursToday;

/// Minutes before opening during which a closed facility reports
/// "Opens at ..." instead of "Closed - Opens ...".
const OPENS_SOON_MINUTES: i64 = 60;

/// Whether a facility is open right now, with a display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenStatus {
    pub is_open: bool,
    pub label: String,
}

impl OpenStatus {
    fn open(label: impl Into<String>) -> Self {
        OpenStatus {
            is_open: true,
            label: label.into(),
        }
    }

    fn closed(label: impl Into<String>) -> Self {
        OpenStatus {
            is_open: false,
            label: label.into(),
        }
    }

    fn unavailable() -> Self {
        OpenStatus::closed("Hours unavailable")
    }
}

/// Evaluates today's opening window against the local wall clock.
#[must_use]
pub fn open_status_now(hours: Option<&HoursToday>) -> OpenStatus {
    open_status_at(hours, Local::now().naive_local())
}

/// Evaluates today's opening window against an injected instant.
///
/// An end instant earlier than the start instant (e.g. 8 pm–2 am) is an
/// overnight window wrapping past midnight: open iff the current time-of-day
/// is ≥ start OR ≤ end.
#[must_use]
pub fn open_status_at(hours: Option<&HoursToday>, now: NaiveDateTime) -> OpenStatus {
    let Some(hours) = hours else {
        return OpenStatus::unavailable();
    };

    if hours.is_24_hours {
        return OpenStatus::open("Open 24 hours");
    }

    let (Some(start_raw), Some(end_raw)) = (hours.start.as_deref(), hours.end.as_deref()) else {
        return OpenStatus::unavailable();
    };

    let (Some(start), Some(end)) = (parse_clock(start_raw), parse_clock(end_raw)) else {
        return OpenStatus::unavailable();
    };

    let current = now.time();

    let open = if end < start {
        // Overnight wraparound, e.g. 8:00 pm – 2:00 am.
        current >= start || current <= end
    } else {
        start <= current && current <= end
    };
    if open {
        return OpenStatus::open("Open now");
    }

    if current < start {
        let minutes_until_open = start.signed_duration_since(current).num_minutes();
        if minutes_until_open <= OPENS_SOON_MINUTES {
            return OpenStatus::closed(format!("Opens at {start_raw}"));
        }
    }

    OpenStatus::closed(format!("Closed - Opens {start_raw}"))
}

/// Parses `"<h>[:mm] am|pm"` into a `NaiveTime`.
///
/// Noon/midnight rules: `12 am` → hour 0, `12 pm` stays 12. Returns `None`
/// for anything that does not parse cleanly.
fn parse_clock(raw: &str) -> Option<NaiveTime> {
    let lower = raw.trim().to_lowercase();
    let is_pm = lower.contains("pm");
    let is_am = lower.contains("am");

    let digits = lower.replace("am", "").replace("pm", "");
    let digits = digits.trim();

    let mut parts = digits.split(':');
    let mut hour: u32 = parts.next()?.trim().parse().ok()?;
    let minute: u32 = match parts.next() {
        Some(m) => m.trim().parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }

    if is_pm && hour != 12 {
        hour += 12;
    } else if is_am && hour == 12 {
        hour = 0;
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Convenience used by tests and display code: the parsed hour/minute pair.
#[must_use]
pub fn parse_clock_parts(raw: &str) -> Option<(u32, u32)> {
    parse_clock(raw).map(|t| (t.hour(), t.minute()))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn window(start: &str, end: &str) -> HoursToday {
        HoursToday {
            is_24_hours: false,
            start: Some(start.to_string()),
            end: Some(end.to_string()),
        }
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn missing_hours_is_unavailable() {
        let status = open_status_at(None, at(12, 0));
        assert!(!status.is_open);
        assert_eq!(status.label, "Hours unavailable");
    }

    #[test]
    fn missing_start_or_end_is_unavailable() {
        let hours = HoursToday {
            is_24_hours: false,
            start: Some("8:00 am".to_string()),
            end: None,
        };
        let status = open_status_at(Some(&hours), at(12, 0));
        assert_eq!(status.label, "Hours unavailable");
    }

    #[test]
    fn always_open_for_24h_flag() {
        let hours = HoursToday {
            is_24_hours: true,
            start: None,
            end: None,
        };
        let status = open_status_at(Some(&hours), at(3, 0));
        assert!(status.is_open);
        assert_eq!(status.label, "Open 24 hours");
    }

    #[test]
    fn open_inside_daytime_window() {
        let hours = window("8:00 am", "5:00 pm");
        let status = open_status_at(Some(&hours), at(10, 30));
        assert!(status.is_open);
        assert_eq!(status.label, "Open now");
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let hours = window("8:00 am", "5:00 pm");
        assert!(open_status_at(Some(&hours), at(8, 0)).is_open);
        assert!(open_status_at(Some(&hours), at(17, 0)).is_open);
    }

    #[test]
    fn closed_after_daytime_window() {
        let hours = window("8:00 am", "5:00 pm");
        let status = open_status_at(Some(&hours), at(18, 0));
        assert!(!status.is_open);
        assert_eq!(status.label, "Closed - Opens 8:00 am");
    }

    #[test]
    fn opens_soon_within_an_hour_of_start() {
        let hours = window("8:00 am", "5:00 pm");
        let status = open_status_at(Some(&hours), at(7, 30));
        assert!(!status.is_open);
        assert_eq!(status.label, "Opens at 8:00 am");
    }

    #[test]
    fn closed_well_before_start() {
        let hours = window("8:00 am", "5:00 pm");
        let status = open_status_at(Some(&hours), at(5, 0));
        assert_eq!(status.label, "Closed - Opens 8:00 am");
    }

    #[test]
    fn overnight_window_open_after_midnight() {
        // 8:00 am – 2:00 am wraps past midnight; 1:00 am is inside.
        let hours = window("8:00 am", "2:00 am");
        let status = open_status_at(Some(&hours), at(1, 0));
        assert!(status.is_open);
        assert_eq!(status.label, "Open now");
    }

    #[test]
    fn overnight_window_closed_in_the_gap() {
        let hours = window("8:00 pm", "2:00 am");
        let status = open_status_at(Some(&hours), at(3, 0));
        assert!(!status.is_open);
    }

    #[test]
    fn overnight_window_open_before_midnight() {
        let hours = window("8:00 pm", "2:00 am");
        assert!(open_status_at(Some(&hours), at(23, 0)).is_open);
    }

    #[test]
    fn parse_clock_handles_noon_and_midnight() {
        assert_eq!(parse_clock_parts("12:00 am"), Some((0, 0)));
        assert_eq!(parse_clock_parts("12:00 pm"), Some((12, 0)));
        assert_eq!(parse_clock_parts("12:30 am"), Some((0, 30)));
    }

    #[test]
    fn parse_clock_handles_missing_minutes() {
        assert_eq!(parse_clock_parts("8 am"), Some((8, 0)));
        assert_eq!(parse_clock_parts("8 pm"), Some((20, 0)));
    }

    #[test]
    fn malformed_clock_degrades_to_unavailable() {
        let hours = window("8h30", "5:00 pm");
        let status = open_status_at(Some(&hours), at(12, 0));
        assert_eq!(status.label, "Hours unavailable");

        let hours = window("25:00 am", "5:00 pm");
        let status = open_status_at(Some(&hours), at(12, 0));
        assert_eq!(status.label, "Hours unavailable");
    }
}
