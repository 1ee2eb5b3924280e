//! Display strings for project cards and the project section.

use chrono::{DateTime, NaiveDate};

use crate::pagination::PageState;

/// Placeholder shown for a repository without a description.
pub const NO_DESCRIPTION: &str = "No description provided.";

/// The single empty state: no distinction between "no repositories" and
/// "fetch failed".
pub const EMPTY_STATE_MESSAGE: &str = "No projects found.";

/// Format an ISO-8601 timestamp as a US short date, e.g. `Mar 5, 2024`.
///
/// Input that does not parse is returned unchanged.
pub fn format_date(iso: &str) -> String {
    const FORMAT: &str = "%b %-d, %Y";

    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return dt.format(FORMAT).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        return date.format(FORMAT).to_string();
    }
    iso.to_string()
}

/// The description, or [`NO_DESCRIPTION`] when it is absent or blank.
pub fn description_or_placeholder(description: Option<&str>) -> &str {
    match description {
        Some(d) if !d.trim().is_empty() => d,
        _ => NO_DESCRIPTION,
    }
}

/// `Page X of Y (N projects). Took S.SSs.`, shown only when there is more
/// than one page.
pub fn page_indicator(
    state: &PageState,
    project_count: usize,
    response_time_ms: f64,
) -> Option<String> {
    let page_count = state.page_count();
    if page_count <= 1 {
        return None;
    }
    Some(format!(
        "Page {} of {} ({} projects). Took {:.2}s.",
        state.current_page(),
        page_count,
        project_count,
        response_time_ms / 1000.0
    ))
}

pub fn empty_state_message() -> &'static str {
    EMPTY_STATE_MESSAGE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_rfc3339_timestamps() {
        assert_eq!(format_date("2024-03-05T12:34:56Z"), "Mar 5, 2024");
        assert_eq!(format_date("2023-12-25T00:00:00+00:00"), "Dec 25, 2023");
    }

    #[test]
    fn formats_plain_dates() {
        assert_eq!(format_date("2021-07-14"), "Jul 14, 2021");
    }

    #[test]
    fn unparseable_dates_are_returned_unchanged() {
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("last tuesday"), "last tuesday");
    }

    #[test]
    fn missing_or_blank_description_uses_placeholder() {
        assert_eq!(description_or_placeholder(None), NO_DESCRIPTION);
        assert_eq!(description_or_placeholder(Some("   ")), NO_DESCRIPTION);
        assert_eq!(description_or_placeholder(Some("A tool")), "A tool");
    }

    #[test]
    fn page_indicator_only_with_multiple_pages() {
        let single = PageState::new(6, 6);
        assert_eq!(page_indicator(&single, 6, 1234.0), None);

        let state = PageState::new(6, 13).go_to(2).state;
        assert_eq!(
            page_indicator(&state, 13, 1234.5).as_deref(),
            Some("Page 2 of 3 (13 projects). Took 1.23s.")
        );
    }

    #[test]
    fn empty_state_text() {
        assert_eq!(empty_state_message(), "No projects found.");
    }
}
