use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use unicode_width::UnicodeWidthChar;

/// Parse a Jira timestamp.
///
/// Jira emits `2024-03-05T10:15:30.000+0000` (no colon in the offset), which
/// is not RFC 3339; both forms are accepted, as are plain dates.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t);
    }
    if let Ok(t) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(t);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().fixed_offset())
}

/// Format a raw timestamp according to the configured date format.
///
/// `"short"` (the default, also used for an empty format) renders
/// `Mar 5, 2024`; `"relative"` renders `2h`, `3d`, `1w`; anything else is a
/// `strftime` pattern. Unparseable input is returned unchanged.
pub fn format_date(raw: &str, date_format: &str) -> String {
    let Some(dt) = parse_timestamp(raw) else {
        return raw.to_owned();
    };
    match date_format {
        "" | "short" => dt.format("%b %-d, %Y").to_string(),
        "relative" => format_relative_time(&dt.with_timezone(&Utc)),
        pattern => {
            let mut out = String::new();
            match write!(out, "{}", dt.format(pattern)) {
                Ok(()) => out,
                Err(_) => raw.to_owned(),
            }
        }
    }
}

/// Whether `date_format` is accepted by [`format_date`]: one of the named
/// formats, or a `strftime` pattern chrono can render.
pub fn is_valid_date_format(date_format: &str) -> bool {
    match date_format {
        "" | "short" | "relative" => true,
        pattern => !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)),
    }
}

/// Format a datetime as relative time (e.g., `"2h"`, `"3d"`, `"1w"`).
fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(dt);

    let minutes = duration.num_minutes();
    if minutes < 1 {
        return "now".to_owned();
    }
    if minutes < 60 {
        return format!("{minutes}m");
    }

    let hours = duration.num_hours();
    if hours < 24 {
        return format!("{hours}h");
    }

    let days = duration.num_days();
    if days < 7 {
        return format!("{days}d");
    }
    if days < 30 {
        return format!("{}w", days / 7);
    }
    if days < 365 {
        return format!("{}mo", days / 30);
    }

    format!("{}y", days / 365)
}

/// Cut `text` to at most `max_chars` characters, appending `...` when
/// anything was removed.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_owned(),
    }
}

/// Cut `text` so that it occupies at most `width` terminal columns, marking
/// the cut with `…`.
pub fn fit_to_width(text: &str, width: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= width {
        return text.to_owned();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('\u{2026}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jira_offset_without_colon_parses() {
        let t = parse_timestamp("2024-03-05T10:15:30.000+0000").unwrap();
        assert_eq!(t.to_rfc3339(), "2024-03-05T10:15:30+00:00");
    }

    #[test]
    fn rfc3339_and_plain_dates_parse() {
        assert!(parse_timestamp("2024-03-05T10:15:30Z").is_some());
        assert!(parse_timestamp("2024-03-05").is_some());
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("not a date").is_none());
    }

    #[test]
    fn short_format_is_month_day_year() {
        assert_eq!(format_date("2024-03-05T10:15:30.000+0000", "short"), "Mar 5, 2024");
        assert_eq!(format_date("2023-12-25T00:00:00Z", ""), "Dec 25, 2023");
    }

    #[test]
    fn custom_strftime_format() {
        assert_eq!(format_date("2024-03-05T10:15:30Z", "%Y/%m/%d"), "2024/03/05");
    }

    #[test]
    fn invalid_strftime_pattern_falls_back_to_raw() {
        assert_eq!(format_date("2024-03-05T10:15:30Z", "%Q"), "2024-03-05T10:15:30Z");
        assert_eq!(format_date("2024-03-05T10:15:30Z", "%Y-%Q"), "2024-03-05T10:15:30Z");
    }

    #[test]
    fn date_format_validation() {
        assert!(is_valid_date_format("short"));
        assert!(is_valid_date_format("relative"));
        assert!(is_valid_date_format("%Y/%m/%d %H:%M"));
        assert!(!is_valid_date_format("%Q"));
        assert!(!is_valid_date_format("%Y-%Q"));
    }

    #[test]
    fn unparseable_date_is_returned_raw() {
        assert_eq!(format_date("someday", "short"), "someday");
        assert_eq!(format_date("", "short"), "");
    }

    #[test]
    fn truncate_appends_ellipsis_only_when_cut() {
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        assert_eq!(truncate_text("abc", 3), "abc");
        assert_eq!(truncate_text("", 3), "");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_text("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn fit_to_width_respects_wide_chars() {
        assert_eq!(fit_to_width("short", 10), "short");
        assert_eq!(fit_to_width("abcdefgh", 5), "abcd\u{2026}");
        assert_eq!(fit_to_width("日本語テキスト", 5), "日本\u{2026}");
    }
}
