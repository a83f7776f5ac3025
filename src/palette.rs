// Badge colors for workflow statuses and priorities, as Jira Cloud shows them.

use crate::color::Color;

pub const STATUS_COLORS: &[(&str, Color)] = &[
    ("To Do", Color::rgb(0x42526E)),
    ("In Progress", Color::rgb(0x0052CC)),
    ("Done", Color::rgb(0x00875A)),
    ("Closed", Color::rgb(0x00875A)),
    ("Open", Color::rgb(0xDE350B)),
    ("Resolved", Color::rgb(0x00875A)),
    ("Reopened", Color::rgb(0xDE350B)),
];

pub const STATUS_FALLBACK: Color = Color::rgb(0x42526E);

pub const PRIORITY_COLORS: &[(&str, Color)] = &[
    ("Highest", Color::rgb(0xCD1316)),
    ("High", Color::rgb(0xEA7D24)),
    ("Medium", Color::rgb(0xE2B203)),
    ("Low", Color::rgb(0x57A55A)),
    ("Lowest", Color::rgb(0x8993A4)),
];

pub const PRIORITY_FALLBACK: Color = Color::rgb(0x8993A4);

/// Muted text for the `Unassigned` sentinel.
pub const UNASSIGNED_COLOR: Color = Color::rgb(0x6B778C);

/// Background of the assignee initial.
pub const AVATAR_COLOR: Color = Color::rgb(0x0052CC);

pub fn status_color(status: &str) -> Color {
    lookup(STATUS_COLORS, status).unwrap_or(STATUS_FALLBACK)
}

pub fn priority_color(priority: &str) -> Color {
    lookup(PRIORITY_COLORS, priority).unwrap_or(PRIORITY_FALLBACK)
}

fn lookup(table: &[(&str, Color)], name: &str) -> Option<Color> {
    table.iter().find(|(k, _)| *k == name).map(|(_, c)| *c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_have_colors() {
        assert_eq!(status_color("In Progress"), Color::rgb(0x0052CC));
        assert_eq!(status_color("Reopened"), Color::rgb(0xDE350B));
    }

    #[test]
    fn unknown_status_uses_fallback() {
        assert_eq!(status_color("Blocked"), STATUS_FALLBACK);
        assert_eq!(status_color(""), STATUS_FALLBACK);
    }

    #[test]
    fn priorities_and_fallback() {
        assert_eq!(priority_color("Highest"), Color::rgb(0xCD1316));
        assert_eq!(priority_color("P1"), PRIORITY_FALLBACK);
    }

    #[test]
    fn lookups_are_case_sensitive() {
        assert_eq!(status_color("done"), STATUS_FALLBACK);
    }
}
