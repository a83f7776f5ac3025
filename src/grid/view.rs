//! Render model of a grid: plain data describing what to draw, built from the
//! grid state and consumed by the terminal components.

use crate::color::Color;
use crate::fields::{Field, UNASSIGNED, extract};
use crate::palette::{priority_color, status_color};
use crate::types::Issue;
use crate::util::{format_date, truncate_text};

use super::options::GridConfig;
use super::pagination::{page_bounds, page_window};
use super::sort::{SortDirection, SortState};

/// Characters kept for columns without a dedicated renderer.
pub const OTHER_FIELD_MAX_CHARS: usize = 50;

pub const LOADING_MESSAGE: &str = "Loading JIRA issues...";
pub const EMPTY_MESSAGE: &str = "No issues found matching your criteria.";

#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    pub title: String,
    /// `Loading...` before the first successful load, then `N issues`.
    pub count_text: String,
    pub search_term: String,
    pub content: ContentView,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentView {
    Loading { message: String },
    Error { message: String },
    Empty { message: String },
    Table(TableView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView>,
    pub pagination: Option<PaginationView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView {
    pub field: Field,
    pub label: String,
    pub sort: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub key: String,
    pub url: String,
    pub cells: Vec<CellContent>,
}

/// One table cell, typed by how it is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Link { text: String, url: String },
    Summary(String),
    StatusBadge { text: String, color: Color },
    PriorityBadge { text: String, color: Color },
    Assignee { initial: char, name: String },
    Unassigned,
    Date(String),
    Text(String),
}

impl CellContent {
    /// Plain text of the cell, without decoration.
    pub fn text(&self) -> &str {
        match self {
            Self::Link { text, .. }
            | Self::Summary(text)
            | Self::StatusBadge { text, .. }
            | Self::PriorityBadge { text, .. }
            | Self::Date(text)
            | Self::Text(text) => text,
            Self::Assignee { name, .. } => name,
            Self::Unassigned => UNASSIGNED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    /// `Showing a-b of n issues`.
    pub info: String,
    pub prev: PageButton,
    pub pages: Vec<PageButton>,
    pub next: PageButton,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageButton {
    pub label: String,
    /// Page selected when the button is activated.
    pub target: usize,
    pub active: bool,
    pub disabled: bool,
}

pub(crate) fn headers(fields: &[Field], sort: Option<&SortState>) -> Vec<HeaderView> {
    fields
        .iter()
        .map(|field| HeaderView {
            field: field.clone(),
            label: field.label().to_owned(),
            sort: sort.filter(|s| s.field == *field).map(|s| s.direction),
        })
        .collect()
}

pub(crate) fn row(issue: &Issue, config: &GridConfig) -> RowView {
    let url = config.browse_url(&issue.key);
    RowView {
        key: issue.key.clone(),
        cells: config
            .fields
            .iter()
            .map(|field| cell(issue, field, config))
            .collect(),
        url,
    }
}

fn cell(issue: &Issue, field: &Field, config: &GridConfig) -> CellContent {
    let text = extract(issue, field);
    match field {
        Field::Key => CellContent::Link {
            url: config.browse_url(&text),
            text,
        },
        Field::Summary => CellContent::Summary(truncate_text(&text, config.truncate_length)),
        Field::Status => CellContent::StatusBadge {
            color: status_color(&text),
            text,
        },
        Field::Priority => CellContent::PriorityBadge {
            color: priority_color(&text),
            text,
        },
        Field::Assignee => match text.chars().next() {
            Some(c) if text != UNASSIGNED => CellContent::Assignee {
                initial: c.to_uppercase().next().unwrap_or(c),
                name: text,
            },
            _ => CellContent::Unassigned,
        },
        f if f.is_date() => {
            if text.is_empty() {
                CellContent::Date(text)
            } else {
                CellContent::Date(format_date(&text, &config.date_format))
            }
        }
        _ => CellContent::Text(truncate_text(&text, OTHER_FIELD_MAX_CHARS)),
    }
}

/// Pagination controls, or `None` when everything fits on one page.
pub(crate) fn pagination(
    page: usize,
    total_pages: usize,
    len: usize,
    page_size: usize,
) -> Option<PaginationView> {
    if total_pages <= 1 {
        return None;
    }
    let bounds = page_bounds(page, len, page_size);
    let button = |label: String, target: usize, active: bool, disabled: bool| PageButton {
        label,
        target,
        active,
        disabled,
    };
    Some(PaginationView {
        info: format!("Showing {}-{} of {len} issues", bounds.start + 1, bounds.end),
        prev: button("Previous".to_owned(), page.saturating_sub(1).max(1), false, page <= 1),
        pages: page_window(page, total_pages)
            .map(|p| button(p.to_string(), p, p == page, false))
            .collect(),
        next: button(
            "Next".to_owned(),
            (page + 1).min(total_pages),
            false,
            page >= total_pages,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{Defaults, GridOptions, JiraConfig};
    use serde_json::json;

    fn config(fields: &[&str]) -> GridConfig {
        let jira = JiraConfig {
            base_url: "https://acme.atlassian.net".to_owned(),
            ..JiraConfig::default()
        };
        let options = GridOptions {
            fields: Some(fields.iter().map(|s| (*s).to_owned()).collect()),
            ..GridOptions::default()
        };
        GridConfig::resolve("main", &options, &Defaults::default(), &jira).unwrap()
    }

    fn issue(fields: serde_json::Value) -> Issue {
        serde_json::from_value(json!({ "key": "APP-1", "fields": fields })).unwrap()
    }

    #[test]
    fn key_links_to_browse_page() {
        let row = row(&issue(json!({})), &config(&["key"]));
        assert_eq!(
            row.cells[0],
            CellContent::Link {
                text: "APP-1".to_owned(),
                url: "https://acme.atlassian.net/browse/APP-1".to_owned(),
            }
        );
        assert_eq!(row.url, "https://acme.atlassian.net/browse/APP-1");
    }

    #[test]
    fn summary_is_truncated_with_ellipsis() {
        let long = "x".repeat(150);
        let row = row(&issue(json!({ "summary": long })), &config(&["summary"]));
        let CellContent::Summary(text) = &row.cells[0] else {
            panic!("expected summary cell");
        };
        assert_eq!(text.chars().count(), 103);
        assert!(text.ends_with("..."));
    }

    #[test]
    fn short_summary_is_untouched() {
        let row = row(&issue(json!({ "summary": "Fix login" })), &config(&["summary"]));
        assert_eq!(row.cells[0], CellContent::Summary("Fix login".to_owned()));
    }

    #[test]
    fn badges_use_palette_and_fallbacks() {
        let cfg = config(&["status", "priority"]);
        let row = row(
            &issue(json!({ "status": { "name": "Blocked" }, "priority": { "name": "High" } })),
            &cfg,
        );
        assert_eq!(
            row.cells[0],
            CellContent::StatusBadge {
                text: "Blocked".to_owned(),
                color: crate::palette::STATUS_FALLBACK,
            }
        );
        assert_eq!(
            row.cells[1],
            CellContent::PriorityBadge {
                text: "High".to_owned(),
                color: Color::rgb(0xEA7D24),
            }
        );
    }

    #[test]
    fn assignee_initial_or_unassigned() {
        let cfg = config(&["assignee"]);
        let row_a = row(&issue(json!({ "assignee": { "displayName": "jane Doe" } })), &cfg);
        assert_eq!(
            row_a.cells[0],
            CellContent::Assignee {
                initial: 'J',
                name: "jane Doe".to_owned(),
            }
        );
        let row_b = row(&issue(json!({ "assignee": null })), &cfg);
        assert_eq!(row_b.cells[0], CellContent::Unassigned);
        assert_eq!(row_b.cells[0].text(), "Unassigned");
    }

    #[test]
    fn dates_are_formatted_or_kept_raw() {
        let cfg = config(&["updated", "created"]);
        let row = row(
            &issue(json!({ "updated": "2024-03-05T10:15:00.000+0000", "created": "soon" })),
            &cfg,
        );
        assert_eq!(row.cells[0], CellContent::Date("Mar 5, 2024".to_owned()));
        assert_eq!(row.cells[1], CellContent::Date("soon".to_owned()));
    }

    #[test]
    fn other_fields_truncate_at_fifty() {
        let cfg = config(&["customfield_1"]);
        let row = row(&issue(json!({ "customfield_1": "y".repeat(60) })), &cfg);
        let CellContent::Text(text) = &row.cells[0] else {
            panic!("expected text cell");
        };
        assert_eq!(text.chars().count(), 53);
    }

    #[test]
    fn headers_mark_active_sort() {
        let sort = SortState {
            field: Field::Status,
            direction: SortDirection::Descending,
        };
        let hs = headers(&[Field::Key, Field::Status], Some(&sort));
        assert_eq!(hs[0].label, "Issue Key");
        assert_eq!(hs[0].sort, None);
        assert_eq!(hs[1].sort, Some(SortDirection::Descending));
    }

    #[test]
    fn no_pagination_for_single_page() {
        assert_eq!(pagination(1, 1, 20, 25), None);
    }

    #[test]
    fn pagination_on_first_page() {
        let p = pagination(1, 4, 100, 25).unwrap();
        assert_eq!(p.info, "Showing 1-25 of 100 issues");
        assert!(p.prev.disabled);
        assert!(!p.next.disabled);
        assert_eq!(p.next.target, 2);
        let labels: Vec<_> = p.pages.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "2", "3", "4"]);
        assert!(p.pages[0].active);
    }

    #[test]
    fn pagination_on_last_partial_page() {
        let p = pagination(3, 3, 60, 25).unwrap();
        assert_eq!(p.info, "Showing 51-60 of 60 issues");
        assert!(p.next.disabled);
        assert!(!p.prev.disabled);
        assert_eq!(p.prev.target, 2);
    }

    #[test]
    fn pagination_window_is_capped() {
        let p = pagination(6, 12, 300, 25).unwrap();
        let targets: Vec<_> = p.pages.iter().map(|b| b.target).collect();
        assert_eq!(targets, vec![4, 5, 6, 7, 8]);
    }
}
