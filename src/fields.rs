use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde_json::Value;

use crate::types::Issue;
use crate::util::parse_timestamp;

/// Fields shown when neither the grid section nor the defaults name any.
pub const DEFAULT_FIELDS: &[&str] = &["key", "summary", "status", "assignee", "priority", "updated"];

/// Column header labels for the well-known field identifiers.
pub const FIELD_DISPLAY_NAMES: &[(&str, &str)] = &[
    ("key", "Issue Key"),
    ("summary", "Summary"),
    ("status", "Status"),
    ("assignee", "Assignee"),
    ("priority", "Priority"),
    ("updated", "Updated"),
    ("created", "Created"),
    ("reporter", "Reporter"),
    ("issuetype", "Issue Type"),
    ("project", "Project"),
    ("fixVersions", "Fix Version"),
    ("labels", "Labels"),
    ("components", "Components"),
];

pub const UNASSIGNED: &str = "Unassigned";
pub const UNKNOWN_REPORTER: &str = "Unknown";

/// Header label for a field identifier, falling back to the identifier itself.
pub fn display_name(id: &str) -> &str {
    FIELD_DISPLAY_NAMES
        .iter()
        .find(|(k, _)| *k == id)
        .map_or(id, |(_, label)| label)
}

// ---------------------------------------------------------------------------
// Field identifiers
// ---------------------------------------------------------------------------

/// A displayable attribute of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    Key,
    Summary,
    Status,
    Assignee,
    Reporter,
    Priority,
    IssueType,
    Project,
    FixVersions,
    Components,
    Labels,
    Updated,
    Created,
    Other(String),
}

impl Field {
    pub fn from_id(id: &str) -> Self {
        match id {
            "key" => Self::Key,
            "summary" => Self::Summary,
            "status" => Self::Status,
            "assignee" => Self::Assignee,
            "reporter" => Self::Reporter,
            "priority" => Self::Priority,
            "issuetype" => Self::IssueType,
            "project" => Self::Project,
            "fixVersions" => Self::FixVersions,
            "components" => Self::Components,
            "labels" => Self::Labels,
            "updated" => Self::Updated,
            "created" => Self::Created,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Key => "key",
            Self::Summary => "summary",
            Self::Status => "status",
            Self::Assignee => "assignee",
            Self::Reporter => "reporter",
            Self::Priority => "priority",
            Self::IssueType => "issuetype",
            Self::Project => "project",
            Self::FixVersions => "fixVersions",
            Self::Components => "components",
            Self::Labels => "labels",
            Self::Updated => "updated",
            Self::Created => "created",
            Self::Other(id) => id,
        }
    }

    pub fn label(&self) -> &str {
        display_name(self.id())
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Self::Updated | Self::Created)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Human-presentable value of `field` for `issue`.
///
/// Dates are returned raw; formatting happens at render time.
pub fn extract(issue: &Issue, field: &Field) -> String {
    match field {
        Field::Key => issue.key.clone(),
        Field::Assignee => nested_str(issue, "assignee", "displayName")
            .map_or_else(|| UNASSIGNED.to_owned(), str::to_owned),
        Field::Reporter => nested_str(issue, "reporter", "displayName")
            .map_or_else(|| UNKNOWN_REPORTER.to_owned(), str::to_owned),
        Field::Status | Field::Priority | Field::IssueType | Field::Project => {
            nested_str(issue, field.id(), "name").unwrap_or_default().to_owned()
        }
        Field::FixVersions | Field::Components => issue
            .field(field.id())
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.get("name").and_then(Value::as_str))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default(),
        Field::Labels => issue
            .field("labels")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default(),
        Field::Summary | Field::Updated | Field::Created | Field::Other(_) => {
            issue.field(field.id()).map(value_text).unwrap_or_default()
        }
    }
}

fn nested_str<'a>(issue: &'a Issue, field: &str, attr: &str) -> Option<&'a str> {
    issue.field(field)?.get(attr)?.as_str()
}

/// Stringify an arbitrary JSON value for display.
fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => ["displayName", "name", "value"]
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_str))
            .map_or_else(|| value.to_string(), str::to_owned),
    }
}

// ---------------------------------------------------------------------------
// Sort keys
// ---------------------------------------------------------------------------

/// Comparable form of a field value.
///
/// Variants order among themselves as declared: timestamps, then numbers,
/// then text. Within a variant the natural order applies.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Time(DateTime<FixedOffset>),
    Number(f64),
    Text(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            Self::Time(_) => 0,
            Self::Number(_) => 1,
            Self::Text(_) => 2,
        }
    }

    /// Total order over keys.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Time(a), Self::Time(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Build the sort key of `field` for `issue`.
///
/// Date fields sort chronologically, raw JSON numbers numerically, and
/// everything else lexicographically on the extracted string.
pub fn sort_key(issue: &Issue, field: &Field) -> SortKey {
    if field.is_date() {
        let raw = extract(issue, field);
        return match parse_timestamp(&raw) {
            Some(t) => SortKey::Time(t),
            None => SortKey::Text(raw),
        };
    }
    if let Field::Other(id) = field
        && let Some(n) = issue.field(id).and_then(Value::as_f64)
    {
        return SortKey::Number(n);
    }
    SortKey::Text(extract(issue, field))
}
