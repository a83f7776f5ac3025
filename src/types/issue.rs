use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Issue domain types
// ---------------------------------------------------------------------------

/// A single issue as returned by `/rest/api/3/search`.
///
/// Only `key` is typed; everything else stays in the raw `fields` mapping and
/// is interpreted per field identifier by [`crate::fields::extract`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub key: String,
    #[serde(default)]
    pub fields: IndexMap<String, Value>,
}

impl Issue {
    /// Raw value for a field identifier. JSON `null` is treated as absent.
    pub fn field(&self, id: &str) -> Option<&Value> {
        self.fields.get(id).filter(|v| !v.is_null())
    }
}

/// Body of a successful search response. A missing `issues` array is an
/// empty result, not an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub issues: Vec<Issue>,
}

/// The authenticated user, as returned by `/rest/api/3/myself`.
#[derive(Debug, Clone, Deserialize)]
pub struct Myself {
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "emailAddress", default)]
    pub email_address: Option<String>,
}
