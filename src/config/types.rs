use serde::Deserialize;

use crate::color::Color;
use crate::fields::DEFAULT_FIELDS;

// ---------------------------------------------------------------------------
// Custom Color deserialization
// ---------------------------------------------------------------------------

/// Deserialize an `Option<Color>` from a TOML string value.
pub(crate) mod color_de {
    use serde::{self, Deserialize, Deserializer};

    use crate::color::Color;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: Option<String> = Option::deserialize(deserializer)?;
        match s {
            None => Ok(None),
            Some(s) => Color::parse(&s, "<theme>")
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub jira: JiraConfig,
    pub defaults: Defaults,
    #[serde(rename = "grids")]
    pub grids: Vec<GridSection>,
    pub theme: Theme,
}

impl AppConfig {
    /// Grid sections to display. Without any configured section a single
    /// `default` grid built from `[defaults]` is used.
    pub fn grid_sections(&self) -> Vec<GridSection> {
        if self.grids.is_empty() {
            vec![GridSection {
                id: DEFAULT_GRID_ID.to_owned(),
                options: GridOptions::default(),
            }]
        } else {
            self.grids.clone()
        }
    }

    pub fn section(&self, id: &str) -> Option<GridSection> {
        self.grid_sections().into_iter().find(|s| s.id == id)
    }
}

pub const DEFAULT_GRID_ID: &str = "default";

// ---------------------------------------------------------------------------
// Jira connection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JiraConfig {
    pub base_url: String,
    pub search_endpoint: String,
    /// Account email for Basic auth. Without it the token is sent as a bearer
    /// token (Data Center personal access tokens).
    pub username: Option<String>,
    /// Shell command printing the API token on stdout.
    pub token_command: Option<String>,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            base_url: "https://your-domain.atlassian.net".to_owned(),
            search_endpoint: "/rest/api/3/search".to_owned(),
            username: None,
            token_command: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Grid sections
// ---------------------------------------------------------------------------

/// A named grid: the mount target a widget attaches to.
#[derive(Debug, Clone, Deserialize)]
pub struct GridSection {
    pub id: String,
    #[serde(flatten)]
    pub options: GridOptions,
}

/// Per-grid options. Every field is optional; omitted ones fall back to
/// `[defaults]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    pub title: Option<String>,
    pub jql: Option<String>,
    pub fields: Option<Vec<String>>,
    pub max_results: Option<u32>,
    pub sort_by: Option<String>,
    pub page_size: Option<usize>,
}

impl GridOptions {
    /// Overlay `other` on top of `self`: values set in `other` win.
    pub fn merged_with(self, other: GridOptions) -> GridOptions {
        GridOptions {
            title: other.title.or(self.title),
            jql: other.jql.or(self.jql),
            fields: other.fields.or(self.fields),
            max_results: other.max_results.or(self.max_results),
            sort_by: other.sort_by.or(self.sort_by),
            page_size: other.page_size.or(self.page_size),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub title: String,
    pub jql: String,
    pub fields: Vec<String>,
    pub max_results: u32,
    pub page_size: usize,
    /// Maximum characters of the summary column before `...` is appended.
    pub truncate_length: usize,
    /// `short`, `relative`, or a `strftime` pattern.
    pub date_format: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            title: "JIRA Issues".to_owned(),
            jql: r#"project = "YOUR_PROJECT" AND status != "Done""#.to_owned(),
            fields: DEFAULT_FIELDS.iter().map(|f| (*f).to_owned()).collect(),
            max_results: 25,
            page_size: 25,
            truncate_length: 100,
            date_format: "short".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub ui: UiTheme,
    pub colors: ColorsTheme,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiTheme {
    pub grids_show_count: bool,
    pub show_separator: bool,
}

impl Default for UiTheme {
    fn default() -> Self {
        Self {
            grids_show_count: true,
            show_separator: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColorsTheme {
    pub text: TextColors,
    pub background: BgColors,
    pub border: BorderColors,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TextColors {
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub primary: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub secondary: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub inverted: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub faint: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub warning: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub success: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub error: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub link: Option<Color>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BgColors {
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub selected: Option<Color>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BorderColors {
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub primary: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub faint: Option<Color>,
}
