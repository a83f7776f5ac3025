use crate::config::types::{Defaults, GridOptions, JiraConfig};
use crate::fields::Field;
use crate::jira::SearchQuery;
use crate::util::is_valid_date_format;

use super::GridError;

/// Fully resolved settings of one grid instance.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub id: String,
    pub title: String,
    pub jql: String,
    /// Displayed columns, in order, without duplicates.
    pub fields: Vec<Field>,
    pub max_results: u32,
    pub page_size: usize,
    /// Column sorted ascending when the grid is first mounted.
    pub sort_by: Option<Field>,
    pub truncate_length: usize,
    pub date_format: String,
    /// Jira site root, used to build `/browse/KEY` links.
    pub base_url: String,
}

impl GridConfig {
    /// Overlay `options` on `defaults` and validate the result.
    pub fn resolve(
        id: &str,
        options: &GridOptions,
        defaults: &Defaults,
        jira: &JiraConfig,
    ) -> Result<Self, GridError> {
        let max_results = options.max_results.unwrap_or(defaults.max_results);
        if max_results == 0 {
            return Err(GridError::InvalidOption {
                name: "max_results",
                reason: "must be at least 1".to_owned(),
            });
        }
        let page_size = options.page_size.unwrap_or(defaults.page_size);
        if page_size == 0 {
            return Err(GridError::InvalidOption {
                name: "page_size",
                reason: "must be at least 1".to_owned(),
            });
        }

        let ids = options.fields.as_ref().unwrap_or(&defaults.fields);
        let mut fields: Vec<Field> = Vec::with_capacity(ids.len());
        for id in ids.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
            let field = Field::from_id(id);
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        if fields.is_empty() {
            return Err(GridError::InvalidOption {
                name: "fields",
                reason: "at least one field is required".to_owned(),
            });
        }

        if !is_valid_date_format(&defaults.date_format) {
            return Err(GridError::InvalidOption {
                name: "date_format",
                reason: format!("{:?} is not a valid strftime pattern", defaults.date_format),
            });
        }

        let sort_by = options
            .sort_by
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Field::from_id);

        Ok(Self {
            id: id.to_owned(),
            title: options.title.clone().unwrap_or_else(|| defaults.title.clone()),
            jql: options.jql.clone().unwrap_or_else(|| defaults.jql.clone()),
            fields,
            max_results,
            page_size,
            sort_by,
            truncate_length: defaults.truncate_length,
            date_format: defaults.date_format.clone(),
            base_url: jira.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// The search this grid issues on every load.
    pub fn query(&self) -> SearchQuery {
        SearchQuery {
            jql: self.jql.clone(),
            fields: self.fields.iter().map(|f| f.id().to_owned()).collect(),
            max_results: self.max_results,
        }
    }

    pub fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{key}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(options: GridOptions) -> Result<GridConfig, GridError> {
        GridConfig::resolve("main", &options, &Defaults::default(), &JiraConfig::default())
    }

    #[test]
    fn defaults_fill_missing_options() {
        let cfg = resolve(GridOptions::default()).unwrap();
        assert_eq!(cfg.title, "JIRA Issues");
        assert_eq!(cfg.max_results, 25);
        assert_eq!(cfg.page_size, 25);
        assert_eq!(cfg.truncate_length, 100);
        assert_eq!(
            cfg.fields,
            vec![
                Field::Key,
                Field::Summary,
                Field::Status,
                Field::Assignee,
                Field::Priority,
                Field::Updated
            ]
        );
        assert_eq!(cfg.sort_by, None);
    }

    #[test]
    fn options_override_defaults() {
        let cfg = resolve(GridOptions {
            title: Some("Bugs".to_owned()),
            jql: Some("type = Bug".to_owned()),
            fields: Some(vec!["key".to_owned(), "customfield_10010".to_owned()]),
            max_results: Some(50),
            sort_by: Some("key".to_owned()),
            page_size: Some(10),
        })
        .unwrap();
        assert_eq!(cfg.title, "Bugs");
        assert_eq!(cfg.jql, "type = Bug");
        assert_eq!(
            cfg.fields,
            vec![Field::Key, Field::Other("customfield_10010".to_owned())]
        );
        assert_eq!(cfg.max_results, 50);
        assert_eq!(cfg.page_size, 10);
        assert_eq!(cfg.sort_by, Some(Field::Key));
    }

    #[test]
    fn duplicate_and_blank_fields_are_dropped() {
        let cfg = resolve(GridOptions {
            fields: Some(vec![
                "key".to_owned(),
                " ".to_owned(),
                "status".to_owned(),
                "key".to_owned(),
            ]),
            ..GridOptions::default()
        })
        .unwrap();
        assert_eq!(cfg.fields, vec![Field::Key, Field::Status]);
    }

    #[test]
    fn zero_sizes_are_rejected() {
        let err = resolve(GridOptions {
            max_results: Some(0),
            ..GridOptions::default()
        })
        .unwrap_err();
        assert!(matches!(err, GridError::InvalidOption { name: "max_results", .. }));

        let err = resolve(GridOptions {
            page_size: Some(0),
            ..GridOptions::default()
        })
        .unwrap_err();
        assert!(matches!(err, GridError::InvalidOption { name: "page_size", .. }));
    }

    #[test]
    fn empty_field_list_is_rejected() {
        let err = resolve(GridOptions {
            fields: Some(vec![]),
            ..GridOptions::default()
        })
        .unwrap_err();
        assert!(matches!(err, GridError::InvalidOption { name: "fields", .. }));
    }

    #[test]
    fn invalid_date_format_is_rejected() {
        let defaults = Defaults {
            date_format: "%Y-%Q".to_owned(),
            ..Defaults::default()
        };
        let err = GridConfig::resolve("main", &GridOptions::default(), &defaults, &JiraConfig::default())
            .unwrap_err();
        assert!(matches!(err, GridError::InvalidOption { name: "date_format", .. }));

        let defaults = Defaults {
            date_format: "%d.%m.%Y".to_owned(),
            ..Defaults::default()
        };
        let cfg = GridConfig::resolve("main", &GridOptions::default(), &defaults, &JiraConfig::default())
            .unwrap();
        assert_eq!(cfg.date_format, "%d.%m.%Y");
    }

    #[test]
    fn query_uses_field_ids() {
        let cfg = resolve(GridOptions {
            fields: Some(vec!["key".to_owned(), "fixVersions".to_owned()]),
            ..GridOptions::default()
        })
        .unwrap();
        let q = cfg.query();
        assert_eq!(q.fields, vec!["key", "fixVersions"]);
        assert_eq!(q.max_results, 25);
    }

    #[test]
    fn browse_url_strips_trailing_slash() {
        let jira = JiraConfig {
            base_url: "https://acme.atlassian.net/".to_owned(),
            ..JiraConfig::default()
        };
        let cfg =
            GridConfig::resolve("main", &GridOptions::default(), &Defaults::default(), &jira)
                .unwrap();
        assert_eq!(cfg.browse_url("APP-7"), "https://acme.atlassian.net/browse/APP-7");
    }
}
