use crate::config::types::{AppConfig, GridOptions};
use crate::fields::Field;
use crate::jira::FetchError;
use crate::types::Issue;

use super::options::GridConfig;
use super::sort::SortState;
use super::state::ViewState;
use super::view::{self, ContentView, EMPTY_MESSAGE, GridView, LOADING_MESSAGE, TableView};
use super::GridError;

/// Lifecycle of the grid's data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Error(FetchError),
}

/// Proof of a started load. Only the most recently issued ticket can
/// complete; older ones are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn seq(self) -> u64 {
        self.0
    }

    pub fn from_seq(seq: u64) -> Self {
        Self(seq)
    }
}

/// One mounted issue grid.
///
/// The grid never performs I/O itself: callers start a load with
/// [`IssueGrid::begin_load`], run [`GridConfig::query`] however they like,
/// and hand the outcome back with [`IssueGrid::complete_load`].
#[derive(Debug, Clone)]
pub struct IssueGrid {
    config: GridConfig,
    state: ViewState,
    status: LoadStatus,
    latest: u64,
    loaded_once: bool,
}

impl IssueGrid {
    /// Mount the grid named `target` in the host config. `overrides` win over
    /// the section's own options, which win over `[defaults]`.
    pub fn mount(
        host: &AppConfig,
        target: &str,
        overrides: GridOptions,
    ) -> Result<Self, GridError> {
        let section = host
            .section(target)
            .ok_or_else(|| GridError::MountTargetNotFound(target.to_owned()))?;
        let options = section.options.merged_with(overrides);
        let config = GridConfig::resolve(&section.id, &options, &host.defaults, &host.jira)?;
        tracing::debug!(
            "grid[{}]: mounted with {} fields, jql={:?}",
            config.id,
            config.fields.len(),
            config.jql
        );
        Ok(Self::new(config))
    }

    pub fn new(config: GridConfig) -> Self {
        let state = ViewState::with_sort(config.sort_by.clone().map(SortState::ascending));
        Self {
            config,
            state,
            status: LoadStatus::Loading,
            latest: 0,
            loaded_once: false,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// Enter the loading state and issue a fresh ticket. Any load still in
    /// flight becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest += 1;
        self.status = LoadStatus::Loading;
        LoadTicket(self.latest)
    }

    /// Apply a finished load. Returns `false` (and changes nothing) when the
    /// ticket is stale.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Issue>, FetchError>,
    ) -> bool {
        if ticket.0 != self.latest {
            tracing::debug!(
                "grid[{}]: dropping stale load #{} (latest #{})",
                self.config.id,
                ticket.0,
                self.latest
            );
            return false;
        }
        match result {
            Ok(issues) => {
                tracing::debug!("grid[{}]: loaded {} issues", self.config.id, issues.len());
                self.state.replace_issues(issues, &self.config.fields);
                self.status = LoadStatus::Ready;
                self.loaded_once = true;
            }
            Err(e) => {
                tracing::warn!("grid[{}]: load failed: {e}", self.config.id);
                self.status = LoadStatus::Error(e);
            }
        }
        true
    }

    pub fn search(&mut self, term: &str) {
        self.state.set_search(term, &self.config.fields);
    }

    pub fn sort_by(&mut self, field: &Field) {
        self.state.sort_by(field, &self.config.fields);
    }

    /// Sort by the displayed column at `index`. Returns `false` when there is
    /// no such column.
    pub fn sort_by_column(&mut self, index: usize) -> bool {
        match self.config.fields.get(index).cloned() {
            Some(field) => {
                self.sort_by(&field);
                true
            }
            None => false,
        }
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.state.go_to_page(page, self.config.page_size);
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.state.page() + 1);
    }

    pub fn prev_page(&mut self) {
        self.go_to_page(self.state.page().saturating_sub(1));
    }

    pub fn first_page(&mut self) {
        self.go_to_page(1);
    }

    pub fn last_page(&mut self) {
        self.go_to_page(self.page_count());
    }

    pub fn page_count(&self) -> usize {
        self.state.page_count(self.config.page_size)
    }

    /// Issues on the current page, in display order.
    pub fn page_issues(&self) -> Vec<&Issue> {
        self.state.page_issues(self.config.page_size).collect()
    }

    pub fn count_text(&self) -> String {
        if !self.loaded_once {
            return match self.status {
                LoadStatus::Error(_) => String::new(),
                _ => "Loading...".to_owned(),
            };
        }
        match self.state.filtered_len() {
            1 => "1 issue".to_owned(),
            n => format!("{n} issues"),
        }
    }

    pub fn render(&self) -> GridView {
        let content = match &self.status {
            LoadStatus::Loading => ContentView::Loading {
                message: LOADING_MESSAGE.to_owned(),
            },
            LoadStatus::Error(e) => ContentView::Error {
                message: e.to_string(),
            },
            LoadStatus::Ready if self.state.filtered_len() == 0 => ContentView::Empty {
                message: EMPTY_MESSAGE.to_owned(),
            },
            LoadStatus::Ready => ContentView::Table(self.table()),
        };
        GridView {
            title: self.config.title.clone(),
            count_text: self.count_text(),
            search_term: self.state.search_term().to_owned(),
            content,
        }
    }

    fn table(&self) -> TableView {
        TableView {
            headers: view::headers(&self.config.fields, self.state.sort()),
            rows: self
                .state
                .page_issues(self.config.page_size)
                .map(|issue| view::row(issue, &self.config))
                .collect(),
            pagination: view::pagination(
                self.state.page(),
                self.page_count(),
                self.state.filtered_len(),
                self.config.page_size,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::GridSection;
    use crate::grid::{CellContent, SortDirection};
    use serde_json::json;

    fn issue(key: &str, status: &str) -> Issue {
        serde_json::from_value(json!({ "key": key, "fields": { "status": { "name": status } } }))
            .unwrap()
    }

    fn many(n: usize) -> Vec<Issue> {
        (1..=n).map(|i| issue(&format!("A-{i}"), "Open")).collect()
    }

    fn grid(fields: &[&str], page_size: usize) -> IssueGrid {
        let host = AppConfig {
            grids: vec![GridSection {
                id: "main".to_owned(),
                options: GridOptions {
                    fields: Some(fields.iter().map(|s| (*s).to_owned()).collect()),
                    page_size: Some(page_size),
                    ..GridOptions::default()
                },
            }],
            ..AppConfig::default()
        };
        IssueGrid::mount(&host, "main", GridOptions::default()).unwrap()
    }

    fn row_keys(g: &IssueGrid) -> Vec<String> {
        match g.render().content {
            ContentView::Table(t) => t.rows.into_iter().map(|r| r.key).collect(),
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn mount_unknown_target_fails() {
        let err = IssueGrid::mount(&AppConfig::default(), "nope", GridOptions::default())
            .unwrap_err();
        assert_eq!(err, GridError::MountTargetNotFound("nope".to_owned()));
    }

    #[test]
    fn mount_default_grid_without_sections() {
        let g = IssueGrid::mount(&AppConfig::default(), "default", GridOptions::default())
            .unwrap();
        assert_eq!(g.config().title, "JIRA Issues");
    }

    #[test]
    fn overrides_win_over_section() {
        let g = IssueGrid::mount(
            &AppConfig::default(),
            "default",
            GridOptions {
                title: Some("Mine".to_owned()),
                ..GridOptions::default()
            },
        )
        .unwrap();
        assert_eq!(g.config().title, "Mine");
    }

    #[test]
    fn starts_loading() {
        let g = grid(&["key"], 25);
        let view = g.render();
        assert_eq!(
            view.content,
            ContentView::Loading {
                message: "Loading JIRA issues...".to_owned()
            }
        );
        assert_eq!(view.count_text, "Loading...");
    }

    #[test]
    fn successful_load_renders_rows_and_count() {
        let mut g = grid(&["key", "status"], 25);
        let t = g.begin_load();
        assert!(g.complete_load(t, Ok(vec![issue("A-1", "To Do"), issue("A-2", "Done")])));
        let view = g.render();
        assert_eq!(view.count_text, "2 issues");
        let ContentView::Table(table) = view.content else {
            panic!("expected table");
        };
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].cells[0].text(), "A-1");
        assert!(matches!(table.rows[1].cells[1], CellContent::StatusBadge { .. }));
        assert_eq!(table.pagination, None);
    }

    #[test]
    fn header_sort_cycles_direction() {
        let mut g = grid(&["key", "status"], 25);
        let t = g.begin_load();
        g.complete_load(t, Ok(vec![issue("A-1", "To Do"), issue("A-2", "Done")]));

        g.sort_by(&Field::Status);
        assert_eq!(row_keys(&g), vec!["A-2", "A-1"]);
        g.sort_by(&Field::Status);
        assert_eq!(row_keys(&g), vec!["A-1", "A-2"]);

        let ContentView::Table(table) = g.render().content else {
            panic!("expected table");
        };
        assert_eq!(table.headers[1].sort, Some(SortDirection::Descending));
        assert_eq!(table.headers[0].sort, None);
    }

    #[test]
    fn sort_by_column_index() {
        let mut g = grid(&["key", "status"], 25);
        assert!(g.sort_by_column(1));
        assert!(!g.sort_by_column(2));
        assert_eq!(g.state().sort().map(|s| &s.field), Some(&Field::Status));
    }

    #[test]
    fn error_shows_message_and_keeps_count() {
        let mut g = grid(&["key"], 25);
        let t = g.begin_load();
        g.complete_load(t, Ok(many(3)));
        let t = g.begin_load();
        g.complete_load(t, Err(FetchError::Authentication));
        let view = g.render();
        assert_eq!(
            view.content,
            ContentView::Error {
                message: "Failed to authenticate with JIRA. Please check your credentials."
                    .to_owned()
            }
        );
        assert_eq!(view.count_text, "3 issues");
    }

    #[test]
    fn empty_result_shows_empty_message() {
        let mut g = grid(&["key"], 25);
        let t = g.begin_load();
        g.complete_load(t, Ok(vec![]));
        let view = g.render();
        assert_eq!(
            view.content,
            ContentView::Empty {
                message: "No issues found matching your criteria.".to_owned()
            }
        );
        assert_eq!(view.count_text, "0 issues");
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut g = grid(&["key"], 25);
        let first = g.begin_load();
        let second = g.begin_load();
        assert!(g.complete_load(second, Ok(many(2))));
        assert!(!g.complete_load(first, Ok(many(7))));
        assert_eq!(g.state().issues().len(), 2);

        let third = g.begin_load();
        assert!(!g.complete_load(second, Err(FetchError::InvalidQuery)));
        assert!(g.is_loading());
        assert!(g.complete_load(third, Ok(many(1))));
        assert_eq!(g.count_text(), "1 issue");
    }

    #[test]
    fn search_with_no_match_is_empty() {
        let mut g = grid(&["key"], 25);
        let t = g.begin_load();
        g.complete_load(t, Ok(many(3)));
        g.search("zzz");
        assert!(matches!(g.render().content, ContentView::Empty { .. }));
        assert_eq!(g.render().search_term, "zzz");
        g.search("");
        assert_eq!(g.count_text(), "3 issues");
    }

    #[test]
    fn paging_walks_and_clamps() {
        let mut g = grid(&["key"], 10);
        let t = g.begin_load();
        g.complete_load(t, Ok(many(25)));
        assert_eq!(g.page_count(), 3);
        g.next_page();
        assert_eq!(row_keys(&g)[0], "A-11");
        g.last_page();
        assert_eq!(row_keys(&g), vec!["A-21", "A-22", "A-23", "A-24", "A-25"]);
        g.next_page();
        assert_eq!(g.state().page(), 3);
        g.first_page();
        g.prev_page();
        assert_eq!(g.state().page(), 1);
        g.go_to_page(42);
        assert_eq!(g.state().page(), 3);

        let ContentView::Table(table) = g.render().content else {
            panic!("expected table");
        };
        let p = table.pagination.unwrap();
        assert_eq!(p.info, "Showing 21-25 of 25 issues");
        assert!(p.next.disabled);
    }

    #[test]
    fn reload_keeps_search_and_resets_page() {
        let mut g = grid(&["key"], 2);
        let t = g.begin_load();
        g.complete_load(t, Ok(many(12)));
        g.search("A-1");
        g.next_page();
        let t = g.begin_load();
        g.complete_load(t, Ok(many(12)));
        assert_eq!(g.state().page(), 1);
        assert_eq!(g.state().search_term(), "A-1");
        // A-1, A-10, A-11, A-12
        assert_eq!(g.count_text(), "4 issues");
    }

    #[test]
    fn configured_sort_applies_on_load() {
        let host = AppConfig::default();
        let mut g = IssueGrid::mount(
            &host,
            "default",
            GridOptions {
                fields: Some(vec!["key".to_owned(), "status".to_owned()]),
                sort_by: Some("status".to_owned()),
                ..GridOptions::default()
            },
        )
        .unwrap();
        let t = g.begin_load();
        g.complete_load(t, Ok(vec![issue("A-1", "To Do"), issue("A-2", "Done")]));
        assert_eq!(row_keys(&g), vec!["A-2", "A-1"]);
    }
}
