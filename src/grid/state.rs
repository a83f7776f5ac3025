use crate::fields::Field;
use crate::filter::filter_issues;
use crate::types::Issue;

use super::pagination::{clamp_page, page_bounds, page_count};
use super::sort::{SortState, sort_indices, toggle};

/// Issue list, search term, sort and page of one grid.
///
/// `visible` always holds indices into `issues`: the search-filtered subset,
/// ordered by the active sort. Every mutation re-derives it.
#[derive(Debug, Clone)]
pub struct ViewState {
    issues: Vec<Issue>,
    visible: Vec<usize>,
    search: String,
    sort: Option<SortState>,
    page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            issues: Vec::new(),
            visible: Vec::new(),
            search: String::new(),
            sort: None,
            page: 1,
        }
    }
}

impl ViewState {
    pub fn with_sort(sort: Option<SortState>) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Number of issues passing the current search.
    pub fn filtered_len(&self) -> usize {
        self.visible.len()
    }

    /// Filtered issues in display order.
    pub fn filtered(&self) -> impl Iterator<Item = &Issue> {
        self.visible.iter().map(|&i| &self.issues[i])
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self, page_size: usize) -> usize {
        page_count(self.visible.len(), page_size)
    }

    /// Issues shown on the current page.
    pub fn page_issues(&self, page_size: usize) -> impl Iterator<Item = &Issue> {
        let range = page_bounds(self.page, self.visible.len(), page_size);
        self.visible[range].iter().map(|&i| &self.issues[i])
    }

    /// Replace the full list, keeping the search term and sort. Returns to
    /// page 1.
    pub fn replace_issues(&mut self, issues: Vec<Issue>, fields: &[Field]) {
        self.issues = issues;
        self.derive(fields);
        self.page = 1;
    }

    pub fn set_search(&mut self, term: &str, fields: &[Field]) {
        term.clone_into(&mut self.search);
        self.derive(fields);
        self.page = 1;
    }

    /// Select a column header: toggles direction on the active column,
    /// otherwise sorts the new column ascending.
    pub fn sort_by(&mut self, field: &Field, fields: &[Field]) {
        self.sort = Some(toggle(self.sort.as_ref(), field));
        self.derive(fields);
        self.page = 1;
    }

    /// Jump to `page`, clamped to the valid range.
    pub fn go_to_page(&mut self, page: usize, page_size: usize) {
        self.page = clamp_page(page, self.visible.len(), page_size);
    }

    fn derive(&mut self, fields: &[Field]) {
        self.visible = filter_issues(&self.issues, fields, &self.search);
        if let Some(sort) = &self.sort {
            sort_indices(&self.issues, &mut self.visible, sort);
        }
    }
}
