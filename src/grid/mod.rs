//! The issue grid widget: a mounted, self-contained view over one JQL search
//! with search, column sorting and pagination.

mod options;
pub mod pagination;
pub mod sort;
mod state;
pub mod view;
mod widget;

use thiserror::Error;

pub use options::GridConfig;
pub use sort::{SortDirection, SortState};
pub use state::ViewState;
pub use view::{CellContent, ContentView, GridView, HeaderView, PageButton, PaginationView, RowView, TableView};
pub use widget::{IssueGrid, LoadStatus, LoadTicket};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("no grid named \"{0}\" is configured")]
    MountTargetNotFound(String),

    #[error("invalid grid option `{name}`: {reason}")]
    InvalidOption { name: &'static str, reason: String },
}
