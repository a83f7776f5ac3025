use std::sync::mpsc::Sender;

use crate::jira::{FetchError, SearchQuery};
use crate::types::Issue;

/// Handle to the backend engine held by the UI layer.
///
/// Cheaply cloneable. When the last handle is dropped the sender channel
/// closes, signalling the engine to shut down.
#[derive(Clone)]
pub struct EngineHandle {
    tx: tokio::sync::mpsc::UnboundedSender<Request>,
}

impl EngineHandle {
    pub(super) fn new(tx: tokio::sync::mpsc::UnboundedSender<Request>) -> Self {
        Self { tx }
    }

    /// Send a request to the engine. Non-blocking, returns immediately.
    pub fn send(&self, req: Request) {
        // Ignore errors: if the receiver is gone the engine has already shut down.
        let _ = self.tx.send(req);
    }
}

/// Trait implemented by both `JiraEngine` and `StubEngine`.
pub trait Engine: Send + 'static {
    fn start(self) -> EngineHandle;
}

/// All operations the UI layer can send to the engine.
pub enum Request {
    /// Run one issue search for a grid. `seq` is the grid's load ticket and
    /// is echoed back unchanged.
    FetchIssues {
        grid_idx: usize,
        seq: u64,
        query: SearchQuery,
        reply_tx: Sender<Event>,
    },
    Shutdown,
}

/// All events the engine can push back to the UI.
#[derive(Debug)]
pub enum Event {
    IssuesFetched {
        grid_idx: usize,
        seq: u64,
        issues: Vec<Issue>,
    },
    FetchError {
        grid_idx: usize,
        seq: u64,
        error: FetchError,
    },
}
