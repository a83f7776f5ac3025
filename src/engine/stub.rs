use tokio::sync::mpsc::UnboundedReceiver;

use crate::jira::FetchError;
use crate::types::Issue;

use super::interface::{Engine, EngineHandle, Event, Request};

/// A stub engine that serves pre-loaded fixture data without any network calls.
///
/// Useful for integration tests and UI demos that must not require Jira
/// credentials. With `error` set, every search fails with that error instead.
#[derive(Default)]
pub struct StubEngine {
    pub issues: Vec<Issue>,
    pub error: Option<FetchError>,
}

impl Engine for StubEngine {
    fn start(self) -> EngineHandle {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<Request>();
        std::thread::spawn(move || match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(self.run_loop(rx)),
            Err(e) => tracing::error!("stub engine: tokio runtime init failed: {e}"),
        });
        EngineHandle::new(tx)
    }
}

impl StubEngine {
    async fn run_loop(self, mut rx: UnboundedReceiver<Request>) {
        while let Some(req) = rx.recv().await {
            match req {
                Request::FetchIssues {
                    grid_idx,
                    seq,
                    reply_tx,
                    ..
                } => {
                    let event = match &self.error {
                        Some(error) => Event::FetchError {
                            grid_idx,
                            seq,
                            error: error.clone(),
                        },
                        None => Event::IssuesFetched {
                            grid_idx,
                            seq,
                            issues: self.issues.clone(),
                        },
                    };
                    let _ = reply_tx.send(event);
                }
                Request::Shutdown => break,
            }
        }
    }
}
