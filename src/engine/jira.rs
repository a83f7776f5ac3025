use std::sync::Arc;
use std::sync::mpsc::Sender;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::config::types::JiraConfig;
use crate::jira::{CredentialProvider, JiraClient, SearchQuery};

use super::interface::{Engine, EngineHandle, Event, Request};

/// The real Jira backend engine.
///
/// Owns a tokio runtime on a dedicated thread. Every search runs as its own
/// task, so a slow request never holds up a newer one; the UI discards
/// replies whose `seq` is no longer current.
pub struct JiraEngine {
    config: JiraConfig,
    credentials: Arc<dyn CredentialProvider>,
}

impl JiraEngine {
    pub fn new(config: JiraConfig, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            config,
            credentials,
        }
    }
}

impl Engine for JiraEngine {
    fn start(self) -> EngineHandle {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<Request>();
        let handle = EngineHandle::new(tx);
        let spawned = std::thread::Builder::new()
            .name("jira-engine".to_owned())
            .spawn(move || match tokio::runtime::Runtime::new() {
                Ok(rt) => rt.block_on(self.run_loop(rx)),
                Err(e) => tracing::error!("engine: tokio runtime init failed: {e}"),
            });
        if let Err(e) = spawned {
            tracing::error!("engine: failed to spawn engine thread: {e}");
        }
        handle
    }
}

impl JiraEngine {
    async fn run_loop(self, mut rx: UnboundedReceiver<Request>) {
        let client = JiraClient::new(&self.config, self.credentials).map(Arc::new);
        if let Err(e) = &client {
            tracing::error!("engine: cannot build Jira client: {e}");
        }

        while let Some(req) = rx.recv().await {
            match req {
                Request::Shutdown => {
                    tracing::debug!("engine: shutting down");
                    break;
                }
                Request::FetchIssues {
                    grid_idx,
                    seq,
                    query,
                    reply_tx,
                } => match &client {
                    Ok(client) => {
                        tokio::spawn(fetch_issues(
                            Arc::clone(client),
                            grid_idx,
                            seq,
                            query,
                            reply_tx,
                        ));
                    }
                    Err(e) => {
                        let _ = reply_tx.send(Event::FetchError {
                            grid_idx,
                            seq,
                            error: e.clone(),
                        });
                    }
                },
            }
        }
    }
}

async fn fetch_issues(
    client: Arc<JiraClient>,
    grid_idx: usize,
    seq: u64,
    query: SearchQuery,
    reply_tx: Sender<Event>,
) {
    tracing::debug!("engine: FetchIssues[{grid_idx}] #{seq}");
    let event = match client.search(&query).await {
        Ok(issues) => {
            tracing::debug!(
                "engine: sending IssuesFetched[{grid_idx}] #{seq} count={}",
                issues.len()
            );
            Event::IssuesFetched {
                grid_idx,
                seq,
                issues,
            }
        }
        Err(error) => {
            tracing::debug!("engine: FetchIssues[{grid_idx}] #{seq} error: {error}");
            Event::FetchError {
                grid_idx,
                seq,
                error,
            }
        }
    };
    let _ = reply_tx.send(event);
}

