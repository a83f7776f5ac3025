use std::sync::Arc;
use std::time::Duration;

use jira_board::config::types::JiraConfig;
use jira_board::engine::{Engine, Event, JiraEngine, Request};
use jira_board::jira::auth::StaticCredentials;
use jira_board::jira::{Credentials, FetchError, SearchQuery};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn engine(server: &MockServer) -> JiraEngine {
    let config = JiraConfig {
        base_url: server.uri(),
        ..JiraConfig::default()
    };
    let creds = Credentials::Basic {
        username: "user".to_owned(),
        token: "pass".to_owned(),
    };
    JiraEngine::new(config, Arc::new(StaticCredentials(creds)))
}

fn query(jql: &str) -> SearchQuery {
    SearchQuery {
        jql: jql.to_owned(),
        fields: vec!["key".to_owned(), "status".to_owned()],
        max_results: 10,
    }
}

async fn recv(rx: std::sync::mpsc::Receiver<Event>) -> Event {
    tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(10)))
        .await
        .unwrap()
        .expect("engine should reply")
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_issues_round_trips_through_the_engine() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/search"))
        .and(query_param("jql", "project = APP"))
        .and(query_param("maxResults", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            include_str!("fixtures/search_response.json"),
            "application/json",
        ))
        .mount(&server)
        .await;

    let handle = engine(&server).start();
    let (tx, rx) = std::sync::mpsc::channel();
    handle.send(Request::FetchIssues {
        grid_idx: 1,
        seq: 4,
        query: query("project = APP"),
        reply_tx: tx,
    });

    match recv(rx).await {
        Event::IssuesFetched {
            grid_idx,
            seq,
            issues,
        } => {
            assert_eq!((grid_idx, seq), (1, 4));
            assert_eq!(issues.len(), 3);
        }
        other => panic!("expected IssuesFetched, got {other:?}"),
    }
    handle.send(Request::Shutdown);
}

#[tokio::test(flavor = "multi_thread")]
async fn http_failures_come_back_as_fetch_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/search"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let handle = engine(&server).start();
    let (tx, rx) = std::sync::mpsc::channel();
    handle.send(Request::FetchIssues {
        grid_idx: 0,
        seq: 9,
        query: query("project = = APP"),
        reply_tx: tx,
    });

    match recv(rx).await {
        Event::FetchError {
            grid_idx,
            seq,
            error,
        } => {
            assert_eq!((grid_idx, seq), (0, 9));
            assert_eq!(error, FetchError::InvalidQuery);
        }
        other => panic!("expected FetchError, got {other:?}"),
    }
}
