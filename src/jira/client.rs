use std::sync::Arc;

use reqwest::RequestBuilder;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;

use crate::config::types::JiraConfig;
use crate::types::{Issue, Myself, SearchResponse};

use super::auth::{CredentialProvider, Credentials};
use super::error::FetchError;

const MYSELF_ENDPOINT: &str = "/rest/api/3/myself";

/// Parameters of one issue search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub jql: String,
    pub fields: Vec<String>,
    pub max_results: u32,
}

impl SearchQuery {
    /// Query-string pairs in the order Jira documents them.
    pub fn params(&self) -> [(&'static str, String); 3] {
        [
            ("jql", self.jql.clone()),
            ("fields", self.fields.join(",")),
            ("maxResults", self.max_results.to_string()),
        ]
    }
}

/// A thin Jira REST client. Every request is a fresh round trip.
///
/// Credentials are resolved on first use and reused afterwards. A 401
/// drops them so the next request resolves them again.
pub struct JiraClient {
    http: reqwest::Client,
    base_url: String,
    search_endpoint: String,
    credentials: Arc<dyn CredentialProvider>,
    resolved: tokio::sync::Mutex<Option<Credentials>>,
}

impl JiraClient {
    pub fn new(
        config: &JiraConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("jira-board/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::network(&e))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            search_endpoint: config.search_endpoint.clone(),
            credentials,
            resolved: tokio::sync::Mutex::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run a search and return its issues.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Issue>, FetchError> {
        let url = format!("{}{}", self.base_url, self.search_endpoint);
        tracing::debug!(
            "jira: GET {url} jql={:?} fields={} maxResults={}",
            query.jql,
            query.fields.join(","),
            query.max_results
        );
        let req = self.http.get(&url).query(&query.params());
        let resp: SearchResponse = self.send(req).await?;
        tracing::debug!("jira: search returned {} issues", resp.issues.len());
        Ok(resp.issues)
    }

    /// Fetch the authenticated user; used to verify credentials.
    pub async fn myself(&self) -> Result<Myself, FetchError> {
        let url = format!("{}{MYSELF_ENDPOINT}", self.base_url);
        self.send(self.http.get(&url)).await
    }

    /// Verify the connection and describe who we are connected as.
    pub async fn check(&self) -> Result<String, FetchError> {
        let me = self.myself().await?;
        Ok(connection_summary(&self.base_url, &me))
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, FetchError> {
        let req = self
            .authorize(req)
            .await?
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");

        let resp = req.send().await.map_err(|e| {
            tracing::debug!("jira: transport error: {e:#}");
            FetchError::network(&e)
        })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!("jira: request failed with {status}");
            if status == reqwest::StatusCode::UNAUTHORIZED {
                self.resolved.lock().await.take();
            }
            return Err(FetchError::from_status(status));
        }

        let body = resp.bytes().await.map_err(|e| FetchError::network(&e))?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    async fn authorize(&self, req: RequestBuilder) -> Result<RequestBuilder, FetchError> {
        Ok(match self.resolve_credentials().await? {
            Credentials::Basic { username, token } => req.basic_auth(username, Some(token)),
            Credentials::Bearer(token) => req.bearer_auth(token),
        })
    }

    /// Cached credentials, or ask the provider on the blocking pool. At most
    /// one resolution runs at a time.
    async fn resolve_credentials(&self) -> Result<Credentials, FetchError> {
        let mut cached = self.resolved.lock().await;
        if let Some(creds) = cached.as_ref() {
            return Ok(creds.clone());
        }
        let provider = Arc::clone(&self.credentials);
        let creds = tokio::task::spawn_blocking(move || provider.credentials())
            .await
            .map_err(|e| FetchError::Credentials(e.to_string()))?
            .map_err(|e| FetchError::Credentials(format!("{e:#}")))?;
        tracing::debug!("jira: resolved credentials");
        *cached = Some(creds.clone());
        Ok(creds)
    }
}

/// One-line result of a successful connection check.
pub fn connection_summary(base_url: &str, me: &Myself) -> String {
    match &me.email_address {
        Some(email) => format!("Connected to {base_url} as {} <{email}>", me.display_name),
        None => format!("Connected to {base_url} as {}", me.display_name),
    }
}
