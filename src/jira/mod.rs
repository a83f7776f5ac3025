// Jira REST access: credentials, the HTTP client, and the error kinds a
// search can fail with.

pub mod auth;
pub mod client;
mod error;

pub use auth::{CredentialProvider, Credentials};
pub use client::{JiraClient, SearchQuery, connection_summary};
pub use error::FetchError;
