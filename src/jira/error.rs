use thiserror::Error;

/// Why a request to Jira did not produce a result.
///
/// The `Display` text is what the grid shows in place of the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Failed to authenticate with JIRA. Please check your credentials.")]
    Authentication,
    #[error("Invalid JQL query. Please check your syntax.")]
    InvalidQuery,
    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },
    #[error("Network error occurred. Please check your connection.")]
    Network { detail: String },
    #[error("Unexpected response from JIRA: {0}")]
    Decode(String),
    #[error("No JIRA credentials available: {0}")]
    Credentials(String),
}

impl FetchError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: http::StatusCode) -> Self {
        match status {
            http::StatusCode::UNAUTHORIZED => Self::Authentication,
            http::StatusCode::BAD_REQUEST => Self::InvalidQuery,
            other => Self::Http {
                status: other.as_u16(),
                reason: other.canonical_reason().unwrap_or_default().to_owned(),
            },
        }
    }

    pub(crate) fn network(err: &reqwest::Error) -> Self {
        Self::Network {
            detail: format!("{err:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_maps_to_authentication() {
        let e = FetchError::from_status(http::StatusCode::UNAUTHORIZED);
        assert_eq!(e, FetchError::Authentication);
        assert_eq!(
            e.to_string(),
            "Failed to authenticate with JIRA. Please check your credentials."
        );
    }

    #[test]
    fn bad_request_maps_to_invalid_query() {
        let e = FetchError::from_status(http::StatusCode::BAD_REQUEST);
        assert_eq!(e.to_string(), "Invalid JQL query. Please check your syntax.");
    }

    #[test]
    fn other_statuses_carry_code_and_reason() {
        let e = FetchError::from_status(http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.to_string(), "HTTP 500: Internal Server Error");
        let e = FetchError::from_status(http::StatusCode::FORBIDDEN);
        assert_eq!(e.to_string(), "HTTP 403: Forbidden");
    }

    #[test]
    fn network_text_hides_transport_detail() {
        let e = FetchError::Network {
            detail: "dns error".to_owned(),
        };
        assert_eq!(
            e.to_string(),
            "Network error occurred. Please check your connection."
        );
    }
}
