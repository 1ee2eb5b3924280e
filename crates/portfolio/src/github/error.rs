//! GitHub API error types.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur when querying the GitHub GraphQL API.
///
/// None of these reach callers of the aggregator; they are logged and
/// collapsed into an empty listing.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Transport failure (connect, TLS, timeout, reset).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Response body was not valid JSON for the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limit exceeded. Resets at {reset_at}")]
    RateLimited { reset_at: DateTime<Utc> },

    #[error("Authentication required")]
    AuthRequired,

    /// The GraphQL layer reported errors alongside (or instead of) data.
    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// The response decoded but lacks the expected top-level field.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Check if a GitHubError indicates rate limiting.
pub fn is_rate_limit_error(e: &GitHubError) -> bool {
    match e {
        GitHubError::RateLimited { .. } => true,
        GitHubError::Api { status, .. } => *status == 429,
        _ => false,
    }
}

/// Extract a short error message suitable for display.
///
/// Takes the first line of an error message, which keeps multi-line API
/// bodies out of single-line log records.
#[inline]
pub fn short_error_message(e: &impl std::error::Error) -> String {
    let full = e.to_string();
    full.lines().next().unwrap_or(&full).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_rate_limit_error() {
        let rate_limited = GitHubError::RateLimited {
            reset_at: Utc::now(),
        };
        assert!(is_rate_limit_error(&rate_limited));

        let too_many = GitHubError::Api {
            status: 429,
            message: "slow down".to_string(),
        };
        assert!(is_rate_limit_error(&too_many));

        assert!(!is_rate_limit_error(&GitHubError::AuthRequired));
        assert!(!is_rate_limit_error(&GitHubError::InvalidResponse(
            "no user".to_string()
        )));
    }

    #[test]
    fn test_graphql_error_joins_messages() {
        let err = GitHubError::GraphQl(vec![
            "Could not resolve to a User".to_string(),
            "second".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "GraphQL error: Could not resolve to a User; second"
        );
    }

    #[test]
    fn test_short_error_message_multiline() {
        let err = GitHubError::Api {
            status: 502,
            message: "bad gateway\n<html>...</html>".to_string(),
        };
        assert_eq!(short_error_message(&err), "API error (502): bad gateway");
    }

    #[test]
    fn test_json_error_from_serde() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: GitHubError = parse.unwrap_err().into();
        assert!(err.to_string().starts_with("JSON error"));
    }
}
