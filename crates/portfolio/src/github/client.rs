//! GitHub GraphQL client.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};

use super::error::GitHubError;
use super::query::QueryLimits;
use super::types::{GraphQlResponse, RawUser, RepositoriesData};
use crate::http::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

/// Public GitHub GraphQL endpoint.
pub const DEFAULT_GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// GitHub GraphQL client.
///
/// The token is optional. Without one the request goes out anonymously and
/// GitHub answers with an authentication error, which the aggregator logs.
#[derive(Clone)]
pub struct GitHubClient {
    transport: Arc<dyn HttpTransport>,
    token: Option<String>,
    api_url: String,
}

impl GitHubClient {
    /// Create a client backed by reqwest.
    pub fn new(token: Option<String>, timeout: StdDuration) -> Result<Self, GitHubError> {
        let transport =
            ReqwestTransport::new(timeout).map_err(|e| GitHubError::Http(e.to_string()))?;
        Ok(Self::new_with_transport(token, Arc::new(transport)))
    }

    pub fn new_with_transport(token: Option<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            token: token.filter(|t| !t.trim().is_empty()),
            api_url: DEFAULT_GITHUB_GRAPHQL_URL.to_string(),
        }
    }

    /// Point the client at a different GraphQL endpoint (GitHub Enterprise).
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Whether requests carry an `Authorization` header.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Run the combined pinned + recent repositories query.
    ///
    /// A `null` user, a missing `data` member or any GraphQL error entry is
    /// an error; partial data is not salvaged.
    pub async fn fetch_user_repositories(
        &self,
        limits: &QueryLimits,
    ) -> Result<RawUser, GitHubError> {
        let mut request = HttpRequest::graphql(&self.api_url, &limits.to_request())?;
        if let Some(token) = &self.token {
            request = request.bearer(token);
        }

        tracing::debug!(login = %limits.login, url = %self.api_url, "Querying repositories");

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| GitHubError::Http(e.to_string()))?;

        if !response.is_success() {
            return Err(status_error(&response));
        }

        let envelope: GraphQlResponse<RepositoriesData> = response.decode()?;

        if let Some(errors) = envelope.errors
            && !errors.is_empty()
        {
            return Err(GitHubError::GraphQl(
                errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        envelope
            .data
            .and_then(|d| d.user)
            .ok_or_else(|| GitHubError::InvalidResponse("response has no data.user".to_string()))
    }
}

/// Map a non-success status to an error.
fn status_error(response: &HttpResponse) -> GitHubError {
    let exhausted = response.header_i64("x-ratelimit-remaining") == Some(0);

    match response.status {
        429 => GitHubError::RateLimited {
            reset_at: rate_limit_reset(response),
        },
        403 if exhausted => GitHubError::RateLimited {
            reset_at: rate_limit_reset(response),
        },
        401 | 403 => GitHubError::AuthRequired,
        status => GitHubError::Api {
            status,
            message: response.text(),
        },
    }
}

fn rate_limit_reset(response: &HttpResponse) -> DateTime<Utc> {
    response
        .header_i64("x-ratelimit-reset")
        .and_then(|epoch| DateTime::from_timestamp(epoch, 0))
        .unwrap_or_else(Utc::now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, MockTransport};

    fn to_headers(pairs: Vec<(&str, &str)>) -> Vec<(String, String)> {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn response(status: u16, headers: Vec<(&str, &str)>, body: impl AsRef<[u8]>) -> HttpResponse {
        HttpResponse {
            status,
            headers: to_headers(headers),
            body: body.as_ref().to_vec(),
        }
    }

    fn client(transport: &MockTransport, token: Option<&str>) -> GitHubClient {
        GitHubClient::new_with_transport(token.map(String::from), Arc::new(transport.clone()))
    }

    fn user_body() -> String {
        serde_json::json!({
            "data": {
                "user": {
                    "pinnedItems": { "nodes": [
                        { "id": "R_1", "name": "one", "url": "https://github.com/octocat/one" }
                    ] },
                    "repositories": { "nodes": [
                        { "id": "R_2", "name": "two", "url": "https://github.com/octocat/two" }
                    ] }
                }
            }
        })
        .to_string()
    }

    #[tokio::test]
    async fn posts_query_with_bearer_token() {
        let transport = MockTransport::new();
        transport.respond(
            HttpMethod::Post,
            DEFAULT_GITHUB_GRAPHQL_URL,
            response(200, vec![], user_body()),
        );

        let user = client(&transport, Some("secret"))
            .fetch_user_repositories(&QueryLimits::for_login("octocat"))
            .await
            .unwrap();
        assert_eq!(user.pinned_items.nodes.len(), 1);
        assert_eq!(user.repositories.nodes.len(), 1);

        let requests = transport.sent();
        assert_eq!(requests.len(), 1);
        let req = &requests[0];
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.header("authorization"), Some("bearer secret"));
        assert_eq!(req.header("user-agent"), Some("portfolio"));
        assert_eq!(req.header("content-type"), Some("application/json"));

        let body = req.json.as_ref().unwrap();
        assert_eq!(body["variables"]["login"], "octocat");
        assert!(body["query"].as_str().unwrap().contains("pinnedItems"));
    }

    #[tokio::test]
    async fn omits_authorization_without_token() {
        let transport = MockTransport::new();
        transport.respond(
            HttpMethod::Post,
            DEFAULT_GITHUB_GRAPHQL_URL,
            response(200, vec![], user_body()),
        );

        let gh = client(&transport, Some("  "));
        assert!(!gh.has_token());
        gh.fetch_user_repositories(&QueryLimits::for_login("octocat"))
            .await
            .unwrap();
        assert!(transport.sent()[0].header("authorization").is_none());
    }

    #[tokio::test]
    async fn custom_api_url_is_used() {
        let transport = MockTransport::new();
        let url = "https://ghe.example.com/api/graphql";
        transport.respond(HttpMethod::Post, url, response(200, vec![], user_body()));

        let gh = client(&transport, None).with_api_url(url);
        assert_eq!(gh.api_url(), url);
        assert!(
            gh.fetch_user_repositories(&QueryLimits::for_login("octocat"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn unauthorized_maps_to_auth_required() {
        let transport = MockTransport::new();
        transport.respond(
            HttpMethod::Post,
            DEFAULT_GITHUB_GRAPHQL_URL,
            response(401, vec![], r#"{"message":"Bad credentials"}"#),
        );

        let err = client(&transport, Some("bad"))
            .fetch_user_repositories(&QueryLimits::for_login("octocat"))
            .await
            .unwrap_err();
        assert!(matches!(err, GitHubError::AuthRequired));
    }

    #[tokio::test]
    async fn exhausted_quota_maps_to_rate_limited() {
        let transport = MockTransport::new();
        transport.respond(
            HttpMethod::Post,
            DEFAULT_GITHUB_GRAPHQL_URL,
            response(
                403,
                vec![
                    ("x-ratelimit-remaining", "0"),
                    ("x-ratelimit-reset", "1700000000"),
                ],
                "rate limited",
            ),
        );

        let err = client(&transport, Some("t"))
            .fetch_user_repositories(&QueryLimits::for_login("octocat"))
            .await
            .unwrap_err();
        match err {
            GitHubError::RateLimited { reset_at } => assert_eq!(reset_at.timestamp(), 1_700_000_000),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn server_error_maps_to_api_error() {
        let transport = MockTransport::new();
        transport.respond(
            HttpMethod::Post,
            DEFAULT_GITHUB_GRAPHQL_URL,
            response(502, vec![], "bad gateway"),
        );

        let err = client(&transport, Some("t"))
            .fetch_user_repositories(&QueryLimits::for_login("octocat"))
            .await
            .unwrap_err();
        assert!(matches!(err, GitHubError::Api { status: 502, ref message } if message == "bad gateway"));
    }

    #[tokio::test]
    async fn graphql_errors_fail_the_call() {
        let transport = MockTransport::new();
        transport.respond(
            HttpMethod::Post,
            DEFAULT_GITHUB_GRAPHQL_URL,
            response(
                200,
                vec![],
                r#"{"data":{"user":null},"errors":[{"message":"Could not resolve to a User with the login of 'ghost'."}]}"#,
            ),
        );

        let err = client(&transport, Some("t"))
            .fetch_user_repositories(&QueryLimits::for_login("ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, GitHubError::GraphQl(ref msgs) if msgs.len() == 1));
    }

    #[tokio::test]
    async fn missing_user_is_invalid_response() {
        let transport = MockTransport::new();
        transport.respond(
            HttpMethod::Post,
            DEFAULT_GITHUB_GRAPHQL_URL,
            response(200, vec![], r#"{"data":{}}"#),
        );

        let err = client(&transport, None)
            .fetch_user_repositories(&QueryLimits::for_login("octocat"))
            .await
            .unwrap_err();
        assert!(matches!(err, GitHubError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn malformed_body_is_json_error() {
        let transport = MockTransport::new();
        transport.respond(
            HttpMethod::Post,
            DEFAULT_GITHUB_GRAPHQL_URL,
            response(200, vec![], "<html>oops</html>"),
        );

        let err = client(&transport, None)
            .fetch_user_repositories(&QueryLimits::for_login("octocat"))
            .await
            .unwrap_err();
        assert!(matches!(err, GitHubError::Json(_)));
    }

    #[tokio::test]
    async fn transport_failure_is_http_error() {
        let transport = MockTransport::new();
        transport.fail(
            HttpMethod::Post,
            DEFAULT_GITHUB_GRAPHQL_URL,
            "connection refused",
        );

        let err = client(&transport, None)
            .fetch_user_repositories(&QueryLimits::for_login("octocat"))
            .await
            .unwrap_err();
        assert!(matches!(err, GitHubError::Http(ref m) if m.contains("connection refused")));
    }

    #[test]
    fn rate_limit_reset_falls_back_to_now() {
        let before = Utc::now();
        let reset = rate_limit_reset(&response(403, vec![("x-ratelimit-reset", "soon")], ""));
        assert!(reset >= before);
    }

    #[test]
    fn plain_forbidden_is_auth_required() {
        let err = status_error(&response(403, vec![("x-ratelimit-remaining", "12")], ""));
        assert!(matches!(err, GitHubError::AuthRequired));

        let err = status_error(&response(429, vec![], ""));
        assert!(matches!(err, GitHubError::RateLimited { .. }));
    }
}
