//! HTTP boundary.
//!
//! The crate talks to two endpoints: a GraphQL POST carrying a JSON document
//! and a weather GET carrying its parameters in the query string. Requests
//! are built with [`HttpRequest::graphql`] and [`HttpRequest::query`] and
//! sent through an [`HttpTransport`], so clients can be tested against a
//! scripted transport instead of the network.

use std::fmt;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

const USER_AGENT: &str = "portfolio";
const JSON: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        })
    }
}

/// An outgoing request. The body, when present, is a JSON document.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub json: Option<serde_json::Value>,
}

impl HttpRequest {
    /// A GraphQL POST of `payload` to `url`.
    pub fn graphql<T: Serialize>(url: &str, payload: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            method: HttpMethod::Post,
            url: url.to_string(),
            headers: vec![
                ("Accept".to_string(), JSON.to_string()),
                ("Content-Type".to_string(), JSON.to_string()),
                ("User-Agent".to_string(), USER_AGENT.to_string()),
            ],
            json: Some(serde_json::to_value(payload)?),
        })
    }

    /// A GET of `base` with `params` form-encoded into the query string.
    pub fn query(base: &str, params: &[(&str, &str)]) -> Result<Self, url::ParseError> {
        let url = url::Url::parse_with_params(base, params)?;
        Ok(Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: vec![
                ("Accept".to_string(), JSON.to_string()),
                ("User-Agent".to_string(), USER_AGENT.to_string()),
            ],
            json: None,
        })
    }

    /// Attach a bearer token.
    #[must_use]
    pub fn bearer(mut self, token: &str) -> Self {
        self.headers
            .push(("Authorization".to_string(), format!("bearer {token}")));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// A response whose body is `value` serialized.
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".to_string(), JSON.to_string())],
            body: value.to_string().into_bytes(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Numeric header value, e.g. the rate-limit counters.
    pub fn header_i64(&self, name: &str) -> Option<i64> {
        self.header(name).and_then(|v| v.trim().parse().ok())
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Body as text, for error messages.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Transport(String),
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Transport backed by a shared `reqwest::Client`. The timeout applies to
/// the whole request.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: StdDuration) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

fn transport_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::Transport(e.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(json) = &request.json {
            let body = serde_json::to_vec(json).map_err(|e| HttpError::Transport(e.to_string()))?;
            builder = builder.body(body);
        }

        let resp = builder.send().await.map_err(transport_error)?;
        let status = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = resp.bytes().await.map_err(transport_error)?.to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
pub(crate) use mock::MockTransport;

#[cfg(test)]
mod mock {
    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex, PoisonError};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::{HttpError, HttpMethod, HttpRequest, HttpResponse, HttpTransport};

    struct Reply {
        outcome: Result<HttpResponse, String>,
        delay: Duration,
    }

    type Routes = HashMap<(HttpMethod, String), VecDeque<Reply>>;

    /// Scripted replies keyed by method and exact URL, served in FIFO order.
    /// Every request is recorded.
    #[derive(Clone, Default)]
    pub(crate) struct MockTransport {
        routes: Arc<Mutex<Routes>>,
        sent: Arc<Mutex<Vec<HttpRequest>>>,
    }

    impl MockTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn respond(&self, method: HttpMethod, url: &str, response: HttpResponse) {
            self.script(method, url, Ok(response), Duration::ZERO);
        }

        /// Like [`respond`](Self::respond), but the reply arrives after
        /// `delay` of tokio time.
        pub(crate) fn respond_after(
            &self,
            method: HttpMethod,
            url: &str,
            delay: Duration,
            response: HttpResponse,
        ) {
            self.script(method, url, Ok(response), delay);
        }

        pub(crate) fn fail(&self, method: HttpMethod, url: &str, message: &str) {
            self.script(method, url, Err(message.to_string()), Duration::ZERO);
        }

        pub(crate) fn sent(&self) -> Vec<HttpRequest> {
            self.sent
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        fn script(
            &self,
            method: HttpMethod,
            url: &str,
            outcome: Result<HttpResponse, String>,
            delay: Duration,
        ) {
            self.routes
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entry((method, url.to_string()))
                .or_default()
                .push_back(Reply { outcome, delay });
        }
    }

    #[async_trait]
    impl HttpTransport for MockTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
            let key = (request.method, request.url.clone());
            self.sent
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(request);

            let reply = self
                .routes
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get_mut(&key)
                .and_then(VecDeque::pop_front);

            let Some(reply) = reply else {
                return Err(HttpError::Transport(format!(
                    "unscripted request {} {}",
                    key.0, key.1
                )));
            };
            if !reply.delay.is_zero() {
                tokio::time::sleep(reply.delay).await;
            }
            reply.outcome.map_err(HttpError::Transport)
        }
    }
}
