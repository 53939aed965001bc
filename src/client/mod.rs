//! Remote search endpoint adapter.
//!
//! [`SearchClient`] is the seam the orchestrator drives; [`HttpSearchClient`]
//! is the production implementation talking to a GitHub-compatible
//! `/search/repositories` endpoint. Clients never retry.

mod error;

pub use error::{body_excerpt, ErrorKind, SearchError, BODY_EXCERPT_CHARS, ERROR_BODY_READ_LIMIT};

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, Url};

use crate::config::ApiConfig;
use crate::model::{Query, ResultItem, SearchResponse};

/// Result of a single search: items in server order, or a typed failure.
pub type SearchOutcome = Result<Vec<ResultItem>, SearchError>;

const SEARCH_PATH: &str = "search/repositories";
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Stateless search adapter.
///
/// Implementations must be cancel-safe: dropping the returned future
/// abandons the request and releases its resources.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, query: &Query) -> SearchOutcome;
}

/// reqwest-backed [`SearchClient`].
pub struct HttpSearchClient {
    client: Client,
    endpoint: Url,
    user_agent: String,
    token: Option<String>,
}

impl HttpSearchClient {
    /// Build a client from API configuration.
    ///
    /// Fails if the base URL is not a valid absolute URL or the TLS backend
    /// cannot be initialised.
    pub fn new(api: &ApiConfig) -> Result<Self, ClientBuildError> {
        let endpoint = search_endpoint(&api.base_url)?;
        let client = Client::builder()
            .connect_timeout(api.connect_timeout())
            .timeout(api.request_timeout())
            .build()
            .map_err(ClientBuildError::Transport)?;

        Ok(Self {
            client,
            endpoint,
            user_agent: api.user_agent.clone(),
            token: api.token.clone(),
        })
    }

    /// Fully-qualified request URL for `query`.
    pub fn request_url(&self, query: &Query) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("q", query.as_str());
        url
    }
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    async fn search(&self, query: &Query) -> SearchOutcome {
        let url = self.request_url(query);
        tracing::debug!(url = %url, "Sending search request");

        let mut builder = self
            .client
            .get(url)
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, &self.user_agent);
        if let Some(token) = &self.token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| SearchError::from_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = read_error_body(response)
                .await
                .map_err(|e| SearchError::from_transport(&e))?;
            return Err(SearchError::http(status.as_u16(), &body));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SearchError::from_transport(&e))?;
        decode_items(&body)
    }
}

/// Decode a 2xx body into result items, preserving server order.
pub fn decode_items(body: &[u8]) -> SearchOutcome {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(SearchError::Decode {
            message: "response body is empty".to_string(),
        });
    }

    let payload: SearchResponse =
        serde_json::from_slice(body).map_err(|e| SearchError::Decode {
            message: e.to_string(),
        })?;

    tracing::debug!(
        total_count = payload.total_count,
        returned = payload.items.len(),
        "Decoded search response"
    );

    Ok(payload.items.into_iter().map(ResultItem::from).collect())
}

/// Read at most [`ERROR_BODY_READ_LIMIT`] bytes of an error body.
async fn read_error_body(mut response: Response) -> Result<String, reqwest::Error> {
    let mut body = Vec::new();
    while body.len() < ERROR_BODY_READ_LIMIT {
        match response.chunk().await? {
            Some(chunk) => body.extend_from_slice(&chunk),
            None => break,
        }
    }
    body.truncate(ERROR_BODY_READ_LIMIT);
    Ok(String::from_utf8_lossy(&body).into_owned())
}

fn search_endpoint(base_url: &str) -> Result<Url, ClientBuildError> {
    // Url::join drops the last path segment unless the base ends with '/'.
    let base = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    };
    Url::parse(&base)
        .and_then(|url| url.join(SEARCH_PATH))
        .map_err(|e| ClientBuildError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })
}

/// Errors raised while constructing an [`HttpSearchClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientBuildError {
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Transport(#[source] reqwest::Error),
}
