//! Failure classification for search requests.

use thiserror::Error;

/// Maximum number of characters of a non-2xx body kept in the message.
pub const BODY_EXCERPT_CHARS: usize = 200;

/// Bytes of a non-2xx body read before the rest is discarded.
pub const ERROR_BODY_READ_LIMIT: usize = 4 * 1024;

/// Coarse failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport-level failure: unreachable host, timeout, reset.
    Network,
    /// Server answered with a non-2xx status.
    Http,
    /// 2xx response whose payload could not be decoded.
    Decode,
}

/// Errors that can occur while executing a search.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("HTTP {status}: {excerpt}")]
    Http { status: u16, excerpt: String },

    #[error("Malformed response: {message}")]
    Decode { message: String },
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::Network { .. } => ErrorKind::Network,
            SearchError::Http { .. } => ErrorKind::Http,
            SearchError::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// Get error type string for log fields
    pub fn error_type(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Network => "network_error",
            ErrorKind::Http => "http_error",
            ErrorKind::Decode => "decode_error",
        }
    }

    /// Build an `Http` error, shortening the response body.
    pub fn http(status: u16, body: &str) -> Self {
        SearchError::Http {
            status,
            excerpt: body_excerpt(body),
        }
    }

    /// Classify a transport error from reqwest.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else if err.is_connect() {
            format!("connection failed: {}", err)
        } else {
            err.to_string()
        };
        SearchError::Network { message }
    }
}

/// Collapse whitespace and cut the body to [`BODY_EXCERPT_CHARS`] characters.
pub fn body_excerpt(body: &str) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return "<empty body>".to_string();
    }

    match collapsed.char_indices().nth(BODY_EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}…", &collapsed[..cut]),
        None => collapsed,
    }
}
