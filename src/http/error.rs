//! Classification of unsuccessful HTTP responses.

use reqwest::StatusCode;

/// A non-2xx response from the release API.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpError {
    /// Rate limit exceeded (HTTP 403 with rate limit message or 429)
    RateLimitExceeded(u16),
    /// Resource not found (HTTP 404), usually a repository without releases
    NotFound(u16),
    /// Forbidden access (HTTP 403 non-rate-limit)
    Forbidden(u16),
    /// Other client errors
    ClientError(u16),
    /// 5xx responses
    ServerError(u16),
}

impl HttpError {
    /// The HTTP status code carried by this error.
    pub fn status(&self) -> u16 {
        match self {
            HttpError::RateLimitExceeded(s)
            | HttpError::NotFound(s)
            | HttpError::Forbidden(s)
            | HttpError::ClientError(s)
            | HttpError::ServerError(s) => *s,
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::RateLimitExceeded(s) => {
                write!(f, "HTTP {}: API rate limit exceeded, try again later", s)
            }
            HttpError::NotFound(s) => write!(f, "HTTP {}: no release found", s),
            HttpError::Forbidden(s) => write!(f, "HTTP {}: access forbidden", s),
            HttpError::ClientError(s) => write!(f, "HTTP {}: request rejected", s),
            HttpError::ServerError(s) => write!(f, "HTTP {}: server error", s),
        }
    }
}

impl std::error::Error for HttpError {}

/// Classifies a non-success status.
///
/// `body` is consulted only to tell a rate limit apart from a plain 403.
pub fn classify_status(status: StatusCode, body: &str) -> HttpError {
    let code = status.as_u16();
    match status {
        StatusCode::TOO_MANY_REQUESTS => HttpError::RateLimitExceeded(code),
        StatusCode::FORBIDDEN => {
            if body.to_lowercase().contains("rate limit") {
                HttpError::RateLimitExceeded(code)
            } else {
                HttpError::Forbidden(code)
            }
        }
        StatusCode::NOT_FOUND => HttpError::NotFound(code),
        s if s.is_server_error() => HttpError::ServerError(code),
        _ => HttpError::ClientError(code),
    }
}
