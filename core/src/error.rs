//! Error types for the users API client.
//!
//! # Design
//! `NotFound` only surfaces from strict lookups; the lenient parsers report
//! a 404 as `None`. Every other failure that originates upstream (bad status,
//! undecodable body, broken connection) keeps its own variant so callers can
//! log it precisely.
//!
//! `Upstream::body` holds at most `MAX_ERROR_BODY` bytes of what the upstream
//! sent; it is meant for logs, not for relaying to clients.

use thiserror::Error;

/// Upper bound on the upstream body kept in `ApiError::Upstream`.
pub const MAX_ERROR_BODY: usize = 512;

/// Errors returned by `UsersClient` parse methods and by transports
/// executing its requests.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The upstream returned 404 for a strict by-id lookup.
    #[error("user not found")]
    NotFound,

    /// The upstream returned a status outside the accepted range.
    #[error("upstream returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request never produced a response (DNS, connect, reset...).
    #[error("transport error: {0}")]
    Transport(String),

    /// A configured connect or request timeout elapsed.
    #[error("upstream request timed out")]
    Timeout,
}

impl ApiError {
    /// `Upstream` error for `status`, keeping a bounded prefix of `body`.
    pub fn upstream(status: u16, body: &str) -> Self {
        ApiError::Upstream {
            status,
            body: truncate(body, MAX_ERROR_BODY).to_string(),
        }
    }
}

/// Longest prefix of `s` within `max` bytes that ends on a char boundary.
fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
