//! Fetch error types
//!
//! Every variant means the same thing to the user ("could not load articles").
//! The variants only exist so the diagnostic log says which step failed.

use thiserror::Error;

/// Errors that can occur while resolving a query against the remote API
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, TLS, timeout, ...)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status code
    #[error("Server returned status {0}")]
    Status(reqwest::StatusCode),

    /// The response body was not valid JSON for the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The JSON body had no `items` field
    #[error("Response did not contain an `items` field")]
    MissingItems,

    /// The configured API base URL could not be used to build a request
    #[error("Invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}
