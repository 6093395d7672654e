//! Error types shared by every API call.

use thiserror::Error;

/// Errors surfaced by [`Client`](crate::Client) and its sub-clients.
///
/// Variants separate client construction, request construction, retry
/// exhaustion, application rejection, and response decoding so callers
/// can branch on the failure class instead of parsing message text.
/// Nothing is logged internally; every failure is returned as-is.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ApiClientError {
    /// Raised when the client itself cannot be constructed, for example
    /// when the proxy address does not parse.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the construction failure.
        message: String,
    },
    /// Raised when a request cannot be formed. Never retried.
    #[error("failed to build request: {message}")]
    Build {
        /// Description of the request-construction failure.
        message: String,
    },
    /// Raised when the retry budget is spent without a final response.
    #[error("gave up after {attempts} attempts, last error: {last_error}")]
    Exhausted {
        /// Total attempts made, including the first.
        attempts: u32,
        /// Last transport failure, or the trimmed body of the last
        /// response when one was received.
        last_error: String,
    },
    /// Raised when the final response carries a non-success status.
    ///
    /// The transport does not interpret status semantics further;
    /// callers branch on the embedded code.
    #[error("error {status} {body}")]
    Status {
        /// Numeric HTTP status code of the final response.
        status: u16,
        /// Raw response body text.
        body: String,
    },
    /// Raised when a success response does not match the expected schema.
    #[error("failed to decode response body: {message}")]
    Decode {
        /// Description of the deserialization failure.
        message: String,
    },
}
