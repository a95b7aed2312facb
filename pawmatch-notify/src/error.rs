//! Errors raised while delivering match notifications.

use thiserror::Error;

/// Errors from [`crate::MatchNotifier::notify`].
///
/// Messages are captured as strings so the error stays `Clone` and can be
/// replayed by test doubles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    /// The notification service did not answer within the configured timeout.
    #[error("notification to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Endpoint that was contacted.
        url: String,
        /// Timeout that elapsed, in seconds.
        timeout_secs: u64,
    },
    /// The request could not be delivered.
    #[error("notification to {url} failed: {message}")]
    Network {
        /// Endpoint that was contacted.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The notification service answered with a non-success status.
    #[error("notification service at {url} returned HTTP {status}: {body}")]
    HttpStatus {
        /// Endpoint that was contacted.
        url: String,
        /// Status code returned.
        status: u16,
        /// Response body, if any was readable.
        body: String,
    },
    /// The match could not be encoded as JSON.
    #[error("failed to encode notification: {message}")]
    Serialise {
        /// Encoder error description.
        message: String,
    },
}

/// Errors building an [`crate::HttpMatchNotifier`].
#[derive(Debug, Error)]
pub enum NotifierBuildError {
    /// The endpoint is not an absolute HTTP(S) URL.
    #[error("invalid notification endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        /// Endpoint as configured.
        endpoint: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// The endpoint parsed but does not use HTTP or HTTPS.
    #[error("notification endpoint {endpoint:?} must use http or https")]
    UnsupportedScheme {
        /// Endpoint as configured.
        endpoint: String,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}
