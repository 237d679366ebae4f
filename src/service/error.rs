use thiserror::Error;

/// Failures raised by a [`BackendService`](super::BackendService) call
/// itself, as opposed to errors the backend reports in its response body.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never produced a response (connect failure, timeout, ...).
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response without a parseable error body.
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// 2xx response whose body did not match the expected shape.
    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// Error raised by a non-HTTP service implementation.
    #[error("{0}")]
    Other(String),
}

impl ServiceError {
    pub fn other(message: impl Into<String>) -> Self {
        ServiceError::Other(message.into())
    }
}
