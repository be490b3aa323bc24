use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while asking OpenUV for a report.
///
/// Nothing here is retried by the client; each variant is handed straight
/// back to the caller.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be put together (bad base URL, transport
    /// builder failure).
    #[error("failed to build OpenUV request: {0}")]
    Request(String),

    /// The API key is empty or cannot be sent as a header value.
    #[error("invalid OpenUV API key: {0}")]
    InvalidApiKey(String),

    /// DNS, TLS, connection or timeout failure while talking to the API.
    #[error("OpenUV request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("OpenUV returned status {status}: {message}")]
    Api { status: StatusCode, message: String },

    /// The body was not JSON in the shape of a UV report.
    #[error("failed to decode OpenUV response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// True when the transport gave up because a configured timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Transport(e) if e.is_timeout())
    }
}
