//! RTT client error types.

use super::convert::ConversionError;

/// Errors from the RTT HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum RttError {
    /// Client could not be built from its configuration
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Credentials were rejected (401/403)
    #[error("unauthorized: check RTT_USERNAME and RTT_PASSWORD")]
    Unauthorized,

    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned some other error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Body was not the expected JSON shape
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// JSON decoded but its content could not be normalized
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] ConversionError),
}

impl RttError {
    /// The client could not be configured, e.g. blank credentials.
    pub fn is_configuration(&self) -> bool {
        matches!(self, RttError::Configuration(_))
    }

    /// The API rejected the credentials.
    pub fn is_authentication(&self) -> bool {
        matches!(self, RttError::Unauthorized)
    }

    /// The request failed in transit or with a non-success status.
    pub fn is_transport(&self) -> bool {
        matches!(self, RttError::Http(_) | RttError::Api { .. })
    }

    /// The response arrived but could not be understood.
    pub fn is_malformed_payload(&self) -> bool {
        matches!(self, RttError::Json { .. } | RttError::MalformedPayload(_))
    }
}
