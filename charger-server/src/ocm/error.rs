//! Open Charge Map API error types.

/// Errors that can occur when interacting with the Open Charge Map API.
#[derive(Debug, thiserror::Error)]
pub enum OcmError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check OCM_API_KEY")]
    Unauthorized,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Mock fixture could not be loaded
    #[error("fixture error: {message}")]
    Fixture { message: String },
}
