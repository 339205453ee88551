//! Error types for the storepay client.

/// Errors returned by [`crate::StorepayClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// Error message from the `{"error": ...}` body.
        message: String,
        /// HTTP status code.
        status: u16,
    },
}
