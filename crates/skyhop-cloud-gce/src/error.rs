//! GCE provider error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GceError {
    /// Non-success response from the API, with the message parsed out
    /// of the error body when possible.
    #[error("GCE API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GceError>;

impl From<GceError> for skyhop_cloud::CloudError {
    fn from(err: GceError) -> Self {
        skyhop_cloud::CloudError::Api(err.to_string())
    }
}
