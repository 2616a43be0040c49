//! Orchestration error types
//!
//! "Not found" is deliberately not a variant here: point lookups return
//! `Ok(None)` and the reconciler recovers from absence locally. Every
//! variant below is fatal to the current run.

use thiserror::Error;

/// Provisioning errors
#[derive(Error, Debug)]
pub enum CloudError {
    /// A resource that must already exist (e.g. the base instance of a
    /// snapshot) was absent.
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// A provider operation reached its terminal status carrying an
    /// error payload. The payload is kept verbatim.
    #[error("Operation '{operation}' failed: {detail}")]
    OperationFailed {
        operation: String,
        detail: serde_json::Value,
    },

    /// A bounded wait exhausted its attempt budget. Distinct from
    /// [`CloudError::OperationFailed`]: the operation may well have
    /// succeeded while the resource never became reachable.
    #[error("Timed out waiting for {what} after {attempts} attempts")]
    Timeout { what: String, attempts: u32 },

    /// The desired-state description was rejected before any remote call.
    #[error("Invalid instance spec: {0}")]
    InvalidSpec(String),

    /// Any other provider failure (auth, quota, malformed request).
    #[error("Provider API error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, CloudError>;
