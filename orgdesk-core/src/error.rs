//! Error types for orgdesk.

use thiserror::Error;

/// Errors that can occur in orgdesk operations.
#[derive(Error, Debug)]
pub enum OrgDeskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend request timed out after {0}s")]
    Timeout(u64),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Mutation failed: {0}")]
    Mutation(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for orgdesk operations.
pub type OrgDeskResult<T> = Result<T, OrgDeskError>;
