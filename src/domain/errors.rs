use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Remote store unavailable: {0}")]
    RemoteUnavailable(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid credentials")]
    Unauthorized,
}
