pub mod cart_repo;
pub mod catalog_repo;
pub mod credentials;
pub mod mailer;
pub mod memory;
pub mod models;
pub mod user_repo;

use diesel::pg::PgConnection;

use crate::db::DbPool;
use crate::domain::errors::DomainError;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::RemoteUnavailable(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::RemoteUnavailable(e.to_string())
    }
}

impl From<tokio::task::JoinError> for DomainError {
    fn from(e: tokio::task::JoinError) -> Self {
        DomainError::RemoteUnavailable(e.to_string())
    }
}

/// Run blocking Diesel work on the blocking pool with a pooled connection.
pub(crate) async fn blocking<T, F>(pool: &DbPool, f: F) -> Result<T, DomainError>
where
    F: FnOnce(&mut PgConnection) -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = pool.get()?;
        f(&mut conn)
    })
    .await?
}
