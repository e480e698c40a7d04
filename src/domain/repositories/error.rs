use thiserror::Error;
use uuid::Uuid;

/// Failures surfaced by repository implementations.
///
/// Not-found and ownership failures are distinct so the HTTP layer can map
/// them to 404 and 403; everything the backing store reports is folded into
/// `Database`. No variant is retried anywhere.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record {0} not found")]
    NotFound(Uuid),

    #[error("record {0} belongs to another user")]
    Forbidden(Uuid),

    #[error("record already exists")]
    Conflict,

    #[error("database error: {0}")]
    Database(String),
}
