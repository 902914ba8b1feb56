use tracing::warn;

/// Uniform failure raised by every store operation.
///
/// Connectivity loss, constraint violations, malformed SQL and column decode
/// failures all arrive here with the driver error kept as the source.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("data access failure: {0}")]
    DataAccess(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        warn!("Data access failure: {}", err);
        StoreError::DataAccess(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
