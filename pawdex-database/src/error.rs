/// Error kinds surfaced by the store modules.
///
/// Command handlers translate every variant into a user-visible reply;
/// none of these should escape the command boundary as an unhandled fault.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Input failed validation before touching storage.
    #[error("{0}")]
    Validation(String),

    /// The record to create already exists.
    #[error("the record already exists")]
    Conflict,

    /// The record to act on does not exist.
    #[error("no matching record")]
    NotFound,

    /// Underlying database failure.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Map an insert failure, turning unique-index violations into [`StoreError::Conflict`].
pub(crate) fn map_insert_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StoreError::Conflict,
        _ => StoreError::Database(err),
    }
}
