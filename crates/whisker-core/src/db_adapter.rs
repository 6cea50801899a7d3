//! Adapter layer for whisker-db infrastructure.
//!
//! Maps `DbError` onto `WhiskerError` so engine code only deals with the
//! domain error type.

use crate::errors::WhiskerError;

/// Convert a whisker-db error to a whisker-core error.
pub fn from_db_error(err: whisker_db::DbError) -> WhiskerError {
    use whisker_db::DbError;

    match err {
        DbError::Io(io_err) => WhiskerError::Io(io_err),

        DbError::IndexIo { path, message } => WhiskerError::IndexIo { path, message },

        DbError::IndexParse { path, message } => WhiskerError::IndexParse { path, message },

        DbError::IndexNotFound { path } => WhiskerError::IndexNotFound(path),

        DbError::InvalidQuery { message } => WhiskerError::InvalidArgument(message),

        DbError::UnknownBackend { backend, available } => WhiskerError::IndexBackendUnavailable {
            backend,
            reason: format!("unknown backend; available: {}", available),
        },

        DbError::Config { message } => WhiskerError::InvalidConfiguration {
            message,
            hint: "Check the index section of ~/.whisker/config.yaml".to_string(),
        },

        DbError::Json(json_err) => WhiskerError::Json(json_err),

        DbError::Internal { message } => WhiskerError::IndexBackendUnavailable {
            backend: "internal".to_string(),
            reason: message,
        },
    }
}

/// Extension trait to convert DbResult to Result<T, WhiskerError>.
pub trait IntoWhiskerResult<T> {
    /// Convert a DbResult to a WhiskerError result.
    fn into_whisker_result(self) -> Result<T, WhiskerError>;
}

impl<T> IntoWhiskerResult<T> for whisker_db::DbResult<T> {
    fn into_whisker_result(self) -> Result<T, WhiskerError> {
        self.map_err(from_db_error)
    }
}
