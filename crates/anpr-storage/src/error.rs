// Mapping from repository errors to the core StoreError

use anpr_core::StoreError;

/// Classify a repository error for the core traits
///
/// Connectivity problems become `Unavailable`, row/column decoding problems
/// become `Decode`. Anything else is kept as `Internal`.
pub fn classify(err: anyhow::Error) -> StoreError {
    let classified = err
        .downcast_ref::<sqlx::Error>()
        .and_then(|sqlx_err| match sqlx_err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Protocol(_) => Some(StoreError::unavailable(sqlx_err.to_string())),
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::TypeNotFound { .. } => Some(StoreError::decode(sqlx_err.to_string())),
            _ => None,
        });

    classified.unwrap_or_else(|| StoreError::Internal(err))
}
