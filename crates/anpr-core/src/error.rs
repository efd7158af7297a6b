// Error types for the data access layer

use thiserror::Error;

/// Result type alias for store lookups
pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures raised by an `EventStore` or `DetectionStore`.
///
/// Absence is never an error: a missing row is `Ok(None)`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Storage could not be reached (connection refused, pool exhausted, timeout)
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A row was found but could not be turned into an entity
    #[error("Malformed record: {0}")]
    Decode(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl StoreError {
    /// Create an unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        StoreError::Unavailable(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        StoreError::Decode(msg.into())
    }

    /// Short tag for structured logging
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Unavailable(_) => "unavailable",
            StoreError::Decode(_) => "decode",
            StoreError::Internal(_) => "internal",
        }
    }
}

impl Clone for StoreError {
    fn clone(&self) -> Self {
        match self {
            StoreError::Unavailable(msg) => StoreError::Unavailable(msg.clone()),
            StoreError::Decode(msg) => StoreError::Decode(msg.clone()),
            // anyhow::Error is not Clone; keep the rendered chain
            StoreError::Internal(err) => StoreError::Internal(anyhow::anyhow!("{:#}", err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            StoreError::unavailable("connection refused").to_string(),
            "Store unavailable: connection refused"
        );
        assert_eq!(
            StoreError::decode("bad uuid").to_string(),
            "Malformed record: bad uuid"
        );
    }

    #[test]
    fn test_kind() {
        assert_eq!(StoreError::unavailable("x").kind(), "unavailable");
        assert_eq!(StoreError::decode("x").kind(), "decode");
        assert_eq!(
            StoreError::from(anyhow::anyhow!("boom")).kind(),
            "internal"
        );
    }

    #[test]
    fn test_clone_internal_keeps_message() {
        let err = StoreError::from(anyhow::anyhow!("disk full").context("writing row"));
        let cloned = err.clone();
        assert_eq!(cloned.kind(), "internal");
        assert!(cloned.to_string().contains("disk full"));
    }
}
