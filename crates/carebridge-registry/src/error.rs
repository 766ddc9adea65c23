//! Error types for registry operations.
//!
//! Lookups that simply find nothing return `Ok(None)`; errors are reserved
//! for infrastructure failures at the seam.

use thiserror::Error;

/// Errors surfaced by registry collaborators.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The backend could not be reached or answered abnormally.
    #[error("Backend error: {message}")]
    Backend { message: String },

    /// A record targeted by a write operation does not exist.
    #[error("Record not found: {record_type}/{id}")]
    NotFound { record_type: String, id: String },

    /// A record handed to a save operation is malformed at the seam.
    #[error("Invalid record: {message}")]
    InvalidRecord { message: String },
}

impl RegistryError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    pub fn not_found(record_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            record_type: record_type.into(),
            id: id.into(),
        }
    }

    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }
}

/// Convenience result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RegistryError::not_found("Observation", "abc");
        assert_eq!(err.to_string(), "Record not found: Observation/abc");

        let err = RegistryError::backend("connection reset");
        assert_eq!(err.to_string(), "Backend error: connection reset");
    }
}
