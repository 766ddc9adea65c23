//! Error types for translation operations.

use carebridge_registry::RegistryError;
use thiserror::Error;

/// Errors surfaced by the translators.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The aggregated validation gate found recorded issues; the operation
    /// was aborted before persistence.
    #[error("validation failed: {}", .issues.join("; "))]
    Validation { issues: Vec<String> },

    /// A registry collaborator failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl TranslateError {
    pub fn validation(issues: Vec<String>) -> Self {
        Self::Validation { issues }
    }

    /// The recorded issues, when this is a validation failure.
    pub fn issues(&self) -> Option<&[String]> {
        match self {
            Self::Validation { issues } => Some(issues),
            Self::Registry(_) => None,
        }
    }
}

/// Convenience result type for translation operations.
pub type Result<T> = std::result::Result<T, TranslateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_joins_issues() {
        let err = TranslateError::validation(vec![
            "subject cannot be empty".to_string(),
            "code cannot be empty".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "validation failed: subject cannot be empty; code cannot be empty"
        );
        assert_eq!(err.issues().unwrap().len(), 2);
    }

    #[test]
    fn test_registry_error_passes_through() {
        let err: TranslateError = RegistryError::backend("down").into();
        assert_eq!(err.to_string(), "Backend error: down");
        assert!(err.issues().is_none());
    }
}
