//! Use-case errors
//!
//! A storage error tagged with the workflow it surfaced from.

use crate::domain::{DomainError, ErrorKind};

/// Error returned by every handler
#[derive(Debug, thiserror::Error)]
#[error("{workflow}: {source}")]
pub struct UseCaseError {
    pub workflow: &'static str,
    #[source]
    pub source: DomainError,
}

impl UseCaseError {
    pub fn new(workflow: &'static str, source: DomainError) -> Self {
        Self { workflow, source }
    }

    /// `map_err` adapter for a given workflow
    pub fn wrap(workflow: &'static str) -> impl FnOnce(DomainError) -> Self {
        move |source| Self::new(workflow, source)
    }

    /// Classification of the underlying error, unchanged by wrapping
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_already_exists(&self) -> bool {
        self.kind() == ErrorKind::AlreadyExists
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_preserves_kind() {
        let err = UseCaseError::wrap("CreateUser")(DomainError::AlreadyExists);

        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert!(err.is_already_exists());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "CreateUser: entity already exists");
    }

    #[test]
    fn test_source_is_exposed() {
        let err = UseCaseError::new("FindUser", DomainError::NotFound);
        let source = std::error::Error::source(&err).unwrap();

        assert_eq!(source.to_string(), "entity not found");
    }
}
