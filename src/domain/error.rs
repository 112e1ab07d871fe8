//! Domain Error Types
//!
//! The error taxonomy shared by the storage contracts and the use-case layer.

use std::fmt;

use thiserror::Error;

/// Boxed source error from a storage adapter
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Classification that callers match on.
///
/// Adapters pick the kind; the use-case layer never changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    Other,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NotFound => write!(f, "not_found"),
            ErrorKind::AlreadyExists => write!(f, "already_exists"),
            ErrorKind::Other => write!(f, "other"),
        }
    }
}

/// Errors raised by repository and finder implementations
#[derive(Debug, Error)]
pub enum DomainError {
    /// Requested entity is absent
    #[error("entity not found")]
    NotFound,

    /// Uniqueness constraint violated (email or nickname)
    #[error("entity already exists")]
    AlreadyExists,

    /// A single-record lookup matched more than one record
    #[error("expected one record, filters matched {matches}")]
    Ambiguous { matches: usize },

    /// Underlying storage failure
    #[error("storage error: {0}")]
    Storage(#[source] BoxError),

    /// Password could not be hashed
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Wrap any adapter failure as an unclassified storage error
    pub fn storage(err: impl Into<BoxError>) -> Self {
        Self::Storage(err.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound => ErrorKind::NotFound,
            Self::AlreadyExists => ErrorKind::AlreadyExists,
            Self::Ambiguous { .. } | Self::Storage(_) | Self::PasswordHash(_) => ErrorKind::Other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_already_exists(&self) -> bool {
        self.kind() == ErrorKind::AlreadyExists
    }
}
