//! Domain module
//!
//! Core domain types: the user entity, its events and the error taxonomy.

pub mod error;
pub mod events;
pub mod user;

pub use error::{BoxError, DomainError, DomainResult, ErrorKind};
pub use events::UserEvent;
pub use user::{CreateUserParams, UpdateUserParams, User, UserId};
