//! users_api Library
//!
//! User management backend: storage contracts, use-case handlers, event
//! hooks and the HTTP API. Re-exports modules for integration testing and
//! the server binary.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod hooks;
pub mod repository;

mod error;

pub use config::{Config, StorageBackend};
pub use domain::{CreateUserParams, DomainError, ErrorKind, UpdateUserParams, User, UserEvent, UserId};
pub use error::{AppError, AppResult};
