//! Create User Handler
//!
//! Stores a new user and announces it with a `UserCreated` event.

use std::sync::Arc;

use crate::domain::{CreateUserParams, User, UserEvent};
use crate::hooks::EventHooks;
use crate::repository::UserRepository;

use super::UseCaseError;

const WORKFLOW: &str = "CreateUser";

/// Handler for user creation
#[derive(Clone)]
pub struct CreateUserHandler {
    repository: Arc<dyn UserRepository>,
    hooks: EventHooks,
}

impl CreateUserHandler {
    pub fn new(repository: Arc<dyn UserRepository>, hooks: EventHooks) -> Self {
        Self { repository, hooks }
    }

    /// Execute the create user workflow.
    ///
    /// `AlreadyExists` is returned when the email or nickname is taken; no
    /// event is dispatched on failure.
    pub async fn execute(&self, params: CreateUserParams) -> Result<User, UseCaseError> {
        let user = self
            .repository
            .create(params)
            .await
            .map_err(UseCaseError::wrap(WORKFLOW))?;

        self.hooks.dispatch(&UserEvent::created(user.clone()));
        Ok(user)
    }
}
