//! Update User Handler
//!
//! Handles profile updates. The current record is read first so the
//! `UserUpdated` event can carry both snapshots.

use std::sync::Arc;

use crate::domain::{UpdateUserParams, User, UserEvent, UserId};
use crate::hooks::EventHooks;
use crate::repository::{UserFinder, UserRepository};

use super::UseCaseError;

const WORKFLOW: &str = "UpdateUser";

/// Handler for user updates
#[derive(Clone)]
pub struct UpdateUserHandler {
    repository: Arc<dyn UserRepository>,
    finder: Arc<dyn UserFinder>,
    hooks: EventHooks,
}

impl UpdateUserHandler {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        finder: Arc<dyn UserFinder>,
        hooks: EventHooks,
    ) -> Self {
        Self {
            repository,
            finder,
            hooks,
        }
    }

    /// Execute the update user workflow.
    ///
    /// When the user cannot be loaded the repository is never called.
    pub async fn execute(
        &self,
        id: UserId,
        params: UpdateUserParams,
    ) -> Result<User, UseCaseError> {
        let old_user = self
            .finder
            .with_id(id)
            .find_one()
            .await
            .map_err(UseCaseError::wrap(WORKFLOW))?;

        let user = self
            .repository
            .update(id, params)
            .await
            .map_err(UseCaseError::wrap(WORKFLOW))?;

        self.hooks.dispatch(&UserEvent::updated(user.clone(), old_user));
        Ok(user)
    }
}
