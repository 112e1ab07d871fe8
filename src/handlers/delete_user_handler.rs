//! Delete User Handler

use std::sync::Arc;

use crate::domain::{UserEvent, UserId};
use crate::hooks::EventHooks;
use crate::repository::UserRepository;

use super::UseCaseError;

const WORKFLOW: &str = "DeleteUser";

/// Handler for user deletion
#[derive(Clone)]
pub struct DeleteUserHandler {
    repository: Arc<dyn UserRepository>,
    hooks: EventHooks,
}

impl DeleteUserHandler {
    pub fn new(repository: Arc<dyn UserRepository>, hooks: EventHooks) -> Self {
        Self { repository, hooks }
    }

    /// Execute the delete user workflow.
    ///
    /// The `UserDeleted` event is dispatched whenever the repository reports
    /// success, whether or not a record existed.
    pub async fn execute(&self, id: UserId) -> Result<(), UseCaseError> {
        self.repository
            .delete(id)
            .await
            .map_err(UseCaseError::wrap(WORKFLOW))?;

        self.hooks.dispatch(&UserEvent::deleted(id));
        Ok(())
    }
}
