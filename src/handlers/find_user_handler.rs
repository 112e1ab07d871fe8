//! Find User Handlers
//!
//! Read-only workflows. Reads never emit events.

use std::sync::Arc;

use crate::domain::{User, UserId};
use crate::repository::UserFinder;

use super::UseCaseError;

/// Transform that narrows a finder; applied left to right by `FindUsersHandler`
pub type UserFindOption = Box<dyn FnOnce(Box<dyn UserFinder>) -> Box<dyn UserFinder> + Send>;

pub fn by_id(id: UserId) -> UserFindOption {
    Box::new(move |finder: Box<dyn UserFinder>| finder.with_id(id))
}

pub fn by_email(email: impl Into<String>) -> UserFindOption {
    let email = email.into();
    Box::new(move |finder: Box<dyn UserFinder>| finder.with_email(&email))
}

pub fn by_name(name: impl Into<String>) -> UserFindOption {
    let name = name.into();
    Box::new(move |finder: Box<dyn UserFinder>| finder.with_name(&name))
}

pub fn by_nickname(nickname: impl Into<String>) -> UserFindOption {
    let nickname = nickname.into();
    Box::new(move |finder: Box<dyn UserFinder>| finder.with_nickname(&nickname))
}

pub fn by_country(country: impl Into<String>) -> UserFindOption {
    let country = country.into();
    Box::new(move |finder: Box<dyn UserFinder>| finder.with_country(&country))
}

// =========================================================================
// FindUsersHandler
// =========================================================================

/// Handler for filtered user listing
#[derive(Clone)]
pub struct FindUsersHandler {
    finder: Arc<dyn UserFinder>,
}

impl FindUsersHandler {
    pub fn new(finder: Arc<dyn UserFinder>) -> Self {
        Self { finder }
    }

    /// Every call starts from the unfiltered base finder.
    pub async fn execute(&self, options: Vec<UserFindOption>) -> Result<Vec<User>, UseCaseError> {
        let finder = options
            .into_iter()
            .fold(self.finder.boxed(), |finder, option| option(finder));

        finder
            .find()
            .await
            .map_err(UseCaseError::wrap("FindUsers"))
    }
}

// =========================================================================
// FindUserHandler
// =========================================================================

/// Handler for single user lookup by id
#[derive(Clone)]
pub struct FindUserHandler {
    finder: Arc<dyn UserFinder>,
}

impl FindUserHandler {
    pub fn new(finder: Arc<dyn UserFinder>) -> Self {
        Self { finder }
    }

    pub async fn execute(&self, id: UserId) -> Result<User, UseCaseError> {
        self.finder
            .with_id(id)
            .find_one()
            .await
            .map_err(UseCaseError::wrap("FindUser"))
    }
}
