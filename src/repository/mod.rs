//! User storage contracts
//!
//! `UserRepository` is the write side, `UserFinder` the chainable read side.
//! Both are implemented by the Postgres adapter and by an in-memory store.

mod memory;
mod password;
mod postgres;

use async_trait::async_trait;

use crate::domain::{CreateUserParams, DomainResult, UpdateUserParams, User, UserId};

pub use memory::{InMemoryUserFinder, InMemoryUserStore};
pub use password::{hash_password, verify_password};
pub use postgres::{PgUserFinder, PgUserRepository};

/// Write capability over users
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; storage assigns the id.
    ///
    /// Fails with `AlreadyExists` when the email or nickname is taken.
    async fn create(&self, params: CreateUserParams) -> DomainResult<User>;

    /// Apply a profile update and return the refreshed record
    async fn update(&self, id: UserId, params: UpdateUserParams) -> DomainResult<User>;

    /// Remove a user. Removing an unknown id is not an error.
    async fn delete(&self, id: UserId) -> DomainResult<()>;
}

/// Equality predicate accumulated by a finder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserPredicate {
    Id(UserId),
    Email(String),
    Name(String),
    Nickname(String),
    Country(String),
}

impl UserPredicate {
    /// Column the predicate compares against
    pub fn column(&self) -> &'static str {
        match self {
            UserPredicate::Id(_) => "id",
            UserPredicate::Email(_) => "email",
            UserPredicate::Name(_) => "name",
            UserPredicate::Nickname(_) => "nickname",
            UserPredicate::Country(_) => "country",
        }
    }

    pub fn matches(&self, user: &User) -> bool {
        match self {
            UserPredicate::Id(id) => user.id == *id,
            UserPredicate::Email(email) => user.email == *email,
            UserPredicate::Name(name) => user.name == *name,
            UserPredicate::Nickname(nickname) => user.nickname == *nickname,
            UserPredicate::Country(country) => user.country == *country,
        }
    }
}

/// Chainable read capability over users.
///
/// Every `with_*` call returns a new finder and leaves the receiver untouched,
/// so a base finder can be shared between concurrent requests. Predicates are
/// combined with AND.
#[async_trait]
pub trait UserFinder: Send + Sync {
    /// Copy of this finder carrying one more predicate
    fn with_predicate(&self, predicate: UserPredicate) -> Box<dyn UserFinder>;

    /// Owned copy of this finder with the same predicates
    fn boxed(&self) -> Box<dyn UserFinder>;

    /// Predicates accumulated so far, in the order they were added
    fn predicates(&self) -> &[UserPredicate];

    /// All users matching the predicates, ordered by id
    async fn find(&self) -> DomainResult<Vec<User>>;

    /// The single user matching the predicates.
    ///
    /// No match is `NotFound`; several matches are `Ambiguous`.
    async fn find_one(&self) -> DomainResult<User>;

    fn with_id(&self, id: UserId) -> Box<dyn UserFinder> {
        self.with_predicate(UserPredicate::Id(id))
    }

    fn with_email(&self, email: &str) -> Box<dyn UserFinder> {
        self.with_predicate(UserPredicate::Email(email.to_string()))
    }

    fn with_name(&self, name: &str) -> Box<dyn UserFinder> {
        self.with_predicate(UserPredicate::Name(name.to_string()))
    }

    fn with_nickname(&self, nickname: &str) -> Box<dyn UserFinder> {
        self.with_predicate(UserPredicate::Nickname(nickname.to_string()))
    }

    fn with_country(&self, country: &str) -> Box<dyn UserFinder> {
        self.with_predicate(UserPredicate::Country(country.to_string()))
    }
}
