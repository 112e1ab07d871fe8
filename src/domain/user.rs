//! User Entity
//!
//! The user record and the input values used to create and change it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage-assigned user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user account as returned by reads.
///
/// The password is write-only and never part of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub last_name: String,
    pub nickname: String,
    pub email: String,
    pub country: String,
}

/// Input for user creation
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CreateUserParams {
    pub name: String,
    pub last_name: String,
    pub nickname: String,
    pub email: String,
    pub country: String,
    pub password: String,
}

impl CreateUserParams {
    pub fn new(
        name: impl Into<String>,
        last_name: impl Into<String>,
        nickname: impl Into<String>,
        email: impl Into<String>,
        country: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            last_name: last_name.into(),
            nickname: nickname.into(),
            email: email.into(),
            country: country.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for CreateUserParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserParams")
            .field("name", &self.name)
            .field("last_name", &self.last_name)
            .field("nickname", &self.nickname)
            .field("email", &self.email)
            .field("country", &self.country)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Input for a profile update.
///
/// Only name, last name and country can change; a `None` field keeps the
/// stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserParams {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl UpdateUserParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Apply the present fields to `user`
    pub fn apply_to(&self, user: &mut User) {
        if let Some(ref name) = self.name {
            user.name = name.clone();
        }
        if let Some(ref last_name) = self.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(ref country) = self.country {
            user.country = country.clone();
        }
    }
}
