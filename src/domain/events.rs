//! Domain Events
//!
//! Immutable facts about completed user mutations, handed to event hooks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::{User, UserId};

/// User-related events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UserEvent {
    /// User was created
    UserCreated {
        user: User,
        created_at: DateTime<Utc>,
    },

    /// User profile was updated; carries both snapshots for diffing
    UserUpdated {
        new_user: User,
        old_user: User,
        created_at: DateTime<Utc>,
    },

    /// User was deleted
    UserDeleted {
        user_id: UserId,
        created_at: DateTime<Utc>,
    },
}

impl UserEvent {
    pub fn created(user: User) -> Self {
        UserEvent::UserCreated {
            user,
            created_at: Utc::now(),
        }
    }

    pub fn updated(new_user: User, old_user: User) -> Self {
        UserEvent::UserUpdated {
            new_user,
            old_user,
            created_at: Utc::now(),
        }
    }

    pub fn deleted(user_id: UserId) -> Self {
        UserEvent::UserDeleted {
            user_id,
            created_at: Utc::now(),
        }
    }

    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            UserEvent::UserCreated { .. } => "UserCreated",
            UserEvent::UserUpdated { .. } => "UserUpdated",
            UserEvent::UserDeleted { .. } => "UserDeleted",
        }
    }

    /// Get the user ID this event relates to
    pub fn user_id(&self) -> UserId {
        match self {
            UserEvent::UserCreated { user, .. } => user.id,
            UserEvent::UserUpdated { new_user, .. } => new_user.id,
            UserEvent::UserDeleted { user_id, .. } => *user_id,
        }
    }

    /// When the event was constructed
    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            UserEvent::UserCreated { created_at, .. }
            | UserEvent::UserUpdated { created_at, .. }
            | UserEvent::UserDeleted { created_at, .. } => *created_at,
        }
    }
}
