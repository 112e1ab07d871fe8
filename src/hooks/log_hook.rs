//! Log event sink
//!
//! Writes one human-readable line per user event.

use crate::domain::UserEvent;

pub fn log_user_event(event: &UserEvent) -> anyhow::Result<()> {
    match event {
        UserEvent::UserCreated { user, created_at } => {
            tracing::info!(
                user_id = %user.id,
                nickname = %user.nickname,
                at = %created_at,
                "User created"
            );
        }
        UserEvent::UserUpdated {
            new_user,
            old_user,
            created_at,
        } => {
            let changed = changed_fields(old_user, new_user);
            tracing::info!(
                user_id = %new_user.id,
                changed = ?changed,
                at = %created_at,
                "User updated"
            );
        }
        UserEvent::UserDeleted { user_id, created_at } => {
            tracing::info!(user_id = %user_id, at = %created_at, "User deleted");
        }
    }
    Ok(())
}

fn changed_fields(old: &crate::domain::User, new: &crate::domain::User) -> Vec<&'static str> {
    [
        ("name", old.name != new.name),
        ("last_name", old.last_name != new.last_name),
        ("nickname", old.nickname != new.nickname),
        ("email", old.email != new.email),
        ("country", old.country != new.country),
    ]
    .into_iter()
    .filter_map(|(field, changed)| changed.then_some(field))
    .collect()
}
