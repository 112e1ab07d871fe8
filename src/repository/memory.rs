//! In-memory user store
//!
//! Implements both storage contracts over a shared map. Used in tests and
//! with `STORAGE_BACKEND=memory` for local development.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{CreateUserParams, DomainError, DomainResult, UpdateUserParams, User, UserId};

use super::password::hash_password;
use super::{UserFinder, UserPredicate, UserRepository};

#[derive(Debug)]
struct StoredUser {
    user: User,
    password_hash: String,
}

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<UserId, StoredUser>,
    last_id: i64,
}

/// Map-backed user storage with storage-assigned ids starting at 1
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unfiltered finder reading from this store
    pub fn finder(&self) -> InMemoryUserFinder {
        InMemoryUserFinder {
            state: Arc::clone(&self.state),
            predicates: Vec::new(),
        }
    }

    /// Stored password hash, for credential checks
    pub async fn password_hash(&self, id: UserId) -> Option<String> {
        let state = self.state.read().await;
        state.users.get(&id).map(|stored| stored.password_hash.clone())
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn create(&self, params: CreateUserParams) -> DomainResult<User> {
        let password_hash = hash_password(&params.password)?;
        let mut state = self.state.write().await;

        let taken = state
            .users
            .values()
            .any(|s| s.user.email == params.email || s.user.nickname == params.nickname);
        if taken {
            return Err(DomainError::AlreadyExists);
        }

        state.last_id += 1;
        let user = User {
            id: UserId(state.last_id),
            name: params.name,
            last_name: params.last_name,
            nickname: params.nickname,
            email: params.email,
            country: params.country,
        };
        state.users.insert(
            user.id,
            StoredUser {
                user: user.clone(),
                password_hash,
            },
        );

        tracing::debug!(user_id = %user.id, "Stored user in memory");
        Ok(user)
    }

    async fn update(&self, id: UserId, params: UpdateUserParams) -> DomainResult<User> {
        let mut state = self.state.write().await;
        let stored = state.users.get_mut(&id).ok_or(DomainError::NotFound)?;
        params.apply_to(&mut stored.user);
        Ok(stored.user.clone())
    }

    async fn delete(&self, id: UserId) -> DomainResult<()> {
        let removed = self.state.write().await.users.remove(&id);
        tracing::debug!(user_id = %id, existed = removed.is_some(), "Deleted user from memory");
        Ok(())
    }
}

/// Finder over an `InMemoryUserStore`
#[derive(Debug, Clone)]
pub struct InMemoryUserFinder {
    state: Arc<RwLock<State>>,
    predicates: Vec<UserPredicate>,
}

impl InMemoryUserFinder {
    async fn matching(&self) -> Vec<User> {
        let state = self.state.read().await;
        state
            .users
            .values()
            .map(|stored| &stored.user)
            .filter(|user| self.predicates.iter().all(|p| p.matches(user)))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl UserFinder for InMemoryUserFinder {
    fn with_predicate(&self, predicate: UserPredicate) -> Box<dyn UserFinder> {
        let mut next = self.clone();
        next.predicates.push(predicate);
        Box::new(next)
    }

    fn boxed(&self) -> Box<dyn UserFinder> {
        Box::new(self.clone())
    }

    fn predicates(&self) -> &[UserPredicate] {
        &self.predicates
    }

    async fn find(&self) -> DomainResult<Vec<User>> {
        Ok(self.matching().await)
    }

    async fn find_one(&self) -> DomainResult<User> {
        let mut users = self.matching().await;
        match users.len() {
            0 => Err(DomainError::NotFound),
            1 => Ok(users.remove(0)),
            matches => Err(DomainError::Ambiguous { matches }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> InMemoryUserStore {
        let store = InMemoryUserStore::new();
        for (name, nickname, email, country) in [
            ("Ann", "annl", "a@x.com", "US"),
            ("Bob", "bobby", "b@x.com", "US"),
            ("Ann", "anna", "anna@x.com", "CA"),
        ] {
            store
                .create(CreateUserParams::new(name, "Lee", nickname, email, country, "pw"))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_ids_are_assigned_sequentially() {
        let store = seeded().await;
        let ids: Vec<UserId> = store.finder().find().await.unwrap().iter().map(|u| u.id).collect();

        assert_eq!(ids, vec![UserId(1), UserId(2), UserId(3)]);
    }

    #[tokio::test]
    async fn test_duplicate_email_or_nickname_rejected() {
        let store = seeded().await;

        let same_email = store
            .create(CreateUserParams::new("X", "Y", "fresh", "a@x.com", "US", "pw"))
            .await;
        let same_nickname = store
            .create(CreateUserParams::new("X", "Y", "annl", "fresh@x.com", "US", "pw"))
            .await;

        assert!(matches!(same_email, Err(DomainError::AlreadyExists)));
        assert!(matches!(same_nickname, Err(DomainError::AlreadyExists)));
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn test_filters_are_conjunctive() {
        let store = seeded().await;
        let finder = store.finder();

        assert_eq!(finder.with_name("Ann").find().await.unwrap().len(), 2);
        assert_eq!(finder.with_country("US").find().await.unwrap().len(), 2);

        let both = finder.with_name("Ann").with_country("US").find().await.unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].nickname, "annl");

        let none = finder.with_name("Ann").with_country("DE").find().await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_find_one_outcomes() {
        let store = seeded().await;
        let finder = store.finder();

        let bob = finder.with_nickname("bobby").find_one().await.unwrap();
        assert_eq!(bob.id, UserId(2));

        let missing = finder.with_id(UserId(42)).find_one().await;
        assert!(matches!(missing, Err(DomainError::NotFound)));

        let ambiguous = finder.with_name("Ann").find_one().await;
        assert!(matches!(ambiguous, Err(DomainError::Ambiguous { matches: 2 })));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = seeded().await;

        let updated = store
            .update(UserId(1), UpdateUserParams::new().with_country("CA"))
            .await
            .unwrap();
        assert_eq!(updated.country, "CA");
        assert_eq!(updated.email, "a@x.com");

        let missing = store.update(UserId(99), UpdateUserParams::new()).await;
        assert!(matches!(missing, Err(DomainError::NotFound)));

        store.delete(UserId(1)).await.unwrap();
        store.delete(UserId(1)).await.unwrap();
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_password_is_stored_hashed() {
        let store = InMemoryUserStore::new();
        let user = store
            .create(CreateUserParams::new("Ann", "Lee", "annl", "a@x.com", "US", "secret"))
            .await
            .unwrap();

        let hash = store.password_hash(user.id).await.unwrap();
        assert_ne!(hash, "secret");
        assert!(crate::repository::verify_password("secret", &hash).unwrap());
    }
}
