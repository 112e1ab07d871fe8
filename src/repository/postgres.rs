//! Postgres user storage
//!
//! `PgUserRepository` and `PgUserFinder` share one connection pool.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::{CreateUserParams, DomainError, DomainResult, UpdateUserParams, User, UserId};

use super::password::hash_password;
use super::{UserFinder, UserPredicate, UserRepository};

/// SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

const USER_COLUMNS: &str = "id, name, last_name, nickname, email, country";

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    last_name: String,
    nickname: String,
    email: String,
    country: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId(row.id),
            name: row.name,
            last_name: row.last_name,
            nickname: row.nickname,
            email: row.email,
            country: row.country,
        }
    }
}

/// Map a sqlx error into the domain taxonomy
fn classify(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::RowNotFound = err {
        return DomainError::NotFound;
    }

    let unique_violation = err
        .as_database_error()
        .and_then(|db_err| db_err.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION);

    if unique_violation {
        DomainError::AlreadyExists
    } else {
        DomainError::storage(err)
    }
}

// =========================================================================
// PgUserRepository
// =========================================================================

/// Write side of the `users` table
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, params: CreateUserParams) -> DomainResult<User> {
        let password_hash = hash_password(&params.password)?;

        let row: UserRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO users (name, last_name, nickname, email, password, country)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&params.name)
        .bind(&params.last_name)
        .bind(&params.nickname)
        .bind(&params.email)
        .bind(&password_hash)
        .bind(&params.country)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;

        tracing::debug!(user_id = row.id, "Inserted user");
        Ok(row.into())
    }

    async fn update(&self, id: UserId, params: UpdateUserParams) -> DomainResult<User> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                last_name = COALESCE($3, last_name),
                country = COALESCE($4, country)
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id.value())
        .bind(params.name)
        .bind(params.last_name)
        .bind(params.country)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        row.map(User::from).ok_or(DomainError::NotFound)
    }

    async fn delete(&self, id: UserId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(classify)?;

        tracing::debug!(user_id = %id, rows = result.rows_affected(), "Deleted user");
        Ok(())
    }
}

// =========================================================================
// PgUserFinder
// =========================================================================

/// Build the SELECT for a predicate list
fn build_select(predicates: &[UserPredicate], limit: Option<i64>) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!("SELECT {USER_COLUMNS} FROM users"));

    for (i, predicate) in predicates.iter().enumerate() {
        query.push(if i == 0 { " WHERE " } else { " AND " });
        query.push(predicate.column()).push(" = ");
        match predicate {
            UserPredicate::Id(id) => query.push_bind(id.value()),
            UserPredicate::Email(value)
            | UserPredicate::Name(value)
            | UserPredicate::Nickname(value)
            | UserPredicate::Country(value) => query.push_bind(value.clone()),
        };
    }

    query.push(" ORDER BY id");
    if let Some(limit) = limit {
        query.push(" LIMIT ").push_bind(limit);
    }
    query
}

/// Read side of the `users` table
#[derive(Debug, Clone)]
pub struct PgUserFinder {
    pool: PgPool,
    predicates: Vec<UserPredicate>,
}

impl PgUserFinder {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            predicates: Vec::new(),
        }
    }

    async fn fetch(&self, limit: Option<i64>) -> DomainResult<Vec<User>> {
        let mut query = build_select(&self.predicates, limit);
        tracing::debug!(sql = query.sql(), "Finding users");

        let rows: Vec<UserRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;

        Ok(rows.into_iter().map(User::from).collect())
    }
}

#[async_trait]
impl UserFinder for PgUserFinder {
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
        self.fetch(None).await
    }

    async fn find_one(&self) -> DomainResult<User> {
        // Two rows are enough to tell "one" from "many".
        let mut users = self.fetch(Some(2)).await?;
        match users.len() {
            0 => Err(DomainError::NotFound),
            1 => Ok(users.remove(0)),
            matches => Err(DomainError::Ambiguous { matches }),
        }
    }
}
