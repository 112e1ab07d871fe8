//! Database module
//!
//! Connection, schema and migration utilities.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Schema for the users table; every statement is idempotent
const USERS_MIGRATION: &str = include_str!("../migrations/0001_create_users.sql");

/// Open a connection pool
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Simple connectivity check
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the users schema
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for statement in migration_statements(USERS_MIGRATION) {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    tracing::info!("Users schema is up to date");
    Ok(())
}

/// Check if required tables exist
pub async fn check_schema(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM information_schema.tables
            WHERE table_schema = 'public' AND table_name = $1
        )
        "#,
    )
    .bind("users")
    .fetch_one(pool)
    .await?;

    if !exists {
        tracing::error!("Required table 'users' does not exist");
    }
    Ok(exists)
}

/// Split a migration file into executable statements
fn migration_statements(sql: &str) -> impl Iterator<Item = &str> {
    sql.split(';').map(str::trim).filter(|s| !s.is_empty())
}
