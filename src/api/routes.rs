//! API Routes
//!
//! HTTP endpoint definitions. Each endpoint decodes its input, runs one
//! use-case handler and encodes the result.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::domain::{CreateUserParams, UpdateUserParams, User, UserId};
use crate::error::AppError;
use crate::handlers::{
    by_country, by_email, by_name, by_nickname, CreateUserHandler, DeleteUserHandler,
    FindUserHandler, FindUsersHandler, UpdateUserHandler, UserFindOption,
};
use crate::hooks::EventHooks;
use crate::repository::{UserFinder, UserRepository};

// =========================================================================
// Application state
// =========================================================================

/// The five use-case handlers, wired once at start-up
#[derive(Clone)]
pub struct AppState {
    pub create_user: CreateUserHandler,
    pub update_user: UpdateUserHandler,
    pub delete_user: DeleteUserHandler,
    pub find_users: FindUsersHandler,
    pub find_user: FindUserHandler,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        finder: Arc<dyn UserFinder>,
        hooks: EventHooks,
    ) -> Self {
        Self {
            create_user: CreateUserHandler::new(Arc::clone(&repository), hooks.clone()),
            update_user: UpdateUserHandler::new(
                Arc::clone(&repository),
                Arc::clone(&finder),
                hooks.clone(),
            ),
            delete_user: DeleteUserHandler::new(repository, hooks),
            find_users: FindUsersHandler::new(Arc::clone(&finder)),
            find_user: FindUserHandler::new(finder),
        }
    }
}

// =========================================================================
// Request types
// =========================================================================

/// Optional equality filters for `GET /users`
#[derive(Debug, Default, Deserialize)]
pub struct UserListQuery {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl UserListQuery {
    /// Finder options for the present, non-empty parameters
    pub fn into_options(self) -> Vec<UserFindOption> {
        let present = |value: Option<String>| value.filter(|v| !v.is_empty());

        let mut options = Vec::new();
        if let Some(email) = present(self.email) {
            options.push(by_email(email));
        }
        if let Some(nickname) = present(self.nickname) {
            options.push(by_nickname(nickname));
        }
        if let Some(name) = present(self.name) {
            options.push(by_name(name));
        }
        if let Some(country) = present(self.country) {
            options.push(by_country(country));
        }
        options
    }
}

/// Parse a path id; a non-numeric id cannot name an existing user
fn parse_user_id(raw: &str) -> Result<UserId, AppError> {
    raw.parse::<i64>()
        .map(UserId)
        .map_err(|_| AppError::UserNotFound(raw.to_string()))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(find_users).post(create_user))
        .route(
            "/users/:user_id",
            get(find_user).put(update_user).delete(delete_user),
        )
}

// =========================================================================
// GET /users
// =========================================================================

/// List users matching the query filters
async fn find_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = state.find_users.execute(query.into_options()).await?;
    Ok(Json(users))
}

// =========================================================================
// POST /users
// =========================================================================

/// Create a new user
async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserParams>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let params = json_body(payload)?;
    let user = state.create_user.execute(params).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

// =========================================================================
// GET /users/:user_id
// =========================================================================

/// Get user by ID
async fn find_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, AppError> {
    let user_id = parse_user_id(&user_id)?;
    let user = state.find_user.execute(user_id).await?;
    Ok(Json(user))
}

// =========================================================================
// PUT /users/:user_id
// =========================================================================

/// Update name, last name and country
async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<UpdateUserParams>, JsonRejection>,
) -> Result<Json<User>, AppError> {
    let params = json_body(payload)?;
    let user_id = parse_user_id(&user_id)?;
    let user = state.update_user.execute(user_id, params).await?;
    Ok(Json(user))
}

// =========================================================================
// DELETE /users/:user_id
// =========================================================================

/// Delete user
async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let user_id = parse_user_id(&user_id)?;
    state.delete_user.execute(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
