//! Common test utilities

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response};
use axum::Router;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::util::ServiceExt;

use users_api::api::{self, AppState};
use users_api::hooks::EventHooks;
use users_api::repository::{InMemoryUserStore, UserFinder, UserRepository};
use users_api::UserEvent;

/// Events seen by the recording hook
pub type Recorded = Arc<Mutex<Vec<UserEvent>>>;

/// Full application over an empty in-memory store, plus its recorded events
pub fn memory_app() -> (Router, Recorded) {
    let store = InMemoryUserStore::new();
    let finder: Arc<dyn UserFinder> = Arc::new(store.finder());
    let repository: Arc<dyn UserRepository> = Arc::new(store);

    let events: Recorded = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&events);
    let hooks = EventHooks::new()
        .with_hook("failing", |_| Err(anyhow::anyhow!("observer offline")))
        .with_hook("recorder", move |event| {
            recorder.lock().unwrap().push(event.clone());
            Ok(())
        });

    (api::build_app(AppState::new(repository, finder, hooks)), events)
}

/// Send one request through the router
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

/// Read a response body as JSON
pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Setup test database - apply the schema and empty the users table
pub async fn setup_test_db() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    users_api::db::migrate(&pool)
        .await
        .expect("Failed to apply schema");

    sqlx::query("TRUNCATE TABLE users RESTART IDENTITY")
        .execute(&pool)
        .await
        .expect("Failed to clean up DB");

    pool
}
