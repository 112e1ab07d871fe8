//! API Integration Tests
//!
//! Drive the full router (middleware included) over the in-memory store.

use axum::http::StatusCode;
use http_body_util::BodyExt;
use serde_json::json;
use users_api::UserEvent;

mod common;

use common::{json_body, memory_app, send};

fn ann() -> serde_json::Value {
    json!({
        "name": "Ann",
        "last_name": "Lee",
        "nickname": "annl",
        "email": "a@x.com",
        "country": "US",
        "password": "secret"
    })
}

#[tokio::test]
async fn test_user_lifecycle_e2e() {
    let (app, events) = memory_app();

    // 1. Create Ann
    let response = send(&app, "POST", "/users", Some(ann())).await;
    assert_eq!(response.status(), StatusCode::CREATED, "User creation failed");
    let created = json_body(response).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["email"], "a@x.com");
    assert!(created.get("password").is_none());

    // 2. Same email again
    let mut duplicate = ann();
    duplicate["nickname"] = json!("annl2");
    let response = send(&app, "POST", "/users", Some(duplicate)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // 3. Update
    let response = send(
        &app,
        "PUT",
        "/users/1",
        Some(json!({"name": "Anna", "last_name": "Lee", "country": "CA"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "Update failed");
    let updated = json_body(response).await;
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["name"], "Anna");
    assert_eq!(updated["country"], "CA");
    assert_eq!(updated["nickname"], "annl");

    // 4. Delete
    let response = send(&app, "DELETE", "/users/1", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // 5. Gone
    let response = send(&app, "GET", "/users/1", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The failing hook registered first never blocked the recorder.
    let recorded = events.lock().unwrap().clone();
    let types: Vec<&str> = recorded.iter().map(|e| e.event_type()).collect();
    assert_eq!(types, vec!["UserCreated", "UserUpdated", "UserDeleted"]);
    match &recorded[1] {
        UserEvent::UserUpdated {
            new_user, old_user, ..
        } => {
            assert_eq!(old_user.name, "Ann");
            assert_eq!(new_user.name, "Anna");
        }
        other => panic!("Expected UserUpdated, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_list_users_with_filters() {
    let (app, _) = memory_app();

    for (name, nickname, email, country) in [
        ("Ann", "annl", "a@x.com", "US"),
        ("Bob", "bobby", "b@x.com", "US"),
        ("Ann", "annp", "p@x.com", "KR"),
    ] {
        let body = json!({
            "name": name,
            "last_name": "Lee",
            "nickname": nickname,
            "email": email,
            "country": country,
            "password": "pw"
        });
        let response = send(&app, "POST", "/users", Some(body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let all = json_body(send(&app, "GET", "/users", None).await).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let anns = json_body(send(&app, "GET", "/users?name=Ann", None).await).await;
    assert_eq!(anns.as_array().unwrap().len(), 2);

    let us_anns = json_body(send(&app, "GET", "/users?name=Ann&country=US", None).await).await;
    let us_anns = us_anns.as_array().unwrap();
    assert_eq!(us_anns.len(), 1);
    assert_eq!(us_anns[0]["nickname"], "annl");

    let ignored_empty = json_body(send(&app, "GET", "/users?email=&country=KR", None).await).await;
    assert_eq!(ignored_empty.as_array().unwrap().len(), 1);

    let nobody = json_body(send(&app, "GET", "/users?nickname=ghost", None).await).await;
    assert!(nobody.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_error_status_mapping() {
    let (app, events) = memory_app();

    // Non-numeric id cannot exist
    let response = send(&app, "GET", "/users/abc", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Update of a missing user
    let response = send(&app, "PUT", "/users/9", Some(json!({"name": "Ghost"}))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error_code"], "user_not_found");

    // Malformed body
    let response = send(&app, "POST", "/users", Some(json!({"name": 42}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error_code"], "invalid_request");

    assert!(events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let (app, _) = memory_app();

    let request = axum::http::Request::builder()
        .uri("/users")
        .header("x-request-id", "req-42")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::util::ServiceExt::oneshot(app.clone(), request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-42");

    let response = send(&app, "GET", "/users", None).await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = memory_app();

    let response = send(&app, "GET", "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"OK");
}
