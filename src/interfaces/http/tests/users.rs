use axum::http::Method;
use serde_json::json;

use super::support::TestApp;
use crate::domain::permission_names;

#[tokio::test]
async fn unique_email() {
    let app = TestApp::new().await;
    let taken = app.db.create_user("owner").await;
    let user = app.db.create_user("other").await;

    let (status, body) = app
        .put(
            &format!("/api/v1/users/{}", user.id),
            json!({ "email": taken.email }),
        )
        .await;
    assert_eq!(status, 422);
    assert_eq!(body["error"], "The email has already been taken.");
}

#[tokio::test]
async fn malformed_email_is_rejected() {
    let app = TestApp::new().await;
    let user = app.db.create_user("member").await;

    let (status, body) = app
        .put(
            &format!("/api/v1/users/{}", user.id),
            json!({ "email": "not-an-email" }),
        )
        .await;
    assert_eq!(status, 422);
    assert_eq!(body["error"], "email: The email must be a valid email address.");
}

#[tokio::test]
async fn update_and_show_user() {
    let app = TestApp::new().await;
    let user = app.db.create_user("member").await;
    let uri = format!("/api/v1/users/{}", user.id);

    let (status, body) = app
        .put(&uri, json!({ "username": "member2", "is_active": false }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["username"], "member2");
    assert_eq!(body["data"]["is_active"], false);
    assert!(body["data"].get("password_hash").is_none());

    let (status, body) = app.get(&format!("{}?include=roles,permissions", uri)).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["roles"], json!([]));
    assert_eq!(body["data"]["permissions"], json!([]));
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/api/v1/users/missing").await;
    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn deactivated_user_is_refused_by_gates() {
    let app = TestApp::new().await;
    let member = app.db.create_user("member").await;
    let token = app.token_for(&member);
    let view = app.db.permission_named(permission_names::VIEW_PERMISSION).await;
    app.db
        .repos
        .users()
        .give_permission_to(&member.id, &view.id)
        .await
        .unwrap();

    let (status, _) = app
        .send(Method::GET, "/api/v1/permissions", Some(&token), None)
        .await;
    assert_eq!(status, 200);

    let (status, body) = app
        .put(
            &format!("/api/v1/users/{}", member.id),
            json!({ "is_active": false }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["is_active"], false);

    let (status, _) = app
        .send(Method::GET, "/api/v1/permissions", Some(&token), None)
        .await;
    assert_eq!(status, 403);
}
