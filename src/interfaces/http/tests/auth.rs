use axum::http::Method;
use serde_json::json;

use super::support::TestApp;

#[tokio::test]
async fn login_returns_usable_token() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "username": "system", "password": "secret123" })),
        )
        .await;
    assert_eq!(status, 200, "{}", body);
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert_eq!(body["data"]["user"]["email"], "system@authz.local");

    let token = body["data"]["token"].as_str().unwrap().to_string();
    let (status, body) = app
        .send(Method::GET, "/api/v1/auth/me", Some(&token), None)
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["roles"][0]["name"], "system");
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "username": "system", "password": "wrong" })),
        )
        .await;
    assert_eq!(status, 401);
    assert_eq!(body["error"], "Invalid credentials");

    let (status, _) = app
        .send(Method::POST, "/api/v1/auth/login", None, Some(json!({})))
        .await;
    assert_eq!(status, 422);
}

#[tokio::test]
async fn missing_or_bad_token_is_unauthorized() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/api/v1/roles", None, None).await;
    assert_eq!(status, 401);
    assert_eq!(body["success"], false);

    let (status, _) = app
        .send(Method::GET, "/api/v1/roles", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, 401);
}

#[tokio::test]
async fn lacking_permission_is_forbidden() {
    let app = TestApp::new().await;
    let member = app.db.create_user("member").await;
    let token = app.token_for(&member);

    for uri in ["/api/v1/roles", "/api/v1/permissions", "/api/v1/users"] {
        let (status, body) = app.send(Method::GET, uri, Some(&token), None).await;
        assert_eq!(status, 403, "{}", uri);
        assert_eq!(body["error"], "User does not have the right permissions.");
    }

    let (status, _) = app
        .send(Method::GET, "/api/v1/auth/me", Some(&token), None)
        .await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn public_endpoints_need_no_token() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, 200);
    assert_eq!(body["database"]["status"], "ok");

    let (status, _) = app
        .send(Method::GET, "/api-doc/openapi.json", None, None)
        .await;
    assert_eq!(status, 200);
}
