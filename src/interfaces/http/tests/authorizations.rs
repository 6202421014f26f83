use axum::http::Method;
use serde_json::json;

use super::support::TestApp;
use crate::domain::permission_names;

#[tokio::test]
async fn assigned_role_unlocks_its_routes() {
    let app = TestApp::new().await;
    let member = app.db.create_user("member").await;
    let member_token = app.token_for(&member);
    let editor = app.db.repos.roles().create_role("editor", "api").await.unwrap();
    let manage_role = app.db.permission_named(permission_names::MANAGE_ROLE).await;

    let (status, body) = app
        .post(
            "/api/v1/authorizations/attach-permission-to-role",
            json!({ "role_id": editor.id, "permission_id": manage_role.id }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["name"], "editor");

    let (status, body) = app
        .post(
            "/api/v1/authorizations/assign-role-to-user",
            json!({ "user_id": member.id, "role_id": editor.id }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["id"], member.id);

    let (status, _) = app
        .send(Method::GET, "/api/v1/roles", Some(&member_token), None)
        .await;
    assert_eq!(status, 200);

    let (status, body) = app
        .delete(
            "/api/v1/authorizations/revoke-role-from-user",
            Some(json!({ "user_id": member.id, "role_id": editor.id })),
        )
        .await;
    assert_eq!(status, 204);
    assert!(body.is_null());

    let (status, _) = app
        .send(Method::GET, "/api/v1/roles", Some(&member_token), None)
        .await;
    assert_eq!(status, 403);
}

#[tokio::test]
async fn assignments_return_requested_relations() {
    let app = TestApp::new().await;
    let member = app.db.create_user("member").await;
    let editor = app.db.repos.roles().create_role("editor", "api").await.unwrap();
    let manage_role = app.db.permission_named(permission_names::MANAGE_ROLE).await;
    let view = app.db.permission_named(permission_names::VIEW_PERMISSION).await;

    let (status, body) = app
        .post(
            "/api/v1/authorizations/attach-permission-to-role?include=permissions",
            json!({ "role_id": editor.id, "permission_id": manage_role.id }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(
        body["data"]["permissions"],
        json!([{ "id": manage_role.id, "name": permission_names::MANAGE_ROLE }])
    );

    let (status, body) = app
        .post(
            "/api/v1/authorizations/assign-role-to-user?include=roles",
            json!({ "user_id": member.id, "role_id": editor.id }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["roles"][0]["name"], "editor");
    assert!(body["data"].get("permissions").is_none());

    let (status, body) = app
        .post(
            "/api/v1/authorizations/assign-permission-to-user?include=roles,permissions",
            json!({ "user_id": member.id, "permission_id": view.id }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["roles"][0]["name"], "editor");
    assert_eq!(
        body["data"]["permissions"],
        json!([{ "id": view.id, "name": permission_names::VIEW_PERMISSION }])
    );
}

#[tokio::test]
async fn direct_permission_round_trip() {
    let app = TestApp::new().await;
    let member = app.db.create_user("member").await;
    let member_token = app.token_for(&member);
    let view = app.db.permission_named(permission_names::VIEW_PERMISSION).await;

    let (status, _) = app
        .post(
            "/api/v1/authorizations/assign-permission-to-user",
            json!({ "user_id": member.id, "permission_id": view.id }),
        )
        .await;
    assert_eq!(status, 200);

    let (status, _) = app
        .send(Method::GET, "/api/v1/permissions", Some(&member_token), None)
        .await;
    assert_eq!(status, 200);

    let (status, _) = app
        .delete(
            "/api/v1/authorizations/revoke-permission-from-user",
            Some(json!({ "user_id": member.id, "permission_id": view.id })),
        )
        .await;
    assert_eq!(status, 204);

    let (status, _) = app
        .send(Method::GET, "/api/v1/permissions", Some(&member_token), None)
        .await;
    assert_eq!(status, 403);
}

#[tokio::test]
async fn revoke_permission_from_role() {
    let app = TestApp::new().await;
    let auditor = app.db.repos.roles().create_role("auditor", "api").await.unwrap();
    let view = app.db.permission_named(permission_names::VIEW_PERMISSION).await;
    app.db
        .repos
        .roles()
        .give_permission_to(&auditor.id, &view.id)
        .await
        .unwrap();

    let (status, _) = app
        .delete(
            "/api/v1/authorizations/revoke-permission-from-role",
            Some(json!({ "role_id": auditor.id, "permission_id": view.id })),
        )
        .await;
    assert_eq!(status, 204);

    let (_, body) = app
        .get(&format!("/api/v1/roles/{}?include=permissions", auditor.id))
        .await;
    assert_eq!(body["data"]["permissions"], json!([]));
}

#[tokio::test]
async fn missing_and_unknown_ids_are_unprocessable() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/v1/authorizations/assign-role-to-user", json!({}))
        .await;
    assert_eq!(status, 422);
    assert_eq!(
        body["error"],
        "role_id: The role id field is required.; user_id: The user id field is required."
    );

    let (status, body) = app
        .post(
            "/api/v1/authorizations/assign-role-to-user",
            json!({ "user_id": "nobody", "role_id": "nothing" }),
        )
        .await;
    assert_eq!(status, 422);
    assert_eq!(
        body["error"],
        "The selected user id is invalid.; The selected role id is invalid."
    );
}

#[tokio::test]
async fn assignment_routes_require_manage_authorization() {
    let app = TestApp::new().await;
    let member = app.db.create_user("member").await;
    let token = app.token_for(&member);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/authorizations/assign-role-to-user",
            Some(&token),
            Some(json!({ "user_id": member.id, "role_id": "x" })),
        )
        .await;
    assert_eq!(status, 403);
}
