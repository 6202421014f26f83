use super::support::TestApp;
use crate::domain::permission_names;

#[tokio::test]
async fn lists_builtin_permissions() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/v1/permissions").await;
    assert_eq!(status, 200);

    let mut names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    names.sort_unstable();
    let mut expected = permission_names::ALL.to_vec();
    expected.sort_unstable();
    assert_eq!(names, expected);
}

#[tokio::test]
async fn show_permission() {
    let app = TestApp::new().await;
    let view = app.db.permission_named(permission_names::VIEW_PERMISSION).await;

    let (status, body) = app.get(&format!("/api/v1/permissions/{}", view.id)).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["id"], view.id);
    assert_eq!(body["data"]["name"], "view permission");

    let (status, _) = app.get("/api/v1/permissions/missing").await;
    assert_eq!(status, 404);
}
