//! Limit resolution exercised through `GET /api/v1/roles` against real rows.

use serde_json::Value;

use super::support::TestApp;
use crate::config::AppConfig;

fn config(skip_pagination: bool, default_limit: u64, max_limit: u64) -> AppConfig {
    let mut config = AppConfig::default();
    config.pagination.skip_pagination = skip_pagination;
    config.pagination.default_limit = default_limit;
    config.pagination.max_limit = max_limit;
    config
}

async fn listed(
    skip_pagination: bool,
    max_limit: u64,
    default_limit: u64,
    total_roles: usize,
    limit: Option<&str>,
) -> (usize, Value) {
    let app = TestApp::with_config(config(skip_pagination, default_limit, max_limit)).await;
    app.fill_roles(total_roles).await;

    let uri = match limit {
        Some(limit) => format!("/api/v1/roles?limit={}", limit),
        None => "/api/v1/roles".to_string(),
    };
    let (status, body) = app.get(&uri).await;
    assert_eq!(status, 200, "{}", body);

    let count = body["data"].as_array().map(Vec::len).unwrap_or_default();
    (count, body["meta"]["pagination"].clone())
}

#[tokio::test]
async fn default_limit_without_request() {
    let (count, meta) = listed(true, 100, 15, 20, None).await;
    assert_eq!(count, 15);
    assert_eq!(meta["per_page"], 15);
    assert_eq!(meta["total"], 20);
    assert_eq!(meta["total_pages"], 2);
}

#[tokio::test]
async fn default_limit_when_overrides_disabled() {
    let (count, _) = listed(false, 100, 15, 20, None).await;
    assert_eq!(count, 15);
}

#[tokio::test]
async fn requested_limit_is_honored() {
    let (count, meta) = listed(true, 100, 15, 100, Some("50")).await;
    assert_eq!(count, 50);
    assert_eq!(meta["per_page"], 50);
}

#[tokio::test]
async fn requested_limit_ignored_when_overrides_disabled() {
    let (count, _) = listed(false, 100, 15, 20, Some("100")).await;
    assert_eq!(count, 15);
}

#[tokio::test]
async fn non_numeric_limit_falls_back() {
    let (count, _) = listed(true, 100, 15, 20, Some("ccc")).await;
    assert_eq!(count, 15);
    let (count, _) = listed(false, 100, 15, 20, Some("ccc")).await;
    assert_eq!(count, 15);
}

#[tokio::test]
async fn zero_limit_falls_back() {
    let (count, _) = listed(true, 100, 15, 20, Some("0")).await;
    assert_eq!(count, 15);
    let (count, _) = listed(false, 100, 15, 20, Some("0")).await;
    assert_eq!(count, 15);
}

#[tokio::test]
async fn negative_limit_falls_back() {
    let (count, _) = listed(true, 100, 20, 100, Some("-1")).await;
    assert_eq!(count, 20);
}

#[tokio::test]
async fn limit_is_capped_at_maximum() {
    let (count, meta) = listed(true, 50, 20, 100, Some("60")).await;
    assert_eq!(count, 50);
    assert_eq!(meta["per_page"], 50);
}

#[tokio::test]
async fn oversized_limit_is_capped_at_maximum() {
    let (count, meta) = listed(true, 50, 20, 60, Some("99999999999999999999999")).await;
    assert_eq!(count, 50);
    assert_eq!(meta["per_page"], 50);
}

#[tokio::test]
async fn page_past_the_end_is_empty() {
    let app = TestApp::new().await;
    app.fill_roles(5).await;

    for uri in [
        "/api/v1/roles?page=18446744073709551615",
        "/api/v1/roles?limit=100&page=9223372036854775807",
        "/api/v1/users?page=18446744073709551615",
        "/api/v1/permissions?page=18446744073709551615",
    ] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, 200, "{}: {}", uri, body);
        assert_eq!(body["data"].as_array().unwrap().len(), 0, "{}", uri);
    }

    let (_, body) = app.get("/api/v1/roles?page=18446744073709551615").await;
    assert_eq!(body["meta"]["pagination"]["total"], 5);
    assert_eq!(body["meta"]["pagination"]["current_page"], 18446744073709551615u64);
}

#[tokio::test]
async fn page_walks_the_listing() {
    let app = TestApp::new().await;
    app.fill_roles(40).await;

    let (_, body) = app.get("/api/v1/roles?limit=15&page=3").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["meta"]["pagination"]["current_page"], 3);
    assert_eq!(body["meta"]["pagination"]["count"], 10);
    assert_eq!(body["meta"]["pagination"]["total_pages"], 3);
}

#[tokio::test]
async fn same_policy_applies_to_every_listing() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/v1/permissions?limit=2").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["pagination"]["total"], 4);

    for i in 0..3 {
        app.db.create_user(&format!("member{}", i)).await;
    }
    let (_, body) = app.get("/api/v1/users?limit=0").await;
    assert_eq!(body["meta"]["pagination"]["per_page"], 15);
    assert_eq!(body["data"].as_array().unwrap().len(), 4);
}
