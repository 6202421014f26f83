use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::Value;
use tower::ServiceExt;

use crate::config::AppConfig;
use crate::domain::User;
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::interfaces::http::{create_api_router, AppState};
use crate::shared::{LimitRequest, PaginationConfig};
use crate::test_support::TestDb;

pub struct TestApp {
    pub db: TestDb,
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    pub async fn with_config(config: AppConfig) -> Self {
        let db = TestDb::seeded_with(config).await;
        let state = AppState::new(db.db.clone(), db.repos.clone(), &db.config).unwrap();
        // Local recorder; the global one is left alone in tests.
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let router = create_api_router(state, handle);
        Self { db, router }
    }

    pub fn token_for(&self, user: &User) -> String {
        let jwt = JwtConfig::from(&self.db.config.security);
        create_token(&user.id, &user.username, &jwt).unwrap()
    }

    pub fn admin_token(&self) -> String {
        self.token_for(self.db.admin())
    }

    /// Send a request and return the status with the decoded JSON body
    /// (`Value::Null` for empty bodies).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let token = self.admin_token();
        self.send(Method::GET, uri, Some(&token), None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let token = self.admin_token();
        self.send(Method::POST, uri, Some(&token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let token = self.admin_token();
        self.send(Method::PUT, uri, Some(&token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let token = self.admin_token();
        self.send(Method::DELETE, uri, Some(&token), body).await
    }

    /// Top the role table up to `total` rows, seeded roles included.
    pub async fn fill_roles(&self, total: usize) {
        let roles = self.db.repos.roles();
        let one = PaginationConfig::default().resolve(&LimitRequest::from("1"));
        let existing = roles
            .list_roles(one, 1)
            .await
            .unwrap()
            .total as usize;
        for i in existing..total {
            roles
                .create_role(&format!("role test {}", i), &self.db.config.authorization.guard_name)
                .await
                .unwrap();
        }
    }
}
