//! `Json<T>` plus `validator::Validate`
//!
//! Malformed bodies are rejected with 400, bodies that parse but fail
//! validation with 422 and a `field: message` list.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::Validate;

use super::ApiResponse;

/// Extractor that deserializes a JSON body and validates it.
///
/// ```ignore
/// async fn store(ValidatedJson(body): ValidatedJson<RoleRequest>) { /* body.name is non-empty */ }
/// ```
pub struct ValidatedJson<T>(pub T);

pub enum ValidatedJsonRejection {
    JsonError(JsonRejection),
    ValidationError(validator::ValidationErrors),
}

/// Flatten field errors into `field: message` pairs, sorted by field.
fn describe(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, msg)
            })
        })
        .collect();

    if messages.is_empty() {
        "The given data was invalid.".to_string()
    } else {
        messages.join("; ")
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            Self::JsonError(rejection) => {
                debug!(error = %rejection, "Rejected malformed JSON body");
                let body = ApiResponse::<()>::error(format!("Invalid JSON: {}", rejection));
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::ValidationError(errors) => {
                let body = ApiResponse::<()>::error(describe(&errors));
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
        }
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct Assignment {
        #[serde(default)]
        #[validate(length(min = 1, message = "The user id field is required."))]
        user_id: String,
        #[serde(default)]
        #[validate(length(min = 1, message = "The role id field is required."))]
        role_id: String,
    }

    async fn handler(ValidatedJson(_body): ValidatedJson<Assignment>) -> &'static str {
        "ok"
    }

    fn app() -> Router {
        Router::new().route("/assign", post(handler))
    }

    async fn send(body: Body) -> axum::http::Response<Body> {
        use tower::Service;
        let req = Request::builder()
            .method("POST")
            .uri("/assign")
            .header("content-type", "application/json")
            .body(body)
            .unwrap();
        let mut svc = app().into_service();
        svc.call(req).await.unwrap()
    }

    #[tokio::test]
    async fn valid_body_passes() {
        let body = serde_json::json!({"user_id": "u1", "role_id": "r1"});
        let resp = send(Body::from(body.to_string())).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let resp = send(Body::from("{user_id")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_fields_list_every_message() {
        let resp = send(Body::from("{}")).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(
            json["error"],
            "role_id: The role id field is required.; user_id: The user id field is required."
        );
    }
}
