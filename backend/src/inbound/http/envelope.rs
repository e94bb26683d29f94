//! Response envelope and the mapping from domain errors onto it.
//!
//! Every operation answers with `{ code, message?, data? }`: `code = 0` for
//! success, `code = 1` for a handled failure, both under HTTP 200. Clients
//! are expected to branch on the envelope's `code`, not the HTTP status.
//! Unknown routes answer HTTP 404 with `code = 404`; unhandled transport
//! failures keep the framework's HTTP 500 with `code = 500`.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};

/// Envelope `code` for a successful operation.
pub const CODE_OK: u16 = 0;
/// Envelope `code` for a handled failure.
pub const CODE_FAIL: u16 = 1;
/// Envelope `code` for an unknown route.
pub const CODE_NOT_FOUND: u16 = 404;

/// Wire-level response envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct Envelope {
    /// 0 on success, 1 on handled failure, 404/500 for transport problems.
    pub code: u16,
    /// Human-readable explanation, present on failures and bare successes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Operation payload, present on data-carrying successes.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<serde_json::Value>,
}

impl Envelope {
    /// Success with a payload.
    pub fn ok<T: Serialize>(data: T) -> HttpResponse {
        match serde_json::to_value(data) {
            Ok(value) => HttpResponse::Ok().json(Self {
                code: CODE_OK,
                message: None,
                data: Some(value),
            }),
            Err(err) => {
                error!(error = %err, "response payload failed to serialize");
                Error::internal("response serialization failed").error_response()
            }
        }
    }

    /// Success carrying only a confirmation message.
    pub fn ok_message(message: impl Into<String>) -> HttpResponse {
        HttpResponse::Ok().json(Self {
            code: CODE_OK,
            message: Some(message.into()),
            data: None,
        })
    }

    /// Handled failure under HTTP 200.
    pub fn fail(message: impl Into<String>) -> HttpResponse {
        HttpResponse::Ok().json(Self {
            code: CODE_FAIL,
            message: Some(message.into()),
            data: None,
        })
    }

    /// Unknown-route response.
    pub fn route_not_found() -> HttpResponse {
        HttpResponse::NotFound().json(Self {
            code: CODE_NOT_FOUND,
            message: Some("no such operation".to_owned()),
            data: None,
        })
    }
}

/// Hide store internals from clients while keeping them in the logs.
fn client_message(error: &Error) -> &str {
    match error.code() {
        ErrorCode::StoreUnavailable => "service temporarily unavailable",
        ErrorCode::Internal => "internal server error",
        _ => error.message(),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        // Handled failures ride HTTP 200; the envelope's `code` carries the
        // verdict.
        StatusCode::OK
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(
            self.code(),
            ErrorCode::StoreUnavailable | ErrorCode::Internal
        ) {
            error!(code = ?self.code(), message = %self.message(), "ledger operation failed");
        }
        Envelope::fail(client_message(self))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use serde_json::{Value, json};

    use super::*;

    async fn body_json(response: HttpResponse) -> Value {
        let bytes = to_bytes(response.into_body()).await.expect("body bytes");
        serde_json::from_slice(&bytes).expect("body is JSON")
    }

    #[actix_rt::test]
    async fn ok_wraps_the_payload_under_code_zero() {
        let response = Envelope::ok(json!({ "points": 500 }));
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body, json!({ "code": 0, "data": { "points": 500 } }));
    }

    #[actix_rt::test]
    async fn ok_message_omits_the_data_field() {
        let body = body_json(Envelope::ok_message("logged out")).await;
        assert_eq!(body, json!({ "code": 0, "message": "logged out" }));
    }

    #[actix_rt::test]
    async fn handled_failures_ride_http_200() {
        let response = Error::code_expired().error_response();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.get("code").and_then(Value::as_u64), Some(1));
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("activation code has expired")
        );
    }

    #[actix_rt::test]
    async fn store_failures_are_redacted() {
        let response = Error::store_unavailable("connection refused: 10.0.0.7").error_response();
        let body = body_json(response).await;
        let message = body.get("message").and_then(Value::as_str).unwrap_or("");
        assert!(!message.contains("10.0.0.7"));
    }

    #[actix_rt::test]
    async fn unknown_routes_answer_404() {
        let response = Envelope::route_not_found();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body.get("code").and_then(Value::as_u64), Some(404));
    }
}
