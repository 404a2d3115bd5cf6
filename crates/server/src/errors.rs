use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::ServiceError;
use tracing::debug;

/// JSON error body: `{"error": <title>, "detail": <message>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", Some(detail.into()))
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => Self::not_found(e.to_string()),
            ServiceError::ImmutableField(_) => {
                Self::new(StatusCode::NOT_ACCEPTABLE, "Immutable Field", Some(e.to_string()))
            }
        }
    }
}

/// Missing body, non-JSON body, wrong content type and missing/mistyped fields all land here.
impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Malformed Body", Some(rejection.body_text()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        debug!(status = %self.status, error = self.title, detail = ?self.detail, "request rejected");
        let body = serde_json::json!({"error": self.title, "detail": self.detail});
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let nf: JsonApiError = ServiceError::not_found("user", 9).into();
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        let imm: JsonApiError = ServiceError::immutable("id", 3, 99).into();
        assert_eq!(imm.status, StatusCode::NOT_ACCEPTABLE);
    }

    #[test]
    fn immutable_detail_echoes_requested_value() {
        let imm: JsonApiError = ServiceError::immutable("id", 1, serde_json::json!("abc")).into();
        assert_eq!(imm.detail.as_deref(), Some("immutable field: id cannot change from 1 to \"abc\""));
    }

    #[test]
    fn response_carries_status() {
        let resp = JsonApiError::not_found("user 9 not found").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
