use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Error returned by route handlers.
///
/// Every variant renders as `{"success": false, "error": ...}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    PayloadTooLarge,
    /// The completion service failed. Only `public` reaches the client.
    Upstream {
        public: &'static str,
        detail: String,
    },
}

impl ApiError {
    /// Map an unreadable JSON body to a 400 carrying the route's own
    /// validation message. Oversized bodies keep their 413.
    pub fn from_rejection(rejection: JsonRejection, message: &str) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge;
        }
        tracing::debug!(rejection = %rejection.body_text(), "request body rejected");
        ApiError::BadRequest(message.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "Request body too large".to_string(),
            ),
            ApiError::Upstream { public, detail } => {
                tracing::error!(error = %detail, "upstream failure");
                (StatusCode::INTERNAL_SERVER_ERROR, public.to_string())
            }
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                error: message,
            }),
        )
            .into_response()
    }
}
