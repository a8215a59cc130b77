//! Entry points that open a widget on the home page.

use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

pub async fn open_assessment() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/?openAssessment=true")])
}

pub async fn open_chat() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/?openChat=true")])
}
