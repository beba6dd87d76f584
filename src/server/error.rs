// ABOUTME: HTTP error responses for the provisioning API
// ABOUTME: Maps pipeline errors to status codes with an {"error": ...} JSON body

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

use crate::provision::ProvisionError;

#[derive(Debug)]
pub struct ApiError(pub ProvisionError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        if self.0.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<ProvisionError> for ApiError {
    fn from(err: ProvisionError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();
        warn!(status = status.as_u16(), "Request failed: {}", message);

        (status, Json(json!({ "error": message }))).into_response()
    }
}
