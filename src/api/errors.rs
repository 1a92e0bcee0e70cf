use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Failures raised before a handler runs, mostly by the auth extractors.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    AccountDisabled,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Invalid or missing credentials").into_response()
            }
            ApiError::AccountDisabled => {
                (StatusCode::FORBIDDEN, "Account is deactivated or deleted").into_response()
            }
        }
    }
}
