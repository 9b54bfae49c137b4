use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use portfolio_contact::INVALID_FORM_MESSAGE;
use serde_json::json;
use thiserror::Error;

pub const BAD_REQUEST_MESSAGE: &str = "Invalid request body.";
pub const SERVER_ERROR_MESSAGE: &str = "Something went wrong, please retry later.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Contact error: {0}")]
    Contact(#[from] portfolio_contact::Error),

    #[error("Bad request: {0}")]
    BadRequest(#[from] JsonRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Contact(portfolio_contact::Error::Validate(e)) => {
                tracing::info!(error = %e, "Contact form rejected");
                (StatusCode::UNPROCESSABLE_ENTITY, INVALID_FORM_MESSAGE)
            }
            AppError::Contact(e) => {
                tracing::error!("Contact error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE)
            }
            AppError::BadRequest(e) => {
                tracing::warn!(error = %e, "Malformed contact request");
                (StatusCode::BAD_REQUEST, BAD_REQUEST_MESSAGE)
            }
        };

        error_response(status, message)
    }
}

/// `{ "ok": false, "error": message }` with the given status.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "ok": false, "error": message }))).into_response()
}
