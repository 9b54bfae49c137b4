use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use portfolio_contact::{ContactForm, ContactSubmission};

use crate::{error::AppError, routes::AppState};

/// POST /api/contact
///
/// Applies defaults, validates, then hands the submission to the dispatcher.
/// Validation failures never reach a provider.
#[tracing::instrument(skip_all, fields(request_id = %ulid::Ulid::new()))]
pub async fn action(
    State(app_state): State<AppState>,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(form) = payload?;
    let submission = ContactSubmission::from(form);
    submission.check()?;

    let result = app_state.dispatcher.dispatch(&submission).await;
    let status = if result.ok {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    tracing::info!(
        ok = result.ok,
        provider = ?result.provider,
        attempts = result.attempts.len(),
        "Contact submission handled"
    );

    Ok((status, Json(result)).into_response())
}
