//! Submission handlers: list, store, get.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::domain::Submission;
use crate::error::{ApiError, ErrorResponse};

/// `GET /submissions` — List all submissions.
///
/// # Errors
///
/// Returns [`ApiError`] on storage failure.
#[utoipa::path(
    get,
    path = "/submissions",
    tag = "Submissions",
    responses(
        (status = 200, description = "All submissions", body = Vec<Submission>),
    )
)]
pub async fn list_submissions(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let submissions = state.store.list_submissions().await?;
    Ok(Json(submissions))
}

/// `POST /submissions` — Store a submission payload.
///
/// The payload is an arbitrary JSON document; the store assigns the id.
///
/// # Errors
///
/// Returns [`ApiError`] on storage failure.
#[utoipa::path(
    post,
    path = "/submissions",
    tag = "Submissions",
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "Submission stored", body = Submission),
    )
)]
pub async fn create_submission(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError> {
    let submission = state.store.insert_submission(payload).await?;
    Ok((StatusCode::CREATED, Json(submission)))
}

/// `GET /submissions/:id` — Get a submission.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the submission does not exist.
#[utoipa::path(
    get,
    path = "/submissions/{id}",
    tag = "Submissions",
    params(
        ("id" = Uuid, Path, description = "Submission UUID"),
    ),
    responses(
        (status = 200, description = "Submission", body = Submission),
        (status = 404, description = "Submission not found", body = ErrorResponse),
    )
)]
pub async fn get_submission(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let submission = state
        .store
        .get_submission(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("submission {id}")))?;
    Ok(Json(submission))
}

/// Submission routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/submissions", get(list_submissions).post(create_submission))
        .route("/submissions/{id}", get(get_submission))
}
