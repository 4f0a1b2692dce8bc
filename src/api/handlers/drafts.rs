//! Contest draft handlers: the create-contest editing workflow.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch};
use axum::{Json, Router};
use uuid::Uuid;

use crate::api::dto::UpdateStatusRequest;
use crate::app_state::AppState;
use crate::domain::ContestDraft;
use crate::error::{ApiError, ErrorResponse};

/// `POST /create-contest` — Store a new draft.
///
/// # Errors
///
/// Returns [`ApiError`] on storage failure.
#[utoipa::path(
    post,
    path = "/create-contest",
    tag = "Drafts",
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "Draft stored", body = ContestDraft),
    )
)]
pub async fn create_draft(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = state.store.insert_draft(payload).await?;
    Ok((StatusCode::CREATED, Json(draft)))
}

/// `GET /create-contest` — List all drafts.
///
/// # Errors
///
/// Returns [`ApiError`] on storage failure.
#[utoipa::path(
    get,
    path = "/create-contest",
    tag = "Drafts",
    responses(
        (status = 200, description = "All drafts", body = Vec<ContestDraft>),
    )
)]
pub async fn list_drafts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let drafts = state.store.list_drafts().await?;
    Ok(Json(drafts))
}

/// `GET /create-contest/:id` — Get a draft.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the draft does not exist.
#[utoipa::path(
    get,
    path = "/create-contest/{id}",
    tag = "Drafts",
    params(
        ("id" = Uuid, Path, description = "Draft UUID"),
    ),
    responses(
        (status = 200, description = "Draft", body = ContestDraft),
        (status = 404, description = "Draft not found", body = ErrorResponse),
    )
)]
pub async fn get_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = state
        .store
        .get_draft(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("draft {id}")))?;
    Ok(Json(draft))
}

/// `PATCH /create-contest/:id` — Replace a draft's payload.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the draft does not exist.
#[utoipa::path(
    patch,
    path = "/create-contest/{id}",
    tag = "Drafts",
    params(
        ("id" = Uuid, Path, description = "Draft UUID"),
    ),
    request_body = serde_json::Value,
    responses(
        (status = 204, description = "Draft updated"),
        (status = 404, description = "Draft not found", body = ErrorResponse),
    )
)]
pub async fn update_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state.store.replace_draft_payload(id, payload).await?;
    if updated == 0 {
        return Err(ApiError::NotFound(format!("draft {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /create-contest-status/:id` — Set a draft's review status.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the draft does not exist.
#[utoipa::path(
    patch,
    path = "/create-contest-status/{id}",
    tag = "Drafts",
    params(
        ("id" = Uuid, Path, description = "Draft UUID"),
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 204, description = "Status updated"),
        (status = 404, description = "Draft not found", body = ErrorResponse),
    )
)]
pub async fn update_draft_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state.store.set_draft_status(id, &req.status).await?;
    if updated == 0 {
        return Err(ApiError::NotFound(format!("draft {id}")));
    }
    tracing::info!(draft_id = %id, status = %req.status, "draft status updated");
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /create-contest/:id` — Delete a draft.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the draft does not exist.
#[utoipa::path(
    delete,
    path = "/create-contest/{id}",
    tag = "Drafts",
    params(
        ("id" = Uuid, Path, description = "Draft UUID"),
    ),
    responses(
        (status = 204, description = "Draft deleted"),
        (status = 404, description = "Draft not found", body = ErrorResponse),
    )
)]
pub async fn delete_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.store.delete_draft(id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound(format!("draft {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Draft routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/create-contest", get(list_drafts).post(create_draft))
        .route(
            "/create-contest/{id}",
            get(get_draft).patch(update_draft).delete(delete_draft),
        )
        .route("/create-contest-status/{id}", patch(update_draft_status))
}
