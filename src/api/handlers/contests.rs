//! Contest handlers: publish, list, get, creator filter, search.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::api::dto::{CreateContestRequest, SearchParams};
use crate::app_state::AppState;
use crate::auth::AuthedUser;
use crate::domain::Contest;
use crate::error::{ApiError, ErrorResponse};
use crate::persistence::NewContest;

/// `POST /contests` — Publish a new contest.
///
/// # Errors
///
/// Returns [`ApiError`] on storage failure.
#[utoipa::path(
    post,
    path = "/contests",
    tag = "Contests",
    request_body = CreateContestRequest,
    responses(
        (status = 201, description = "Contest created", body = Contest),
    )
)]
pub async fn create_contest(
    State(state): State<AppState>,
    Json(req): Json<CreateContestRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let contest = state
        .store
        .insert_contest(&NewContest {
            name: req.name,
            contest_type: req.contest_type,
            description: req.description,
            banner_image: req.banner_image,
            creator_email: req.creator_email,
            price: req.price,
        })
        .await?;

    tracing::info!(contest_id = %contest.id, "contest published");
    Ok((StatusCode::CREATED, Json(contest)))
}

/// `GET /contests` — List all contests.
///
/// # Errors
///
/// Returns [`ApiError`] on storage failure.
#[utoipa::path(
    get,
    path = "/contests",
    tag = "Contests",
    responses(
        (status = 200, description = "All contests", body = Vec<Contest>),
    )
)]
pub async fn list_contests(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let contests = state.store.list_contests().await?;
    Ok(Json(contests))
}

/// `GET /contests/:id` — Get contest details.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the contest does not exist.
#[utoipa::path(
    get,
    path = "/contests/{id}",
    tag = "Contests",
    params(
        ("id" = Uuid, Path, description = "Contest UUID"),
    ),
    responses(
        (status = 200, description = "Contest details", body = Contest),
        (status = 404, description = "Contest not found", body = ErrorResponse),
    )
)]
pub async fn get_contest(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let contest = state
        .store
        .get_contest(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("contest {id}")))?;
    Ok(Json(contest))
}

/// `GET /mycontests` — Contests created by the authenticated user.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] without a valid bearer token.
#[utoipa::path(
    get,
    path = "/mycontests",
    tag = "Contests",
    responses(
        (status = 200, description = "Contests created by the caller", body = Vec<Contest>),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn my_contests(
    State(state): State<AppState>,
    AuthedUser { email }: AuthedUser,
) -> Result<impl IntoResponse, ApiError> {
    let contests = state.store.contests_by_creator(&email).await?;
    Ok(Json(contests))
}

/// `GET /search?search=<substring>` — Case-insensitive substring match
/// against contest type.
///
/// # Errors
///
/// Returns [`ApiError`] on storage failure.
#[utoipa::path(
    get,
    path = "/search",
    tag = "Contests",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching contests", body = Vec<Contest>),
    )
)]
pub async fn search_contests(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let contests = state.store.search_contests(&params.search).await?;
    Ok(Json(contests))
}

/// Contest routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/contests", get(list_contests).post(create_contest))
        .route("/contests/{id}", get(get_contest))
        .route("/mycontests", get(my_contests))
        .route("/search", get(search_contests))
}
