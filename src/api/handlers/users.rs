//! User handlers: listing, login upsert, role lookup, role update.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch};
use axum::{Json, Router};

use crate::api::dto::{LoginRequest, RoleResponse, UpdateRoleRequest};
use crate::app_state::AppState;
use crate::auth::AuthedUser;
use crate::domain::User;
use crate::error::{ApiError, ErrorResponse};

/// `GET /users` — List all users.
///
/// # Errors
///
/// Returns [`ApiError`] on storage failure.
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = Vec<User>),
    )
)]
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let users = state.store.list_users().await?;
    Ok(Json(users))
}

/// `POST /users` — Upsert a user by email on login.
///
/// Inserts a new user with role `"user"`, or refreshes `last_logged_in`
/// if the email is already registered.
///
/// # Errors
///
/// Returns [`ApiError`] on storage failure.
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "User record after upsert", body = User),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .store
        .upsert_user(&req.email, req.name.as_deref(), req.photo_url.as_deref())
        .await?;
    tracing::info!(email = %user.email, "user login recorded");
    Ok(Json(user))
}

/// `GET /users/role` — Role of the authenticated user.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] without a valid bearer token.
#[utoipa::path(
    get,
    path = "/users/role",
    tag = "Users",
    responses(
        (status = 200, description = "Role of the caller", body = RoleResponse),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn role(
    State(state): State<AppState>,
    AuthedUser { email }: AuthedUser,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.store.get_user(&email).await?;
    Ok(Json(RoleResponse {
        role: user.map(|u| u.role),
    }))
}

/// `PATCH /update-role` — Set a user's role by email.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if no user has the given email.
#[utoipa::path(
    patch,
    path = "/update-role",
    tag = "Users",
    request_body = UpdateRoleRequest,
    responses(
        (status = 204, description = "Role updated"),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn update_role(
    State(state): State<AppState>,
    Json(req): Json<UpdateRoleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state.store.set_user_role(&req.email, &req.role).await?;
    if updated == 0 {
        return Err(ApiError::NotFound(format!("user {}", req.email)));
    }
    tracing::info!(email = %req.email, role = %req.role, "role updated");
    Ok(StatusCode::NO_CONTENT)
}

/// User routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(login))
        .route("/users/role", get(role))
        .route("/update-role", patch(update_role))
}
