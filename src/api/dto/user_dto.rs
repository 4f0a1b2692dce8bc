//! User endpoint DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /users` (login upsert).
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Email address (natural key).
    pub email: String,
    /// Display name from the identity provider.
    #[serde(default)]
    pub name: Option<String>,
    /// Avatar URL from the identity provider.
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Response body for `GET /users/role`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoleResponse {
    /// Role of the authenticated user, or `null` if no user record exists.
    pub role: Option<String>,
}

/// Request body for `PATCH /update-role`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRoleRequest {
    /// Email of the user whose role changes.
    pub email: String,
    /// New role string.
    pub role: String,
}
