//! Contest draft endpoint DTOs.

use serde::Deserialize;
use utoipa::ToSchema;

/// Request body for `PATCH /create-contest-status/{id}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// New review status.
    pub status: String,
}
