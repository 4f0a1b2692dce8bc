//! Contest draft entity (the creation workflow's working copy).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A contest draft being edited through the `create-contest` endpoints.
///
/// The payload is stored as an opaque JSON document; edits replace it
/// wholesale. Status moves through free-form strings driven by the admin
/// UI (`"pending"`, `"approved"`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct ContestDraft {
    /// Draft identifier.
    pub id: Uuid,
    /// Draft contents as submitted by the creator.
    pub payload: serde_json::Value,
    /// Review status; defaults to `"pending"`.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
