//! Contest submission entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A contest submission. The payload is an arbitrary JSON document;
/// the store assigns the identifier. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Submission {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Arbitrary submission payload.
    pub payload: serde_json::Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
