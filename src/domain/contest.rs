//! Contest entity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A published contest.
///
/// `participants` is append-only and deliberately not deduplicated: the
/// duplicate-order guard in the reconciliation flow is what prevents the
/// same payment from registering a participant twice.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Contest {
    /// Contest identifier.
    pub id: Uuid,
    /// Contest name.
    pub name: String,
    /// Contest category (JSON field `type`).
    #[serde(rename = "type")]
    pub contest_type: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Banner image URL.
    pub banner_image: Option<String>,
    /// Email of the contest creator.
    pub creator_email: String,
    /// Entry price in major units.
    pub price: Decimal,
    /// Ordered list of participant emails (append-only).
    pub participants: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
