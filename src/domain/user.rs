//! Platform user keyed by email.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A platform user. The email address is the natural key; login performs
/// an upsert that refreshes `last_logged_in` without touching the role.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct User {
    /// Email address (natural key).
    pub email: String,
    /// Display name, if the identity provider supplied one.
    pub name: Option<String>,
    /// Avatar URL, if the identity provider supplied one.
    pub photo_url: Option<String>,
    /// Role string; defaults to `"user"`.
    pub role: String,
    /// First login timestamp.
    pub created_at: DateTime<Utc>,
    /// Most recent login timestamp.
    pub last_logged_in: DateTime<Utc>,
}
