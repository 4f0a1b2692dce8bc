//! Contest endpoint DTOs.

use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Request body for `POST /contests`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateContestRequest {
    /// Contest name.
    pub name: String,
    /// Contest category.
    #[serde(rename = "type")]
    pub contest_type: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Banner image URL.
    #[serde(default)]
    pub banner_image: Option<String>,
    /// Email of the contest creator.
    pub creator_email: String,
    /// Entry price in major units.
    pub price: Decimal,
}

/// Query parameters for `GET /search`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Case-insensitive substring matched against contest type.
    pub search: String,
}
