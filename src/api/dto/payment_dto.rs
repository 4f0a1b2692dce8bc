//! Payment endpoint DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// The paying participant, as sent by the web client.
#[derive(Debug, Deserialize, ToSchema)]
pub struct Participator {
    /// Email address of the payer.
    pub email: String,
}

/// Request body for `POST /payment`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequestDto {
    /// Contest being entered.
    pub id: Uuid,
    /// Product name shown on the checkout page.
    pub name: String,
    /// Product description shown on the checkout page.
    #[serde(default)]
    pub description: Option<String>,
    /// Product image shown on the checkout page.
    #[serde(default)]
    pub image: Option<String>,
    /// Entry price in major units.
    pub price: Decimal,
    /// Number of entries.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// The paying participant.
    pub participator: Participator,
}

fn default_quantity() -> u32 {
    1
}

/// Response body for `POST /payment`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    /// Hosted payment page URL to redirect the client to.
    pub url: String,
}

/// Request body for `POST /payment-success`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentSuccessRequest {
    /// Checkout session identifier issued at checkout creation.
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// Response body for `POST /payment-success`.
///
/// Identical for a fresh reconciliation and a repeat call for the same
/// transaction.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentSuccessResponse {
    /// External payment-intent identifier.
    #[serde(rename = "transactionId")]
    pub transaction_id: String,
    /// Identifier of the order on record for this transaction.
    #[serde(rename = "contestorderId")]
    pub contestorder_id: Uuid,
}
