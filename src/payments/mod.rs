//! Payment processor port: checkout session creation and retrieval.
//!
//! The [`PaymentProcessor`] trait is the seam between the service and the
//! external processor. Production uses [`stripe::StripeClient`]; tests
//! substitute an in-memory fake.

pub mod stripe;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

/// Lifecycle status of a checkout session as reported by the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Payment completed.
    Complete,
    /// Session created, payment not yet made.
    Open,
    /// Session expired before payment.
    Expired,
    /// Any status this service does not recognize.
    #[serde(other)]
    Unknown,
}

/// Metadata attached to a checkout session at creation time and echoed
/// back on retrieval.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionMetadata {
    /// Identifier of the contest being paid for.
    #[serde(rename = "contestId")]
    pub contest_id: String,
    /// Email of the paying participant.
    pub participator: String,
}

/// A checkout session as returned by the processor's retrieve call.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    /// Session identifier.
    pub id: String,
    /// Session status.
    pub status: SessionStatus,
    /// Payment-intent identifier; unique per real-world payment. Absent
    /// until the processor has attached a payment attempt.
    pub payment_intent: Option<String>,
    /// Total amount in minor units (cents). Absent for zero-item sessions.
    pub amount_total: Option<i64>,
    /// Metadata set at session creation.
    pub metadata: SessionMetadata,
}

/// Everything needed to open a checkout session for a contest entry.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    /// Contest being entered.
    pub contest_id: Uuid,
    /// Product name shown on the checkout page.
    pub name: String,
    /// Product description shown on the checkout page.
    pub description: Option<String>,
    /// Product image shown on the checkout page.
    pub image: Option<String>,
    /// Entry price in major units.
    pub price: Decimal,
    /// Number of entries.
    pub quantity: u32,
    /// Email of the paying participant.
    pub customer_email: String,
}

/// Port to the external payment processor.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Creates a checkout session and returns the hosted payment page URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UpstreamLookup`] if the processor is
    /// unreachable or rejects the request, or
    /// [`ApiError::InvalidRequest`] if the price cannot be expressed in
    /// minor units.
    async fn create_checkout(&self, request: &CheckoutRequest) -> Result<String, ApiError>;

    /// Retrieves a checkout session by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UpstreamLookup`] if the processor is
    /// unreachable or the identifier is unknown.
    async fn retrieve_session(&self, session_id: &str) -> Result<CheckoutSession, ApiError>;
}
