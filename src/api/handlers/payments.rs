//! Payment handlers: checkout creation and order reconciliation.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{
    CheckoutRequestDto, CheckoutResponse, PaymentSuccessRequest, PaymentSuccessResponse,
};
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse};
use crate::payments::CheckoutRequest;

/// `POST /payment` — Create a checkout session for a contest entry.
///
/// # Errors
///
/// Returns [`ApiError::UpstreamLookup`] if the payment processor call
/// fails.
#[utoipa::path(
    post,
    path = "/payment",
    tag = "Payments",
    request_body = CheckoutRequestDto,
    responses(
        (status = 200, description = "Hosted payment page URL", body = CheckoutResponse),
        (status = 502, description = "Payment processor unavailable", body = ErrorResponse),
    )
)]
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(req): Json<CheckoutRequestDto>,
) -> Result<impl IntoResponse, ApiError> {
    let url = state
        .orders
        .begin_checkout(CheckoutRequest {
            contest_id: req.id,
            name: req.name,
            description: req.description,
            image: req.image,
            price: req.price,
            quantity: req.quantity,
            customer_email: req.participator.email,
        })
        .await?;

    Ok(Json(CheckoutResponse { url }))
}

/// `POST /payment-success` — Reconcile a completed checkout session.
///
/// Records the order exactly once per payment-intent id and registers
/// the payer as a contest participant. Repeat calls return the same
/// response.
///
/// # Errors
///
/// - 502 if the processor is unreachable or the session id is unknown.
/// - 404 if the referenced contest does not exist.
/// - 422 if the session status is not `complete`.
#[utoipa::path(
    post,
    path = "/payment-success",
    tag = "Payments",
    request_body = PaymentSuccessRequest,
    responses(
        (status = 200, description = "Order on record for this transaction", body = PaymentSuccessResponse),
        (status = 404, description = "Contest not found", body = ErrorResponse),
        (status = 422, description = "Payment not completed", body = ErrorResponse),
        (status = 502, description = "Payment processor unavailable", body = ErrorResponse),
    )
)]
pub async fn payment_success(
    State(state): State<AppState>,
    Json(req): Json<PaymentSuccessRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state.orders.reconcile(&req.session_id).await?;

    Ok(Json(PaymentSuccessResponse {
        transaction_id: outcome.transaction_id,
        contestorder_id: outcome.order_id,
    }))
}

/// Payment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payment", post(create_checkout))
        .route("/payment-success", post(payment_success))
}
