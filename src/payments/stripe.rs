//! Stripe-backed implementation of the [`PaymentProcessor`] port.
//!
//! Talks to the processor's form-encoded REST API over `reqwest`. The
//! checkout redirect URLs are derived from the configured client domain:
//! success lands on `/payment-success` with the session id templated in,
//! cancel returns to the contest page.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;

use super::{CheckoutRequest, CheckoutSession, PaymentProcessor};
use crate::error::ApiError;

/// Subset of the session-create response this service uses.
#[derive(Debug, Deserialize)]
struct CreatedSession {
    url: String,
}

/// Payment processor client using the Stripe checkout-sessions API.
#[derive(Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    api_base: String,
    secret_key: String,
    client_domain: String,
}

impl std::fmt::Debug for StripeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeClient")
            .field("api_base", &self.api_base)
            .field("client_domain", &self.client_domain)
            .finish_non_exhaustive()
    }
}

impl StripeClient {
    /// Creates a new client.
    ///
    /// `api_base` has no trailing slash (e.g. `https://api.stripe.com`);
    /// `client_domain` is the web client origin used for redirect URLs.
    #[must_use]
    pub fn new(api_base: String, secret_key: String, client_domain: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base,
            secret_key,
            client_domain,
        }
    }
}

#[async_trait]
impl PaymentProcessor for StripeClient {
    async fn create_checkout(&self, request: &CheckoutRequest) -> Result<String, ApiError> {
        let form = build_checkout_form(request, &self.client_domain)?;

        let response = self
            .http
            .post(format!("{}/v1/checkout/sessions", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| ApiError::UpstreamLookup(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UpstreamLookup(format!(
                "checkout session creation failed: {status}"
            )));
        }

        let created: CreatedSession = response
            .json()
            .await
            .map_err(|e| ApiError::UpstreamLookup(e.to_string()))?;

        tracing::info!(contest_id = %request.contest_id, "checkout session created");
        Ok(created.url)
    }

    async fn retrieve_session(&self, session_id: &str) -> Result<CheckoutSession, ApiError> {
        let response = self
            .http
            .get(format!(
                "{}/v1/checkout/sessions/{session_id}",
                self.api_base
            ))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| ApiError::UpstreamLookup(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UpstreamLookup(format!(
                "checkout session lookup failed: {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::UpstreamLookup(e.to_string()))
    }
}

/// Builds the form-encoded body for the session-create call.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] if the price cannot be converted
/// to whole minor units.
fn build_checkout_form(
    request: &CheckoutRequest,
    client_domain: &str,
) -> Result<Vec<(String, String)>, ApiError> {
    let unit_amount = request
        .price
        .checked_mul(Decimal::from(100))
        .and_then(|minor| minor.to_i64())
        .ok_or_else(|| {
            ApiError::InvalidRequest(format!("price out of range: {}", request.price))
        })?;

    let mut form = vec![
        (
            "line_items[0][price_data][currency]".to_string(),
            "usd".to_string(),
        ),
        (
            "line_items[0][price_data][product_data][name]".to_string(),
            request.name.clone(),
        ),
        (
            "line_items[0][price_data][unit_amount]".to_string(),
            unit_amount.to_string(),
        ),
        (
            "line_items[0][quantity]".to_string(),
            request.quantity.to_string(),
        ),
        ("customer_email".to_string(), request.customer_email.clone()),
        ("mode".to_string(), "payment".to_string()),
        (
            "metadata[contestId]".to_string(),
            request.contest_id.to_string(),
        ),
        (
            "metadata[participator]".to_string(),
            request.customer_email.clone(),
        ),
        (
            "success_url".to_string(),
            format!("{client_domain}/payment-success?session_id={{CHECKOUT_SESSION_ID}}"),
        ),
        (
            "cancel_url".to_string(),
            format!("{client_domain}/contest/{}", request.contest_id),
        ),
    ];

    if let Some(description) = &request.description {
        form.push((
            "line_items[0][price_data][product_data][description]".to_string(),
            description.clone(),
        ));
    }
    if let Some(image) = &request.image {
        form.push((
            "line_items[0][price_data][product_data][images][0]".to_string(),
            image.clone(),
        ));
    }

    Ok(form)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn find<'a>(form: &'a [(String, String)], key: &str) -> Option<&'a str> {
        form.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    fn sample_request() -> CheckoutRequest {
        CheckoutRequest {
            contest_id: Uuid::nil(),
            name: "Logo Design Battle".to_string(),
            description: Some("Entry fee".to_string()),
            image: Some("https://img.example/banner.png".to_string()),
            price: dec!(25),
            quantity: 1,
            customer_email: "a@x.com".to_string(),
        }
    }

    #[test]
    fn checkout_form_converts_price_to_minor_units() {
        let Ok(form) = build_checkout_form(&sample_request(), "https://contest.example") else {
            panic!("form should build");
        };
        assert_eq!(
            find(&form, "line_items[0][price_data][unit_amount]"),
            Some("2500")
        );
        assert_eq!(find(&form, "line_items[0][price_data][currency]"), Some("usd"));
        assert_eq!(find(&form, "mode"), Some("payment"));
    }

    #[test]
    fn checkout_form_carries_metadata_and_redirects() {
        let Ok(form) = build_checkout_form(&sample_request(), "https://contest.example") else {
            panic!("form should build");
        };
        assert_eq!(
            find(&form, "metadata[contestId]"),
            Some("00000000-0000-0000-0000-000000000000")
        );
        assert_eq!(find(&form, "metadata[participator]"), Some("a@x.com"));
        assert_eq!(
            find(&form, "success_url"),
            Some("https://contest.example/payment-success?session_id={CHECKOUT_SESSION_ID}")
        );
        assert_eq!(
            find(&form, "cancel_url"),
            Some("https://contest.example/contest/00000000-0000-0000-0000-000000000000")
        );
    }

    #[test]
    fn overflowing_price_is_rejected() {
        let mut request = sample_request();
        request.price = Decimal::MAX;
        let result = build_checkout_form(&request, "https://contest.example");
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }
}
