//! Contest order recorded by the payment reconciliation flow.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::Contest;

/// An order recorded for a completed payment.
///
/// Created exactly once per external transaction id (enforced by a unique
/// index on `transaction_id`); never updated or deleted. The name, type,
/// price, and image fields are a denormalized snapshot of the contest at
/// reconciliation time and are not kept in sync with later contest edits.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Order {
    /// Order identifier.
    pub id: Uuid,
    /// The contest this order pays entry into.
    pub contest_id: Uuid,
    /// External payment-intent identifier, unique per real-world payment.
    pub transaction_id: String,
    /// Email of the paying customer, taken verbatim from session metadata.
    pub customer_email: String,
    /// Order status; starts at `"pending"` and is never transitioned here.
    pub status: String,
    /// Contest name at reconciliation time.
    pub name: String,
    /// Contest category at reconciliation time (JSON field `type`).
    #[serde(rename = "type")]
    pub contest_type: Option<String>,
    /// Number of entries purchased.
    pub quantity: i32,
    /// Amount paid in major units (`amount_total / 100`).
    pub price: Decimal,
    /// Contest banner image at reconciliation time.
    pub image: Option<String>,
    /// Reconciliation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Builds the order snapshot for a completed checkout session.
    ///
    /// `amount_total_minor` is the session total in minor units (cents);
    /// the stored price is the exact decimal conversion, e.g. 2500 → 25.
    #[must_use]
    pub fn reconciled(
        contest: &Contest,
        transaction_id: &str,
        customer_email: &str,
        amount_total_minor: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            contest_id: contest.id,
            transaction_id: transaction_id.to_string(),
            customer_email: customer_email.to_string(),
            status: "pending".to_string(),
            name: contest.name.clone(),
            contest_type: Some(contest.contest_type.clone()),
            quantity: 1,
            price: Decimal::new(amount_total_minor, 2),
            image: contest.banner_image.clone(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_contest() -> Contest {
        Contest {
            id: Uuid::new_v4(),
            name: "Logo Design Battle".to_string(),
            contest_type: "design".to_string(),
            description: None,
            banner_image: Some("https://img.example/banner.png".to_string()),
            creator_email: "creator@x.com".to_string(),
            price: dec!(25),
            participants: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn price_is_exact_minor_unit_conversion() {
        let contest = sample_contest();
        let order = Order::reconciled(&contest, "pi_1", "a@x.com", 2500);
        assert_eq!(order.price, dec!(25));

        let odd = Order::reconciled(&contest, "pi_2", "a@x.com", 1999);
        assert_eq!(odd.price, dec!(19.99));
    }

    #[test]
    fn snapshot_copies_contest_fields() {
        let contest = sample_contest();
        let order = Order::reconciled(&contest, "pi_1", "a@x.com", 2500);
        assert_eq!(order.contest_id, contest.id);
        assert_eq!(order.name, contest.name);
        assert_eq!(order.contest_type.as_deref(), Some("design"));
        assert_eq!(order.image, contest.banner_image);
        assert_eq!(order.status, "pending");
        assert_eq!(order.quantity, 1);
        assert_eq!(order.customer_email, "a@x.com");
    }
}
