//! Order reconciliation: confirm a payment, record the order once,
//! register the participant.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::Order;
use crate::error::ApiError;
use crate::payments::{CheckoutRequest, PaymentProcessor, SessionStatus};
use crate::persistence::ContestStore;

/// Result of a reconciliation: the external transaction id and the id of
/// the order now on record for it (freshly inserted or pre-existing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledOrder {
    /// External payment-intent identifier.
    pub transaction_id: String,
    /// Identifier of the order recorded for this transaction.
    pub order_id: Uuid,
}

/// Orchestrates checkout creation and payment reconciliation.
///
/// Stateless across calls; owns its collaborators as injected trait
/// objects so tests can substitute fakes for the processor and store.
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn ContestStore>,
    payments: Arc<dyn PaymentProcessor>,
}

impl std::fmt::Debug for OrderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderService").finish_non_exhaustive()
    }
}

impl OrderService {
    /// Creates a new `OrderService`.
    #[must_use]
    pub fn new(store: Arc<dyn ContestStore>, payments: Arc<dyn PaymentProcessor>) -> Self {
        Self { store, payments }
    }

    /// Opens a checkout session for a contest entry and returns the
    /// hosted payment page URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UpstreamLookup`] if the processor call fails.
    pub async fn begin_checkout(&self, request: CheckoutRequest) -> Result<String, ApiError> {
        let url = self.payments.create_checkout(&request).await?;
        tracing::info!(
            contest_id = %request.contest_id,
            customer = %request.customer_email,
            "checkout session opened"
        );
        Ok(url)
    }

    /// Reconciles a completed checkout session.
    ///
    /// Retrieves the session from the processor, then records an order and
    /// appends the payer to the contest's participants if and only if the
    /// session is complete, the contest exists, and no order exists for
    /// the session's payment-intent id. Repeat calls (including two racing
    /// calls) return the same [`ReconciledOrder`]: the storage layer's
    /// insert-or-fail guard makes the duplicate path converge on the
    /// order that won.
    ///
    /// The order insert and participant append are not transactional; a
    /// crash between them leaves an order without a participant entry.
    ///
    /// # Errors
    ///
    /// - [`ApiError::UpstreamLookup`] — processor unreachable, session id
    ///   unknown, or the session carries no payment intent / total.
    /// - [`ApiError::NotFound`] — the referenced contest does not exist.
    ///   Nothing is written.
    /// - [`ApiError::PaymentIncomplete`] — session status is not
    ///   `complete`. Nothing is written.
    /// - [`ApiError::InvalidRequest`] — the session metadata carries a
    ///   malformed contest id.
    pub async fn reconcile(&self, session_id: &str) -> Result<ReconciledOrder, ApiError> {
        let session = self.payments.retrieve_session(session_id).await?;

        let transaction_id = session.payment_intent.clone().ok_or_else(|| {
            ApiError::UpstreamLookup(format!("session {session_id} has no payment intent"))
        })?;

        let contest_id = Uuid::parse_str(&session.metadata.contest_id).map_err(|_| {
            ApiError::InvalidRequest(format!(
                "malformed contest id in session metadata: {}",
                session.metadata.contest_id
            ))
        })?;

        let contest = self
            .store
            .get_contest(contest_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("contest {contest_id}")))?;

        // Already reconciled: return the recorded order unchanged.
        if let Some(existing) = self.store.find_order_by_transaction(&transaction_id).await? {
            return Ok(ReconciledOrder {
                transaction_id,
                order_id: existing.id,
            });
        }

        if session.status != SessionStatus::Complete {
            return Err(ApiError::PaymentIncomplete(session.id));
        }

        let amount_total = session.amount_total.ok_or_else(|| {
            ApiError::UpstreamLookup(format!("session {session_id} has no total amount"))
        })?;

        let order = Order::reconciled(
            &contest,
            &transaction_id,
            &session.metadata.participator,
            amount_total,
        );

        match self.store.insert_order(&order).await {
            Ok(()) => {}
            // Lost a race with a concurrent reconciliation of the same
            // transaction: converge on the order that got in first.
            Err(ApiError::DuplicateOrder(_)) => {
                let existing = self
                    .store
                    .find_order_by_transaction(&transaction_id)
                    .await?
                    .ok_or_else(|| {
                        ApiError::Internal(format!(
                            "order for transaction {transaction_id} vanished after conflict"
                        ))
                    })?;
                return Ok(ReconciledOrder {
                    transaction_id,
                    order_id: existing.id,
                });
            }
            Err(e) => return Err(e),
        }

        self.store
            .append_participant(contest_id, &session.metadata.participator)
            .await?;

        tracing::info!(
            %contest_id,
            transaction_id = %transaction_id,
            order_id = %order.id,
            "order reconciled"
        );

        Ok(ReconciledOrder {
            transaction_id,
            order_id: order.id,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    use crate::domain::Contest;
    use crate::payments::{CheckoutSession, SessionMetadata};
    use crate::persistence::memory::MemoryStore;

    /// Fake processor serving canned sessions from a map.
    #[derive(Debug, Default)]
    struct FakeProcessor {
        sessions: HashMap<String, CheckoutSession>,
    }

    #[async_trait]
    impl PaymentProcessor for FakeProcessor {
        async fn create_checkout(&self, _request: &CheckoutRequest) -> Result<String, ApiError> {
            Ok("https://pay.example/session".to_string())
        }

        async fn retrieve_session(&self, session_id: &str) -> Result<CheckoutSession, ApiError> {
            self.sessions
                .get(session_id)
                .cloned()
                .ok_or_else(|| ApiError::UpstreamLookup(format!("no such session {session_id}")))
        }
    }

    fn session(
        id: &str,
        status: SessionStatus,
        contest_id: &str,
        payment_intent: &str,
    ) -> CheckoutSession {
        CheckoutSession {
            id: id.to_string(),
            status,
            payment_intent: Some(payment_intent.to_string()),
            amount_total: Some(2500),
            metadata: SessionMetadata {
                contest_id: contest_id.to_string(),
                participator: "a@x.com".to_string(),
            },
        }
    }

    async fn seeded_contest(store: &MemoryStore) -> Contest {
        let contest = Contest {
            id: Uuid::new_v4(),
            name: "Logo Design Battle".to_string(),
            contest_type: "design".to_string(),
            description: None,
            banner_image: Some("https://img.example/banner.png".to_string()),
            creator_email: "creator@x.com".to_string(),
            price: dec!(25),
            participants: vec![],
            created_at: chrono::Utc::now(),
        };
        store.seed_contest(contest.clone()).await;
        contest
    }

    fn service(store: &MemoryStore, processor: FakeProcessor) -> OrderService {
        OrderService::new(Arc::new(store.clone()), Arc::new(processor))
    }

    #[tokio::test]
    async fn complete_session_records_order_and_participant() {
        let store = MemoryStore::new();
        let contest = seeded_contest(&store).await;

        let mut processor = FakeProcessor::default();
        processor.sessions.insert(
            "cs_1".to_string(),
            session("cs_1", SessionStatus::Complete, &contest.id.to_string(), "pi_1"),
        );
        let service = service(&store, processor);

        let Ok(outcome) = service.reconcile("cs_1").await else {
            panic!("reconciliation should succeed");
        };
        assert_eq!(outcome.transaction_id, "pi_1");

        let Ok(Some(order)) = store.find_order_by_transaction("pi_1").await else {
            panic!("order should be recorded");
        };
        assert_eq!(order.id, outcome.order_id);
        assert_eq!(order.contest_id, contest.id);
        assert_eq!(order.customer_email, "a@x.com");
        assert_eq!(order.price, dec!(25));
        assert_eq!(order.status, "pending");
        assert_eq!(order.quantity, 1);

        let Ok(Some(updated)) = store.get_contest(contest.id).await else {
            panic!("contest should exist");
        };
        assert_eq!(updated.participants, vec!["a@x.com".to_string()]);
    }

    #[tokio::test]
    async fn repeat_reconciliation_returns_same_order() {
        let store = MemoryStore::new();
        let contest = seeded_contest(&store).await;

        let mut processor = FakeProcessor::default();
        processor.sessions.insert(
            "cs_1".to_string(),
            session("cs_1", SessionStatus::Complete, &contest.id.to_string(), "pi_1"),
        );
        let service = service(&store, processor);

        let Ok(first) = service.reconcile("cs_1").await else {
            panic!("first reconciliation should succeed");
        };
        let Ok(second) = service.reconcile("cs_1").await else {
            panic!("second reconciliation should succeed");
        };
        assert_eq!(first, second);

        // Exactly one order, exactly one participant entry.
        let Ok(Some(updated)) = store.get_contest(contest.id).await else {
            panic!("contest should exist");
        };
        assert_eq!(updated.participants.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_reconciliations_record_one_order() {
        let store = MemoryStore::new();
        let contest = seeded_contest(&store).await;

        let mut processor = FakeProcessor::default();
        processor.sessions.insert(
            "cs_1".to_string(),
            session("cs_1", SessionStatus::Complete, &contest.id.to_string(), "pi_1"),
        );
        let service = service(&store, processor);

        let (a, b) = tokio::join!(service.reconcile("cs_1"), service.reconcile("cs_1"));
        let (Ok(a), Ok(b)) = (a, b) else {
            panic!("both reconciliations should succeed");
        };
        assert_eq!(a.transaction_id, b.transaction_id);
        assert_eq!(a.order_id, b.order_id);

        let Ok(Some(order)) = store.find_order_by_transaction("pi_1").await else {
            panic!("order should be recorded");
        };
        assert_eq!(order.id, a.order_id);
    }

    #[tokio::test]
    async fn incomplete_session_writes_nothing() {
        let store = MemoryStore::new();
        let contest = seeded_contest(&store).await;

        let mut processor = FakeProcessor::default();
        processor.sessions.insert(
            "cs_1".to_string(),
            session("cs_1", SessionStatus::Open, &contest.id.to_string(), "pi_1"),
        );
        let service = service(&store, processor);

        let result = service.reconcile("cs_1").await;
        assert!(matches!(result, Err(ApiError::PaymentIncomplete(_))));

        let order = store.find_order_by_transaction("pi_1").await;
        assert!(matches!(order, Ok(None)));
        let Ok(Some(untouched)) = store.get_contest(contest.id).await else {
            panic!("contest should exist");
        };
        assert!(untouched.participants.is_empty());
    }

    #[tokio::test]
    async fn missing_contest_writes_nothing() {
        let store = MemoryStore::new();

        let mut processor = FakeProcessor::default();
        processor.sessions.insert(
            "cs_1".to_string(),
            session(
                "cs_1",
                SessionStatus::Complete,
                &Uuid::new_v4().to_string(),
                "pi_1",
            ),
        );
        let service = service(&store, processor);

        let result = service.reconcile("cs_1").await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));

        let order = store.find_order_by_transaction("pi_1").await;
        assert!(matches!(order, Ok(None)));
    }

    #[tokio::test]
    async fn unknown_session_is_upstream_error() {
        let store = MemoryStore::new();
        let service = service(&store, FakeProcessor::default());

        let result = service.reconcile("cs_missing").await;
        assert!(matches!(result, Err(ApiError::UpstreamLookup(_))));
    }

    #[tokio::test]
    async fn participant_email_is_stored_unmodified() {
        let store = MemoryStore::new();
        let contest = seeded_contest(&store).await;

        let mut checkout = session(
            "cs_1",
            SessionStatus::Complete,
            &contest.id.to_string(),
            "pi_1",
        );
        checkout.metadata.participator = "Mixed.Case+tag@Example.COM".to_string();
        let mut processor = FakeProcessor::default();
        processor.sessions.insert("cs_1".to_string(), checkout);
        let service = service(&store, processor);

        let Ok(_) = service.reconcile("cs_1").await else {
            panic!("reconciliation should succeed");
        };
        let Ok(Some(updated)) = store.get_contest(contest.id).await else {
            panic!("contest should exist");
        };
        assert_eq!(
            updated.participants,
            vec!["Mixed.Case+tag@Example.COM".to_string()]
        );
    }
}
