//! In-memory implementation of the [`ContestStore`] port.
//!
//! Keeps every collection behind a single `tokio::sync::RwLock`, so the
//! duplicate-order check and insert happen under one write guard and the
//! one-order-per-transaction invariant holds under concurrency, matching
//! the database's unique-index behavior. Used by unit tests; also handy
//! for local development without PostgreSQL.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ContestStore, NewContest};
use crate::domain::{Contest, ContestDraft, Order, Submission, User};
use crate::error::ApiError;

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<String, User>,
    contests: HashMap<Uuid, Contest>,
    drafts: HashMap<Uuid, ContestDraft>,
    submissions: HashMap<Uuid, Submission>,
    orders: HashMap<String, Order>,
}

/// Thread-safe in-memory store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a contest directly, bypassing the insert path. Test helper.
    pub async fn seed_contest(&self, contest: Contest) {
        let mut inner = self.inner.write().await;
        inner.contests.insert(contest.id, contest);
    }
}

#[async_trait]
impl ContestStore for MemoryStore {
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().cloned().collect())
    }

    async fn upsert_user(
        &self,
        email: &str,
        name: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<User, ApiError> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .entry(email.to_string())
            .and_modify(|existing| existing.last_logged_in = Utc::now())
            .or_insert_with(|| User {
                email: email.to_string(),
                name: name.map(ToString::to_string),
                photo_url: photo_url.map(ToString::to_string),
                role: "user".to_string(),
                created_at: Utc::now(),
                last_logged_in: Utc::now(),
            });
        Ok(user.clone())
    }

    async fn get_user(&self, email: &str) -> Result<Option<User>, ApiError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(email).cloned())
    }

    async fn set_user_role(&self, email: &str, role: &str) -> Result<u64, ApiError> {
        let mut inner = self.inner.write().await;
        match inner.users.get_mut(email) {
            Some(user) => {
                user.role = role.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn insert_contest(&self, contest: &NewContest) -> Result<Contest, ApiError> {
        let stored = Contest {
            id: Uuid::new_v4(),
            name: contest.name.clone(),
            contest_type: contest.contest_type.clone(),
            description: contest.description.clone(),
            banner_image: contest.banner_image.clone(),
            creator_email: contest.creator_email.clone(),
            price: contest.price,
            participants: vec![],
            created_at: Utc::now(),
        };
        let mut inner = self.inner.write().await;
        inner.contests.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn list_contests(&self) -> Result<Vec<Contest>, ApiError> {
        let inner = self.inner.read().await;
        Ok(inner.contests.values().cloned().collect())
    }

    async fn get_contest(&self, id: Uuid) -> Result<Option<Contest>, ApiError> {
        let inner = self.inner.read().await;
        Ok(inner.contests.get(&id).cloned())
    }

    async fn contests_by_creator(&self, email: &str) -> Result<Vec<Contest>, ApiError> {
        let inner = self.inner.read().await;
        Ok(inner
            .contests
            .values()
            .filter(|c| c.creator_email == email)
            .cloned()
            .collect())
    }

    async fn search_contests(&self, fragment: &str) -> Result<Vec<Contest>, ApiError> {
        let needle = fragment.to_lowercase();
        let inner = self.inner.read().await;
        Ok(inner
            .contests
            .values()
            .filter(|c| c.contest_type.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn append_participant(&self, contest_id: Uuid, email: &str) -> Result<u64, ApiError> {
        let mut inner = self.inner.write().await;
        match inner.contests.get_mut(&contest_id) {
            Some(contest) => {
                contest.participants.push(email.to_string());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn insert_draft(&self, payload: serde_json::Value) -> Result<ContestDraft, ApiError> {
        let draft = ContestDraft {
            id: Uuid::new_v4(),
            payload,
            status: "pending".to_string(),
            created_at: Utc::now(),
        };
        let mut inner = self.inner.write().await;
        inner.drafts.insert(draft.id, draft.clone());
        Ok(draft)
    }

    async fn list_drafts(&self) -> Result<Vec<ContestDraft>, ApiError> {
        let inner = self.inner.read().await;
        Ok(inner.drafts.values().cloned().collect())
    }

    async fn get_draft(&self, id: Uuid) -> Result<Option<ContestDraft>, ApiError> {
        let inner = self.inner.read().await;
        Ok(inner.drafts.get(&id).cloned())
    }

    async fn replace_draft_payload(
        &self,
        id: Uuid,
        payload: serde_json::Value,
    ) -> Result<u64, ApiError> {
        let mut inner = self.inner.write().await;
        match inner.drafts.get_mut(&id) {
            Some(draft) => {
                draft.payload = payload;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn set_draft_status(&self, id: Uuid, status: &str) -> Result<u64, ApiError> {
        let mut inner = self.inner.write().await;
        match inner.drafts.get_mut(&id) {
            Some(draft) => {
                draft.status = status.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_draft(&self, id: Uuid) -> Result<u64, ApiError> {
        let mut inner = self.inner.write().await;
        Ok(u64::from(inner.drafts.remove(&id).is_some()))
    }

    async fn insert_submission(
        &self,
        payload: serde_json::Value,
    ) -> Result<Submission, ApiError> {
        let submission = Submission {
            id: Uuid::new_v4(),
            payload,
            created_at: Utc::now(),
        };
        let mut inner = self.inner.write().await;
        inner.submissions.insert(submission.id, submission.clone());
        Ok(submission)
    }

    async fn list_submissions(&self) -> Result<Vec<Submission>, ApiError> {
        let inner = self.inner.read().await;
        Ok(inner.submissions.values().cloned().collect())
    }

    async fn get_submission(&self, id: Uuid) -> Result<Option<Submission>, ApiError> {
        let inner = self.inner.read().await;
        Ok(inner.submissions.get(&id).cloned())
    }

    async fn insert_order(&self, order: &Order) -> Result<(), ApiError> {
        // Check and insert under one write guard, mirroring the unique
        // index in the PostgreSQL store.
        let mut inner = self.inner.write().await;
        if inner.orders.contains_key(&order.transaction_id) {
            return Err(ApiError::DuplicateOrder(order.transaction_id.clone()));
        }
        inner
            .orders
            .insert(order.transaction_id.clone(), order.clone());
        Ok(())
    }

    async fn find_order_by_transaction(
        &self,
        transaction_id: &str,
    ) -> Result<Option<Order>, ApiError> {
        let inner = self.inner.read().await;
        Ok(inner.orders.get(transaction_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_order(transaction_id: &str) -> Order {
        Order {
            id: Uuid::new_v4(),
            contest_id: Uuid::new_v4(),
            transaction_id: transaction_id.to_string(),
            customer_email: "a@x.com".to_string(),
            status: "pending".to_string(),
            name: "Contest".to_string(),
            contest_type: Some("design".to_string()),
            quantity: 1,
            price: dec!(25),
            image: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_order_rejects_duplicate_transaction() {
        let store = MemoryStore::new();
        let first = sample_order("pi_1");
        let second = sample_order("pi_1");

        assert!(store.insert_order(&first).await.is_ok());
        let result = store.insert_order(&second).await;
        assert!(matches!(result, Err(ApiError::DuplicateOrder(_))));

        let found = store.find_order_by_transaction("pi_1").await;
        assert!(matches!(found, Ok(Some(order)) if order.id == first.id));
    }

    #[tokio::test]
    async fn upsert_user_refreshes_login_without_touching_role() {
        let store = MemoryStore::new();
        let created = store.upsert_user("a@x.com", Some("A"), None).await;
        assert!(matches!(&created, Ok(user) if user.role == "user"));

        let updated = store.set_user_role("a@x.com", "admin").await;
        assert!(matches!(updated, Ok(1)));

        let again = store.upsert_user("a@x.com", None, None).await;
        assert!(matches!(&again, Ok(user) if user.role == "admin"));
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let store = MemoryStore::new();
        let contest = NewContest {
            name: "Logo Battle".to_string(),
            contest_type: "Graphic Design".to_string(),
            description: None,
            banner_image: None,
            creator_email: "c@x.com".to_string(),
            price: dec!(10),
        };
        let inserted = store.insert_contest(&contest).await;
        assert!(inserted.is_ok());

        let hits = store.search_contests("design").await;
        assert!(matches!(&hits, Ok(found) if found.len() == 1));

        let misses = store.search_contests("music").await;
        assert!(matches!(&misses, Ok(found) if found.is_empty()));
    }
}
