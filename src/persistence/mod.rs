//! Persistence layer: the [`ContestStore`] port and its implementations.
//!
//! [`postgres::PostgresStore`] is the production store backed by
//! `sqlx::PgPool`; [`memory::MemoryStore`] is a lock-guarded in-memory
//! implementation used by tests. Both enforce the one-order-per-
//! transaction invariant with insert-or-fail semantics, so duplicate
//! reconciliation attempts are rejected at the storage layer rather than
//! by an in-process lock.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Contest, ContestDraft, Order, Submission, User};
use crate::error::ApiError;

/// Fields accepted when publishing a new contest.
#[derive(Debug, Clone)]
pub struct NewContest {
    /// Contest name.
    pub name: String,
    /// Contest category.
    pub contest_type: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Banner image URL.
    pub banner_image: Option<String>,
    /// Email of the contest creator.
    pub creator_email: String,
    /// Entry price in major units.
    pub price: rust_decimal::Decimal,
}

/// Storage port for every collection the API reads and writes.
///
/// All methods map storage failures to [`ApiError::Persistence`];
/// "row absent" is expressed as `Ok(None)` or a zero row count, never as
/// an error, so handlers decide what absence means.
#[async_trait]
pub trait ContestStore: Send + Sync {
    // ── Users ───────────────────────────────────────────────────────────

    /// Lists all users.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;

    /// Upserts a user by email: inserts with role `"user"` and both
    /// timestamps set, or refreshes `last_logged_in` if the email exists.
    /// Atomic, so two concurrent logins cannot create duplicate users.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn upsert_user(
        &self,
        email: &str,
        name: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<User, ApiError>;

    /// Fetches a user by email.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn get_user(&self, email: &str) -> Result<Option<User>, ApiError>;

    /// Sets a user's role by email; returns the number of rows updated.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn set_user_role(&self, email: &str, role: &str) -> Result<u64, ApiError>;

    // ── Contests ────────────────────────────────────────────────────────

    /// Publishes a new contest with an empty participant list.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn insert_contest(&self, contest: &NewContest) -> Result<Contest, ApiError>;

    /// Lists all contests.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn list_contests(&self) -> Result<Vec<Contest>, ApiError>;

    /// Fetches a contest by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn get_contest(&self, id: Uuid) -> Result<Option<Contest>, ApiError>;

    /// Lists contests created by the given email.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn contests_by_creator(&self, email: &str) -> Result<Vec<Contest>, ApiError>;

    /// Case-insensitive substring search against contest type.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn search_contests(&self, fragment: &str) -> Result<Vec<Contest>, ApiError>;

    /// Appends an email to a contest's participant list (no dedup);
    /// returns the number of contests updated.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn append_participant(&self, contest_id: Uuid, email: &str) -> Result<u64, ApiError>;

    // ── Contest drafts ──────────────────────────────────────────────────

    /// Stores a new draft with status `"pending"`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn insert_draft(&self, payload: serde_json::Value) -> Result<ContestDraft, ApiError>;

    /// Lists all drafts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn list_drafts(&self) -> Result<Vec<ContestDraft>, ApiError>;

    /// Fetches a draft by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn get_draft(&self, id: Uuid) -> Result<Option<ContestDraft>, ApiError>;

    /// Replaces a draft's payload wholesale; returns rows updated.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn replace_draft_payload(
        &self,
        id: Uuid,
        payload: serde_json::Value,
    ) -> Result<u64, ApiError>;

    /// Sets a draft's review status; returns rows updated.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn set_draft_status(&self, id: Uuid, status: &str) -> Result<u64, ApiError>;

    /// Deletes a draft; returns rows deleted.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn delete_draft(&self, id: Uuid) -> Result<u64, ApiError>;

    // ── Submissions ─────────────────────────────────────────────────────

    /// Stores a submission payload; the store assigns the id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn insert_submission(&self, payload: serde_json::Value)
    -> Result<Submission, ApiError>;

    /// Lists all submissions.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn list_submissions(&self) -> Result<Vec<Submission>, ApiError>;

    /// Fetches a submission by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn get_submission(&self, id: Uuid) -> Result<Option<Submission>, ApiError>;

    // ── Orders ──────────────────────────────────────────────────────────

    /// Inserts an order, failing if one already exists for the same
    /// transaction id. This is the atomic guard behind the
    /// one-order-per-payment invariant: two racing reconciliations for
    /// the same transaction id cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::DuplicateOrder`] if an order with this
    /// transaction id exists, or [`ApiError::Persistence`] on storage
    /// failure.
    async fn insert_order(&self, order: &Order) -> Result<(), ApiError>;

    /// Fetches an order by external transaction id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn find_order_by_transaction(
        &self,
        transaction_id: &str,
    ) -> Result<Option<Order>, ApiError>;
}
