//! PostgreSQL implementation of the [`ContestStore`] port.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::{ContestStore, NewContest};
use crate::config::ServerConfig;
use crate::domain::{Contest, ContestDraft, Order, Submission, User};
use crate::error::ApiError;

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store around an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to the configured database and runs pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] if the connection or a migration
    /// fails.
    pub async fn connect(config: &ServerConfig) -> Result<Self, ApiError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(std::time::Duration::from_secs(
                config.database_connect_timeout_secs,
            ))
            .connect(&config.database_url)
            .await
            .map_err(|e| ApiError::Persistence(e.to_string()))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| ApiError::Persistence(e.to_string()))?;

        Ok(Self::new(pool))
    }
}

const CONTEST_COLUMNS: &str = "id, name, contest_type, description, banner_image, \
     creator_email, price, participants, created_at";

const ORDER_COLUMNS: &str = "id, contest_id, transaction_id, customer_email, status, \
     name, contest_type, quantity, price, image, created_at";

#[async_trait]
impl ContestStore for PostgresStore {
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        sqlx::query_as::<_, User>(
            "SELECT email, name, photo_url, role, created_at, last_logged_in \
             FROM users ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))
    }

    async fn upsert_user(
        &self,
        email: &str,
        name: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<User, ApiError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, name, photo_url) VALUES ($1, $2, $3) \
             ON CONFLICT (email) DO UPDATE SET last_logged_in = now() \
             RETURNING email, name, photo_url, role, created_at, last_logged_in",
        )
        .bind(email)
        .bind(name)
        .bind(photo_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))
    }

    async fn get_user(&self, email: &str) -> Result<Option<User>, ApiError> {
        sqlx::query_as::<_, User>(
            "SELECT email, name, photo_url, role, created_at, last_logged_in \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))
    }

    async fn set_user_role(&self, email: &str, role: &str) -> Result<u64, ApiError> {
        let result = sqlx::query("UPDATE users SET role = $2 WHERE email = $1")
            .bind(email)
            .bind(role)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::Persistence(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn insert_contest(&self, contest: &NewContest) -> Result<Contest, ApiError> {
        sqlx::query_as::<_, Contest>(&format!(
            "INSERT INTO contests (id, name, contest_type, description, banner_image, \
             creator_email, price) VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {CONTEST_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&contest.name)
        .bind(&contest.contest_type)
        .bind(&contest.description)
        .bind(&contest.banner_image)
        .bind(&contest.creator_email)
        .bind(contest.price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))
    }

    async fn list_contests(&self) -> Result<Vec<Contest>, ApiError> {
        sqlx::query_as::<_, Contest>(&format!(
            "SELECT {CONTEST_COLUMNS} FROM contests ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))
    }

    async fn get_contest(&self, id: Uuid) -> Result<Option<Contest>, ApiError> {
        sqlx::query_as::<_, Contest>(&format!(
            "SELECT {CONTEST_COLUMNS} FROM contests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))
    }

    async fn contests_by_creator(&self, email: &str) -> Result<Vec<Contest>, ApiError> {
        sqlx::query_as::<_, Contest>(&format!(
            "SELECT {CONTEST_COLUMNS} FROM contests \
             WHERE creator_email = $1 ORDER BY created_at DESC"
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))
    }

    async fn search_contests(&self, fragment: &str) -> Result<Vec<Contest>, ApiError> {
        sqlx::query_as::<_, Contest>(&format!(
            "SELECT {CONTEST_COLUMNS} FROM contests \
             WHERE contest_type ILIKE '%' || $1 || '%' ORDER BY created_at DESC"
        ))
        .bind(fragment)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))
    }

    async fn append_participant(&self, contest_id: Uuid, email: &str) -> Result<u64, ApiError> {
        let result = sqlx::query(
            "UPDATE contests SET participants = array_append(participants, $2) WHERE id = $1",
        )
        .bind(contest_id)
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn insert_draft(&self, payload: serde_json::Value) -> Result<ContestDraft, ApiError> {
        sqlx::query_as::<_, ContestDraft>(
            "INSERT INTO contest_drafts (id, payload) VALUES ($1, $2) \
             RETURNING id, payload, status, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(payload)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))
    }

    async fn list_drafts(&self) -> Result<Vec<ContestDraft>, ApiError> {
        sqlx::query_as::<_, ContestDraft>(
            "SELECT id, payload, status, created_at FROM contest_drafts ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))
    }

    async fn get_draft(&self, id: Uuid) -> Result<Option<ContestDraft>, ApiError> {
        sqlx::query_as::<_, ContestDraft>(
            "SELECT id, payload, status, created_at FROM contest_drafts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))
    }

    async fn replace_draft_payload(
        &self,
        id: Uuid,
        payload: serde_json::Value,
    ) -> Result<u64, ApiError> {
        let result = sqlx::query("UPDATE contest_drafts SET payload = $2 WHERE id = $1")
            .bind(id)
            .bind(payload)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::Persistence(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn set_draft_status(&self, id: Uuid, status: &str) -> Result<u64, ApiError> {
        let result = sqlx::query("UPDATE contest_drafts SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::Persistence(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn delete_draft(&self, id: Uuid) -> Result<u64, ApiError> {
        let result = sqlx::query("DELETE FROM contest_drafts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::Persistence(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn insert_submission(
        &self,
        payload: serde_json::Value,
    ) -> Result<Submission, ApiError> {
        sqlx::query_as::<_, Submission>(
            "INSERT INTO submissions (id, payload) VALUES ($1, $2) \
             RETURNING id, payload, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(payload)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))
    }

    async fn list_submissions(&self) -> Result<Vec<Submission>, ApiError> {
        sqlx::query_as::<_, Submission>(
            "SELECT id, payload, created_at FROM submissions ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))
    }

    async fn get_submission(&self, id: Uuid) -> Result<Option<Submission>, ApiError> {
        sqlx::query_as::<_, Submission>(
            "SELECT id, payload, created_at FROM submissions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))
    }

    async fn insert_order(&self, order: &Order) -> Result<(), ApiError> {
        // Insert-or-fail on the transaction_id unique index. Losing one of
        // two racing reconciliations surfaces here as DuplicateOrder.
        let result = sqlx::query(&format!(
            "INSERT INTO orders ({ORDER_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             ON CONFLICT (transaction_id) DO NOTHING"
        ))
        .bind(order.id)
        .bind(order.contest_id)
        .bind(&order.transaction_id)
        .bind(&order.customer_email)
        .bind(&order.status)
        .bind(&order.name)
        .bind(&order.contest_type)
        .bind(order.quantity)
        .bind(order.price)
        .bind(&order.image)
        .bind(order.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::DuplicateOrder(order.transaction_id.clone()));
        }
        Ok(())
    }

    async fn find_order_by_transaction(
        &self,
        transaction_id: &str,
    ) -> Result<Option<Order>, ApiError> {
        sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE transaction_id = $1"
        ))
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))
    }
}
