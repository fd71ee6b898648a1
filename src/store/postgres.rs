//! PostgreSQL store backend using `sqlx::PgPool`.
//!
//! Atomicity of the interest toggle is delegated to the database:
//! `INSERT .. ON CONFLICT DO NOTHING` makes check-and-insert a single
//! statement, and the `(user_id, event_id)` primary key enforces the
//! set invariant of the relation.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::collections::HashSet;
use std::time::Duration;

use super::EventStore;
use crate::domain::{Event, EventDraft, EventId, EventPatch};
use crate::error::CatalogError;

/// One event row in column order.
type EventRow = (
    i64,
    String,
    Option<String>,
    NaiveDate,
    String,
    String,
    String,
    String,
    i64,
);

const EVENT_COLUMNS: &str =
    "id, title, description, date, time, location, category, banner_url, creator_id";

fn event_from_row(row: EventRow) -> Event {
    let (id, title, description, date, time, location, category, banner_url, creator_id) = row;
    Event {
        id: EventId::new(id),
        title,
        description,
        date,
        time,
        location,
        category,
        banner_url,
        creator_id,
    }
}

fn store_err(err: sqlx::Error) -> CatalogError {
    CatalogError::Store(err.to_string())
}

/// Durable store backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connects to the database and applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] when the connection cannot be
    /// established or a migration fails.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        connect_timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(connect_timeout)
            .connect(database_url)
            .await
            .map_err(store_err)?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| CatalogError::Store(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Wraps an existing connection pool (used by integration harnesses).
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for PostgresStore {
    async fn create_event(
        &self,
        draft: EventDraft,
        creator_id: i64,
    ) -> Result<Event, CatalogError> {
        let row = sqlx::query_as::<_, EventRow>(
            "INSERT INTO events (title, description, date, time, location, category, banner_url, creator_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id, title, description, date, time, location, category, banner_url, creator_id",
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.date)
        .bind(&draft.time)
        .bind(&draft.location)
        .bind(&draft.category)
        .bind(&draft.banner_url)
        .bind(creator_id)
        .fetch_one(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(event_from_row(row))
    }

    async fn event(&self, id: EventId) -> Result<Option<Event>, CatalogError> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(row.map(event_from_row))
    }

    async fn update_event(&self, id: EventId, patch: &EventPatch) -> Result<Event, CatalogError> {
        // Read-modify-write under a row lock so concurrent partial updates
        // do not clobber each other's untouched fields.
        let mut tx = self.pool.begin().await.map_err(store_err)?;

        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1 FOR UPDATE"
        ))
        .bind(id.get())
        .fetch_optional(&mut *tx)
        .await
        .map_err(store_err)?;

        let mut event = row.map(event_from_row).ok_or(CatalogError::EventNotFound(id))?;
        patch.apply_to(&mut event);

        sqlx::query(
            "UPDATE events SET title = $1, description = $2, date = $3, time = $4, \
             location = $5, category = $6, banner_url = $7 WHERE id = $8",
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date)
        .bind(&event.time)
        .bind(&event.location)
        .bind(&event.category)
        .bind(&event.banner_url)
        .bind(id.get())
        .execute(&mut *tx)
        .await
        .map_err(store_err)?;

        tx.commit().await.map_err(store_err)?;
        Ok(event)
    }

    async fn delete_event(&self, id: EventId) -> Result<(), CatalogError> {
        // Interest edges go with the event via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(store_err)?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::EventNotFound(id));
        }
        Ok(())
    }

    async fn count_events(&self) -> Result<u64, CatalogError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(count.max(0) as u64)
    }

    async fn list_events(&self, offset: u64, limit: u64) -> Result<Vec<Event>, CatalogError> {
        // Saturated window values must not wrap into negative SQL binds.
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY date ASC, id ASC LIMIT $1 OFFSET $2"
        ))
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .bind(i64::try_from(offset).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(rows.into_iter().map(event_from_row).collect())
    }

    async fn add_interest(&self, user_id: i64, event_id: EventId) -> Result<bool, CatalogError> {
        let result = sqlx::query(
            "INSERT INTO event_interests (user_id, event_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(event_id.get())
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(result.rows_affected() == 1)
    }

    async fn remove_interest(&self, user_id: i64, event_id: EventId) -> Result<bool, CatalogError> {
        let result =
            sqlx::query("DELETE FROM event_interests WHERE user_id = $1 AND event_id = $2")
                .bind(user_id)
                .bind(event_id.get())
                .execute(&self.pool)
                .await
                .map_err(store_err)?;

        Ok(result.rows_affected() == 1)
    }

    async fn is_interested(&self, user_id: i64, event_id: EventId) -> Result<bool, CatalogError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM event_interests WHERE user_id = $1 AND event_id = $2)",
        )
        .bind(user_id)
        .bind(event_id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(exists)
    }

    async fn interested_among(
        &self,
        user_id: i64,
        event_ids: &[EventId],
    ) -> Result<HashSet<EventId>, CatalogError> {
        let ids: Vec<i64> = event_ids.iter().map(|id| id.get()).collect();
        let rows = sqlx::query_scalar::<_, i64>(
            "SELECT event_id FROM event_interests WHERE user_id = $1 AND event_id = ANY($2)",
        )
        .bind(user_id)
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(rows.into_iter().map(EventId::new).collect())
    }

    async fn interest_count(&self, event_id: EventId) -> Result<u64, CatalogError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM event_interests WHERE event_id = $1",
        )
        .bind(event_id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(count.max(0) as u64)
    }

    async fn events_interested_by(&self, user_id: i64) -> Result<Vec<Event>, CatalogError> {
        let rows = sqlx::query_as::<_, EventRow>(
            "SELECT e.id, e.title, e.description, e.date, e.time, e.location, e.category, \
             e.banner_url, e.creator_id FROM events e \
             JOIN event_interests i ON i.event_id = e.id \
             WHERE i.user_id = $1 ORDER BY e.date ASC, e.id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(rows.into_iter().map(event_from_row).collect())
    }

    async fn health_check(&self) -> Result<(), CatalogError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    fn is_durable(&self) -> bool {
        true
    }
}
