//! Event repository for database operations
//!
//! Listing and detail queries join the live application count in the same
//! statement; remaining slots are derived from that count on every read,
//! never cached.

use anyhow::Result;
use sqlx::{FromRow, PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use crate::models::{Event, EventPayload};

/// Event row together with its live application count
pub type EventWithCount = (Event, i64);

fn event_with_count(row: &PgRow) -> Result<EventWithCount> {
    let event = Event::from_row(row)?;
    let applied_count: i64 = row.try_get("applied_count")?;
    Ok((event, applied_count))
}

/// Event repository
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new event repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event owned by the given admin
    pub async fn create(&self, admin_id: Uuid, payload: &EventPayload) -> Result<Event> {
        info!("Creating event '{}' for admin {}", payload.title, admin_id);

        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, description, event_type, organisation, venue, city,
                                start_date, end_date, slots_total, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, title, description, event_type, organisation, venue, city,
                      start_date, end_date, slots_total, created_by, created_at, updated_at
            "#,
        )
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.event_type)
        .bind(&payload.organisation)
        .bind(&payload.venue)
        .bind(&payload.city)
        .bind(payload.start_date)
        .bind(payload.end_date)
        .bind(payload.slots_total)
        .bind(admin_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// All events, each with its live application count
    pub async fn list_with_counts(&self) -> Result<Vec<EventWithCount>> {
        let rows = sqlx::query(
            r#"
            SELECT e.*, COUNT(a.id) AS applied_count
            FROM events e
            LEFT JOIN applications a ON a.event_id = e.id
            GROUP BY e.id
            ORDER BY e.start_date ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(event_with_count).collect()
    }

    /// One event with its live application count
    pub async fn find_with_count(&self, id: Uuid) -> Result<Option<EventWithCount>> {
        let row = sqlx::query(
            r#"
            SELECT e.*, COUNT(a.id) AS applied_count
            FROM events e
            LEFT JOIN applications a ON a.event_id = e.id
            WHERE e.id = $1
            GROUP BY e.id
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(event_with_count).transpose()
    }

    /// One event row, without the count; used by the apply path which only
    /// needs the deadline and snapshot fields
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, event_type, organisation, venue, city,
                   start_date, end_date, slots_total, created_by, created_at, updated_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Events authored by an admin, each with its live application count
    pub async fn list_by_admin_with_counts(&self, admin_id: Uuid) -> Result<Vec<EventWithCount>> {
        let rows = sqlx::query(
            r#"
            SELECT e.*, COUNT(a.id) AS applied_count
            FROM events e
            LEFT JOIN applications a ON a.event_id = e.id
            WHERE e.created_by = $1
            GROUP BY e.id
            ORDER BY e.start_date ASC
            "#,
        )
        .bind(admin_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(event_with_count).collect()
    }

    /// Full-field update, restricted to the owning admin
    ///
    /// Returns `Ok(None)` when the event does not exist or belongs to a
    /// different admin; the two cases are deliberately not distinguished.
    pub async fn update(
        &self,
        id: Uuid,
        admin_id: Uuid,
        payload: &EventPayload,
    ) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = $3, description = $4, event_type = $5, organisation = $6,
                venue = $7, city = $8, start_date = $9, end_date = $10,
                slots_total = $11, updated_at = now()
            WHERE id = $1 AND created_by = $2
            RETURNING id, title, description, event_type, organisation, venue, city,
                      start_date, end_date, slots_total, created_by, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(admin_id)
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.event_type)
        .bind(&payload.organisation)
        .bind(&payload.venue)
        .bind(&payload.city)
        .bind(payload.start_date)
        .bind(payload.end_date)
        .bind(payload.slots_total)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Delete an event, restricted to the owning admin
    ///
    /// Applications and saved marks go with it via the FK cascades.
    pub async fn delete(&self, id: Uuid, admin_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1 AND created_by = $2")
            .bind(id)
            .bind(admin_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
