//! Saved-event repository for database operations

use anyhow::Result;
use sqlx::{FromRow, PgPool, Row};
use uuid::Uuid;

use crate::models::Event;
use crate::repositories::event::EventWithCount;

/// Saved-event repository
#[derive(Clone)]
pub struct SavedEventRepository {
    pool: PgPool,
}

impl SavedEventRepository {
    /// Create a new saved-event repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert a saved mark for (user, event)
    ///
    /// Returns `Ok(false)` when the event does not exist (FK violation);
    /// un-saving flips the flag rather than deleting the row.
    pub async fn set(&self, user_id: Uuid, event_id: Uuid, saved: bool) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO saved_events (user_id, event_id, saved)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, event_id)
            DO UPDATE SET saved = EXCLUDED.saved, updated_at = now()
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .bind(saved)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(true),
            Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23503") => {
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Events the user currently has saved, each with its live
    /// application count
    pub async fn list_saved_with_counts(&self, user_id: Uuid) -> Result<Vec<EventWithCount>> {
        let rows = sqlx::query(
            r#"
            SELECT e.*, COUNT(a.id) AS applied_count
            FROM saved_events s
            JOIN events e ON e.id = s.event_id
            LEFT JOIN applications a ON a.event_id = e.id
            WHERE s.user_id = $1 AND s.saved = TRUE
            GROUP BY e.id, s.updated_at
            ORDER BY s.updated_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let event = Event::from_row(row)?;
                let applied_count: i64 = row.try_get("applied_count")?;
                Ok((event, applied_count))
            })
            .collect()
    }

    /// Whether the user currently has the event saved
    pub async fn is_saved(&self, user_id: Uuid, event_id: Uuid) -> Result<bool> {
        let row = sqlx::query(
            r#"
            SELECT saved FROM saved_events WHERE user_id = $1 AND event_id = $2
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.get::<bool, _>("saved")).unwrap_or(false))
    }
}
