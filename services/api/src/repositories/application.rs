//! Application repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::models::{AdminApplication, Application, ApplyRequest, Event};

/// Application repository
#[derive(Clone)]
pub struct ApplicationRepository {
    pool: PgPool,
}

impl ApplicationRepository {
    /// Create a new application repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an application, snapshotting event fields from the event row
    ///
    /// Returns `Ok(None)` when the user already holds an application for
    /// this event. The `(user_id, event_id)` unique constraint is the
    /// arbiter, so two concurrent applies cannot both insert; the loser of
    /// the race simply gets no row back.
    pub async fn insert(
        &self,
        user_id: Uuid,
        event: &Event,
        form: &ApplyRequest,
    ) -> Result<Option<Uuid>> {
        info!("User {} applying for event {}", user_id, event.id);

        let row = sqlx::query(
            r#"
            INSERT INTO applications (user_id, event_id, admin_id,
                                      event_title, event_type, venue, city, start_date, end_date,
                                      full_name, email, phone_number, street, state, postal_code,
                                      institution, role, skills, team_name, team_lead_name,
                                      members_count, idea_description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                    $16, $17, $18, $19, $20, $21, $22)
            ON CONFLICT (user_id, event_id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(event.id)
        .bind(event.created_by)
        .bind(&event.title)
        .bind(&event.event_type)
        .bind(&event.venue)
        .bind(&event.city)
        .bind(event.start_date)
        .bind(event.end_date)
        .bind(&form.full_name)
        .bind(&form.email)
        .bind(&form.phone_number)
        .bind(&form.street)
        .bind(&form.state)
        .bind(&form.postal_code)
        .bind(&form.institution)
        .bind(&form.role)
        .bind(&form.skills)
        .bind(&form.team_name)
        .bind(&form.team_lead_name)
        .bind(form.members_count)
        .bind(&form.idea_description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.get("id")))
    }

    /// Find an application by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Application>> {
        let application = sqlx::query_as::<_, Application>(
            r#"
            SELECT * FROM applications WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(application)
    }

    /// Delete an application; ownership is checked by the caller
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// All applications submitted by a user, newest first
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Application>> {
        let applications = sqlx::query_as::<_, Application>(
            r#"
            SELECT * FROM applications
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(applications)
    }

    /// The user's application ID for an event, if any
    pub async fn find_for_user_event(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> Result<Option<Uuid>> {
        let row = sqlx::query(
            r#"
            SELECT id FROM applications WHERE user_id = $1 AND event_id = $2
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.get("id")))
    }

    /// Applications across every event owned by an admin, newest first,
    /// with the applicant's account details joined on
    pub async fn list_for_admin(&self, admin_id: Uuid) -> Result<Vec<AdminApplication>> {
        let applications = sqlx::query_as::<_, AdminApplication>(
            r#"
            SELECT a.id, a.event_id, a.event_title, a.event_type, a.venue, a.city,
                   a.start_date, a.end_date, a.full_name, a.email, a.phone_number,
                   a.institution, a.role, a.skills, a.team_name, a.members_count,
                   a.created_at, u.username, u.email AS user_email
            FROM applications a
            JOIN users u ON u.id = a.user_id
            WHERE a.admin_id = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(admin_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(applications)
    }
}
