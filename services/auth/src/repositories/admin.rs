//! Admin repository for database operations

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::Admin;
use crate::repositories::{hash_password, is_unique_violation, verify_hash};

/// Admin repository
#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    /// Create a new admin repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a new admin with a hashed password
    ///
    /// Returns `Ok(None)` when the email is already registered.
    pub async fn create(&self, email: &str, password: &str) -> Result<Option<Admin>> {
        info!("Registering new admin: {}", email);

        let password_hash = hash_password(password)?;

        let result = sqlx::query_as::<_, Admin>(
            r#"
            INSERT INTO admins (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(admin) => Ok(Some(admin)),
            Err(e) if is_unique_violation(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Find an admin by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(
            r#"
            SELECT id, email, password_hash, created_at, updated_at
            FROM admins
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    /// Find an admin by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(
            r#"
            SELECT id, email, password_hash, created_at, updated_at
            FROM admins
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    /// Verify an admin's password
    pub async fn verify_password(&self, admin: &Admin, password: &str) -> Result<bool> {
        verify_hash(password, &admin.password_hash)
    }
}
