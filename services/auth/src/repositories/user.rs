//! User repository for database operations
//!
//! The OTP operations are single conditional statements on purpose: the
//! challenge is issued, checked and consumed without a read-then-write
//! window, so concurrent requests cannot reuse a stale code.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rand::Rng;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::{NewUser, User};
use crate::repositories::{hash_password, is_unique_violation, verify_hash};

/// Generate a six-digit one-time code, uniform over [100000, 999999]
///
/// The code is handled as a string from birth; it is compared with string
/// equality and never parsed back into an integer.
pub fn generate_otp() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user with a hashed password
    ///
    /// Returns `Ok(None)` when the email is already registered; the unique
    /// constraint on `users.email` is the authority, not a prior lookup.
    pub async fn create(&self, new_user: &NewUser) -> Result<Option<User>> {
        info!("Creating new user: {}", new_user.username);

        let password_hash = hash_password(&new_user.password)?;

        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, profile_image,
                      otp, otp_expires_at, created_at, updated_at
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(Some(user)),
            Err(e) if is_unique_violation(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Find a user by email (exact, case-sensitive as stored)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, profile_image,
                   otp, otp_expires_at, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, profile_image,
                   otp, otp_expires_at, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Verify a user's password
    pub async fn verify_password(&self, user: &User, password: &str) -> Result<bool> {
        verify_hash(password, &user.password_hash)
    }

    /// Persist a reset challenge on the user row, overwriting any prior one
    ///
    /// Returns false when no user matches the email.
    pub async fn issue_otp(
        &self,
        email: &str,
        otp: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET otp = $2, otp_expires_at = $3, updated_at = now()
            WHERE email = $1
            "#,
        )
        .bind(email)
        .bind(otp)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Check a reset challenge without consuming it
    ///
    /// True only for a matching email, a matching code, and an unexpired
    /// challenge; one query, so a wrong code and an expired one are
    /// indistinguishable to the caller.
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<bool> {
        let row = sqlx::query(
            r#"
            SELECT 1 AS matched
            FROM users
            WHERE email = $1 AND otp = $2 AND otp_expires_at > now()
            "#,
        )
        .bind(email)
        .bind(otp)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }

    /// Replace the password and consume the challenge in one statement
    ///
    /// The UPDATE re-validates the code and expiry itself; zero affected
    /// rows means wrong code, expired code, or no such user, and the
    /// password is untouched. On success both OTP columns are cleared
    /// atomically with the hash replacement.
    pub async fn reset_password(&self, email: &str, otp: &str, new_password: &str) -> Result<bool> {
        let password_hash = hash_password(new_password)?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $3, otp = NULL, otp_expires_at = NULL, updated_at = now()
            WHERE email = $1 AND otp = $2 AND otp_expires_at > now()
            "#,
        )
        .bind(email)
        .bind(otp)
        .bind(&password_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
