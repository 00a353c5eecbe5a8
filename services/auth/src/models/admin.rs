//! Admin model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Admin entity; admins author events and see their applicants
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for POST /admin/register and POST /admin/login
#[derive(Debug, Clone, Deserialize)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

/// Admin projection returned to clients, without the password hash
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Admin> for AdminResponse {
    fn from(admin: &Admin) -> Self {
        AdminResponse {
            id: admin.id,
            email: admin.email.clone(),
            created_at: admin.created_at,
        }
    }
}
