//! Application models and payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Application entity: one row per (user, event)
///
/// Event snapshot fields (`event_title` through `end_date`) are copied
/// server-side from the event row at apply time, so listings and emails
/// survive later event edits.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub admin_id: Uuid,
    pub event_title: String,
    pub event_type: String,
    pub venue: String,
    pub city: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub street: String,
    pub state: String,
    pub postal_code: String,
    pub institution: String,
    pub role: String,
    pub skills: String,
    pub team_name: String,
    pub team_lead_name: String,
    pub members_count: i32,
    pub idea_description: String,
    pub created_at: DateTime<Utc>,
}

fn default_members_count() -> i32 {
    1
}

/// Registration form submitted with POST /event/apply/:eventId
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub team_lead_name: String,
    #[serde(default = "default_members_count")]
    pub members_count: i32,
    #[serde(default)]
    pub idea_description: String,
}

/// Application joined with applicant account details, for the admin view
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AdminApplication {
    pub id: Uuid,
    pub event_id: Uuid,
    pub event_title: String,
    pub event_type: String,
    pub venue: String,
    pub city: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub institution: String,
    pub role: String,
    pub skills: String,
    pub team_name: String,
    pub members_count: i32,
    pub created_at: DateTime<Utc>,
    /// Account username of the applicant
    pub username: String,
    /// Account email of the applicant
    pub user_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_request_minimal_body() {
        let body = serde_json::json!({
            "fullName": "Jane Doe",
            "email": "jane@example.com",
            "phoneNumber": "+49123456"
        });
        let request: ApplyRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.full_name, "Jane Doe");
        assert_eq!(request.members_count, 1);
        assert_eq!(request.team_name, "");
    }

    #[test]
    fn test_apply_request_rejects_missing_contact_fields() {
        let body = serde_json::json!({"fullName": "Jane Doe"});
        assert!(serde_json::from_value::<ApplyRequest>(body).is_err());
    }
}
