//! Event models and payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::capacity::remaining_slots;

/// Event entity
///
/// `slots_total` is the advertised capacity; remaining slots are derived
/// per read and never appear on the row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub event_type: String,
    pub organisation: String,
    pub venue: String,
    pub city: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub slots_total: i32,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for POST /events and PUT /events/:id (full-field update)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub organisation: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub city: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub slots_total: i32,
}

/// Event projection returned to clients, with the derived remaining slots
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub event_type: String,
    pub organisation: String,
    pub venue: String,
    pub city: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub slots_total: i32,
    /// Remaining slots: capacity minus the live application count
    pub slots: i64,
    pub created_by: Uuid,
}

impl EventResponse {
    /// Build the wire projection from an event row and its live count
    pub fn from_parts(event: Event, applied_count: i64) -> Self {
        let slots = remaining_slots(event.slots_total, applied_count);
        EventResponse {
            id: event.id,
            title: event.title,
            description: event.description,
            event_type: event.event_type,
            organisation: event.organisation,
            venue: event.venue,
            city: event.city,
            start_date: event.start_date,
            end_date: event.end_date,
            slots_total: event.slots_total,
            slots,
            created_by: event.created_by,
        }
    }
}
