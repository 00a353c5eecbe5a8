//! Saved-event payloads

use serde::Deserialize;
use uuid::Uuid;

/// Request body for POST /user/saved
///
/// `save: false` un-saves: the mark row stays and its flag flips, which
/// keeps the operation a plain upsert.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveEventRequest {
    pub event_id: Uuid,
    pub save: bool,
}
