//! Canonical note and notebook records.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A row of the `notes` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub id: String,
    pub parent_id: String,
    pub title: String,
    pub body: String,
    pub created_time: i64,
    pub updated_time: i64,
    pub user_created_time: i64,
    pub user_updated_time: i64,
    pub is_conflict: bool,
}

impl Note {
    /// Build a fresh note stamped with the current time.
    #[must_use]
    pub fn new(title: &str, body: &str, parent_id: &str) -> Self {
        let now = now_millis();
        Self {
            id: new_note_id(),
            parent_id: parent_id.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            created_time: now,
            updated_time: now,
            user_created_time: now,
            user_updated_time: now,
            is_conflict: false,
        }
    }

    /// A note with neither title nor body is treated as a removal request.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.body.is_empty()
    }

    /// Mark the note as modified now so the sync engine picks it up.
    pub fn touch(&mut self) {
        let now = now_millis();
        self.updated_time = now;
        self.user_updated_time = now;
    }
}

/// A row of the `folders` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Folder {
    pub id: String,
    pub parent_id: String,
    pub title: String,
}

/// Joplin timestamps are integer epoch milliseconds.
#[must_use]
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Joplin ids are uuid4 rendered as 32 lowercase hex characters.
#[must_use]
pub fn new_note_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Render a Joplin timestamp as `YYYY-MM-DD` (UTC).
#[must_use]
pub fn format_date(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
