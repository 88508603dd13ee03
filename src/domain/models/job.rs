use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

pub const MAX_SEND_ATTEMPTS: i32 = 3;

/// A queued post-commit SMS confirmation. Enqueued inside the booking
/// transaction, dispatched by the background worker with its own
/// retry/backoff policy, never affecting the booking result.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct NotificationJob {
    pub id: String,
    pub reservation_id: String,
    pub execute_at: DateTime<Utc>,
    pub attempts: i32,
    pub status: String,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NotificationJob {
    pub fn new(reservation_id: String, execute_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            reservation_id,
            execute_at,
            attempts: 0,
            status: "PENDING".to_string(),
            error_message: None,
            created_at: Utc::now(),
        }
    }
}
