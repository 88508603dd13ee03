use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;

pub const SLOT_OPEN: &str = "open";
pub const SLOT_BOOKED: &str = "booked";
pub const SLOT_CLOSED: &str = "closed";

/// A bookable counseling time window with a capacity of exactly one
/// confirmed reservation. Created `open`, transitions to `booked` once
/// via the booking flow, and only returns to `open` by manual reset.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct CounselingSlot {
    pub id: String,
    pub counseling_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewSlotParams {
    pub counseling_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
    pub notes: Option<String>,
}

impl CounselingSlot {
    pub fn new(params: NewSlotParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            counseling_date: params.counseling_date,
            start_time: params.start_time,
            duration_minutes: params.duration_minutes,
            status: SLOT_OPEN.to_string(),
            notes: params.notes,
            created_at: Utc::now(),
        }
    }
}
