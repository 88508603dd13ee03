use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const RESERVATION_CONFIRMED: &str = "confirmed";
pub const RESERVATION_CANCELLED: &str = "cancelled";

/// A claim against a counseling slot submitted from the public form.
/// Many reservations may reference one slot historically (after
/// cancellation and rebooking), but at most one may be `confirmed`
/// per slot at any time.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct CounselingReservation {
    pub id: String,
    pub slot_id: String,
    pub student_name: String,
    pub contact_phone: String,
    pub academic_record: Option<String>,
    pub target_university: Option<String>,
    pub question: Option<String>,
    pub additional_answers: Option<String>,
    pub status: String,
    pub memo: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewReservationParams {
    pub slot_id: String,
    pub student_name: String,
    pub contact_phone: String,
    pub academic_record: Option<String>,
    pub target_university: Option<String>,
    pub question: Option<String>,
    pub additional_answers: Option<String>,
}

impl CounselingReservation {
    pub fn new(params: NewReservationParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            slot_id: params.slot_id,
            student_name: params.student_name,
            contact_phone: params.contact_phone,
            academic_record: params.academic_record,
            target_university: params.target_university,
            question: params.question,
            additional_answers: params.additional_answers,
            status: RESERVATION_CONFIRMED.to_string(),
            memo: None,
            created_at: Utc::now(),
        }
    }
}
