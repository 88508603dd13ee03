use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
pub struct CreateSlotRequest {
    pub counseling_date: String,
    pub start_time: String,
    pub duration_minutes: i32,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateSlotStatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct CreateReservationRequest {
    pub slot_id: String,
    pub student_name: String,
    pub contact_phone: String,
    pub academic_record: Option<String>,
    pub target_university: Option<String>,
    pub question: Option<String>,
    pub additional_answers: Option<Value>,
}

#[derive(Deserialize)]
pub struct UpdateReservationRequest {
    pub status: Option<String>,
    pub memo: Option<String>,
}

#[derive(Deserialize)]
pub struct RangeQuery {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Deserialize)]
pub struct MonthQuery {
    pub year: i32,
    pub month: u32,
}
