use serde::Serialize;
use chrono::NaiveDate;
use crate::domain::models::slot::CounselingSlot;

#[derive(Serialize)]
pub struct WeekNavigation {
    pub label: String,
    pub param: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub previous: String,
    pub next: String,
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub week: WeekNavigation,
    pub slots: Vec<CounselingSlot>,
}
