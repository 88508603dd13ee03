use crate::domain::models::{
    slot::CounselingSlot,
    reservation::CounselingReservation,
    job::NotificationJob,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

#[async_trait]
pub trait SlotRepository: Send + Sync {
    async fn create(&self, slot: &CounselingSlot) -> Result<CounselingSlot, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<CounselingSlot>, AppError>;
    /// Inclusive [start, end] range, ordered by date then start time.
    async fn list_by_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<CounselingSlot>, AppError>;
    async fn list_open_by_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<CounselingSlot>, AppError>;
    async fn update_status(&self, id: &str, status: &str) -> Result<CounselingSlot, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Atomically books the slot and records the confirmed reservation.
    /// The slot's open -> booked transition is a conditional update in the
    /// same transaction as the insert; zero rows affected means another
    /// request won the slot and the whole booking is rolled back with a
    /// Conflict. The notification job commits alongside the reservation.
    async fn create_confirmed(
        &self,
        reservation: &CounselingReservation,
        job: &NotificationJob,
    ) -> Result<CounselingReservation, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<CounselingReservation>, AppError>;
    async fn find_confirmed_by_slot(&self, slot_id: &str) -> Result<Option<CounselingReservation>, AppError>;
    /// Inclusive range over the referenced slot's date, ordered by slot
    /// date then start time.
    async fn list_by_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<CounselingReservation>, AppError>;
    async fn update(&self, reservation: &CounselingReservation) -> Result<CounselingReservation, AppError>;
}

#[async_trait]
pub trait NotificationJobRepository: Send + Sync {
    /// Claims up to `limit` due jobs by flipping them to PROCESSING in a
    /// single statement, so concurrent workers never pick up the same job.
    async fn claim_pending(&self, limit: i32) -> Result<Vec<NotificationJob>, AppError>;
    async fn mark_sent(&self, id: &str) -> Result<(), AppError>;
    async fn mark_failed(&self, id: &str, error_message: String) -> Result<(), AppError>;
    async fn reschedule(&self, id: &str, attempts: i32, execute_at: DateTime<Utc>, error_message: String) -> Result<(), AppError>;
    async fn find_by_reservation(&self, reservation_id: &str) -> Result<Vec<NotificationJob>, AppError>;
}

#[async_trait]
pub trait SmsService: Send + Sync {
    async fn send(&self, phone_number: &str, message: &str) -> Result<(), AppError>;
}
