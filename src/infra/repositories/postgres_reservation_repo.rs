use crate::domain::{
    models::{reservation::CounselingReservation, job::NotificationJob},
    ports::ReservationRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;
use chrono::NaiveDate;

pub struct PostgresReservationRepo {
    pool: PgPool,
}

impl PostgresReservationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationRepository for PostgresReservationRepo {
    async fn create_confirmed(
        &self,
        reservation: &CounselingReservation,
        job: &NotificationJob,
    ) -> Result<CounselingReservation, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Conditional open -> booked transition; zero rows affected means
        // another request already took the slot and the tx rolls back.
        let booked = sqlx::query("UPDATE counseling_slots SET status = 'booked' WHERE id = $1 AND status = 'open'")
            .bind(&reservation.slot_id)
            .execute(&mut *tx).await.map_err(AppError::Database)?;
        if booked.rows_affected() == 0 {
            return Err(AppError::Conflict("Slot is no longer available".into()));
        }

        let created = sqlx::query_as::<_, CounselingReservation>(
            "INSERT INTO counseling_reservations (id, slot_id, student_name, contact_phone, academic_record, target_university, question, additional_answers, status, memo, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING *"
        )
            .bind(&reservation.id).bind(&reservation.slot_id).bind(&reservation.student_name)
            .bind(&reservation.contact_phone).bind(&reservation.academic_record)
            .bind(&reservation.target_university).bind(&reservation.question)
            .bind(&reservation.additional_answers).bind(&reservation.status)
            .bind(&reservation.memo).bind(reservation.created_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        sqlx::query(
            "INSERT INTO notification_jobs (id, reservation_id, execute_at, attempts, status, error_message, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7)"
        )
            .bind(&job.id).bind(&job.reservation_id).bind(job.execute_at)
            .bind(job.attempts).bind(&job.status).bind(&job.error_message).bind(job.created_at)
            .execute(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<CounselingReservation>, AppError> {
        sqlx::query_as::<_, CounselingReservation>("SELECT * FROM counseling_reservations WHERE id = $1")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_confirmed_by_slot(&self, slot_id: &str) -> Result<Option<CounselingReservation>, AppError> {
        sqlx::query_as::<_, CounselingReservation>(
            "SELECT * FROM counseling_reservations WHERE slot_id = $1 AND status = 'confirmed'"
        )
            .bind(slot_id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<CounselingReservation>, AppError> {
        sqlx::query_as::<_, CounselingReservation>(
            "SELECT r.* FROM counseling_reservations r
             JOIN counseling_slots s ON s.id = r.slot_id
             WHERE s.counseling_date >= $1 AND s.counseling_date <= $2
             ORDER BY s.counseling_date ASC, s.start_time ASC, r.created_at ASC"
        )
            .bind(start).bind(end).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, reservation: &CounselingReservation) -> Result<CounselingReservation, AppError> {
        sqlx::query_as::<_, CounselingReservation>(
            "UPDATE counseling_reservations SET status = $1, memo = $2 WHERE id = $3 RETURNING *"
        )
            .bind(&reservation.status).bind(&reservation.memo).bind(&reservation.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Reservation not found".into()))
    }
}
