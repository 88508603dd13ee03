use crate::domain::{models::slot::CounselingSlot, ports::SlotRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;
use chrono::NaiveDate;

pub struct PostgresSlotRepo {
    pool: PgPool,
}

impl PostgresSlotRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotRepository for PostgresSlotRepo {
    async fn create(&self, slot: &CounselingSlot) -> Result<CounselingSlot, AppError> {
        sqlx::query_as::<_, CounselingSlot>(
            "INSERT INTO counseling_slots (id, counseling_date, start_time, duration_minutes, status, notes, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *"
        )
            .bind(&slot.id).bind(slot.counseling_date).bind(slot.start_time)
            .bind(slot.duration_minutes).bind(&slot.status).bind(&slot.notes).bind(slot.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<CounselingSlot>, AppError> {
        sqlx::query_as::<_, CounselingSlot>("SELECT * FROM counseling_slots WHERE id = $1")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<CounselingSlot>, AppError> {
        sqlx::query_as::<_, CounselingSlot>(
            "SELECT * FROM counseling_slots WHERE counseling_date >= $1 AND counseling_date <= $2 ORDER BY counseling_date ASC, start_time ASC"
        )
            .bind(start).bind(end).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_open_by_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<CounselingSlot>, AppError> {
        sqlx::query_as::<_, CounselingSlot>(
            "SELECT * FROM counseling_slots WHERE status = 'open' AND counseling_date >= $1 AND counseling_date <= $2 ORDER BY counseling_date ASC, start_time ASC"
        )
            .bind(start).bind(end).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update_status(&self, id: &str, status: &str) -> Result<CounselingSlot, AppError> {
        sqlx::query_as::<_, CounselingSlot>(
            "UPDATE counseling_slots SET status = $1 WHERE id = $2 RETURNING *"
        )
            .bind(status).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Slot not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM counseling_slots WHERE id = $1")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Slot not found".into()));
        }
        Ok(())
    }
}
