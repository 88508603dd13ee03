use crate::domain::{models::job::NotificationJob, ports::NotificationJobRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use chrono::{DateTime, Utc};

pub struct SqliteJobRepo {
    pool: SqlitePool,
}

impl SqliteJobRepo {
    pub fn new(pool: SqlitePool) -> Self { Self { pool } }
}

#[async_trait]
impl NotificationJobRepository for SqliteJobRepo {
    async fn claim_pending(&self, limit: i32) -> Result<Vec<NotificationJob>, AppError> {
        let now = Utc::now();
        sqlx::query_as::<_, NotificationJob>(
            "UPDATE notification_jobs SET status = 'PROCESSING' WHERE id IN (SELECT id FROM notification_jobs WHERE status = 'PENDING' AND execute_at <= ? ORDER BY execute_at ASC LIMIT ?) RETURNING *"
        )
            .bind(now)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn mark_sent(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE notification_jobs SET status = 'SENT', error_message = NULL WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn mark_failed(&self, id: &str, error_message: String) -> Result<(), AppError> {
        sqlx::query("UPDATE notification_jobs SET status = 'FAILED', error_message = ? WHERE id = ?")
            .bind(error_message)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn reschedule(&self, id: &str, attempts: i32, execute_at: DateTime<Utc>, error_message: String) -> Result<(), AppError> {
        sqlx::query("UPDATE notification_jobs SET status = 'PENDING', attempts = ?, execute_at = ?, error_message = ? WHERE id = ?")
            .bind(attempts)
            .bind(execute_at)
            .bind(error_message)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn find_by_reservation(&self, reservation_id: &str) -> Result<Vec<NotificationJob>, AppError> {
        sqlx::query_as::<_, NotificationJob>(
            "SELECT * FROM notification_jobs WHERE reservation_id = ? ORDER BY created_at ASC"
        )
            .bind(reservation_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
