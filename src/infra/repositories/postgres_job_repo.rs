use crate::domain::{models::job::NotificationJob, ports::NotificationJobRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;
use chrono::{DateTime, Utc};

pub struct PostgresJobRepo {
    pool: PgPool,
}

impl PostgresJobRepo {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[async_trait]
impl NotificationJobRepository for PostgresJobRepo {
    async fn claim_pending(&self, limit: i32) -> Result<Vec<NotificationJob>, AppError> {
        let now = Utc::now();
        let jobs = sqlx::query_as::<_, NotificationJob>(
            r#"
            UPDATE notification_jobs
            SET status = 'PROCESSING'
            WHERE id IN (
                SELECT id
                FROM notification_jobs
                WHERE status = 'PENDING' AND execute_at <= $1
                ORDER BY execute_at ASC
                LIMIT $2
                FOR UPDATE SKIP LOCKED
            )
            RETURNING *
            "#
        )
            .bind(now)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(jobs)
    }

    async fn mark_sent(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE notification_jobs SET status = 'SENT', error_message = NULL WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn mark_failed(&self, id: &str, error_message: String) -> Result<(), AppError> {
        sqlx::query("UPDATE notification_jobs SET status = 'FAILED', error_message = $1 WHERE id = $2")
            .bind(error_message)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn reschedule(&self, id: &str, attempts: i32, execute_at: DateTime<Utc>, error_message: String) -> Result<(), AppError> {
        sqlx::query("UPDATE notification_jobs SET status = 'PENDING', attempts = $1, execute_at = $2, error_message = $3 WHERE id = $4")
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
            "SELECT * FROM notification_jobs WHERE reservation_id = $1 ORDER BY created_at ASC"
        )
            .bind(reservation_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
