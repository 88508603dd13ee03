use std::sync::Arc;
use std::time::Duration;
use chrono::Datelike;
use tokio::time::sleep;
use tracing::{error, info, info_span, Instrument};
use crate::domain::models::job::{NotificationJob, MAX_SEND_ATTEMPTS};
use crate::error::AppError;
use crate::state::AppState;

const POLL_INTERVAL_SECS: u64 = 5;
const RETRY_BACKOFF_SECS: i64 = 60;

/// Polls the notification queue and dispatches confirmation SMS after
/// the booking transaction has committed. A failed send is retried with
/// linear backoff up to MAX_SEND_ATTEMPTS; exhausted jobs are marked
/// FAILED with the last error recorded. Nothing here ever reaches a
/// request handler.
pub async fn start_notification_worker(state: Arc<AppState>) {
    info!("Starting notification worker...");

    loop {
        match state.job_repo.claim_pending(10).await {
            Ok(jobs) => {
                for job in jobs {
                    let span = info_span!(
                        "notification_job",
                        job_id = %job.id,
                        reservation_id = %job.reservation_id,
                        attempt = job.attempts + 1
                    );

                    let state = state.clone();

                    async move {
                        match process_job(&state, &job).await {
                            Ok(_) => {
                                info!("Confirmation SMS sent");
                                if let Err(e) = state.job_repo.mark_sent(&job.id).await {
                                    error!("Failed to mark job as sent: {:?}", e);
                                }
                            }
                            Err(e) => {
                                let err_msg = format!("{}", e);
                                let attempts = job.attempts + 1;
                                if attempts < MAX_SEND_ATTEMPTS {
                                    let next_at = state.clock.now()
                                        + chrono::Duration::seconds(RETRY_BACKOFF_SECS * attempts as i64);
                                    error!("Send failed, retrying at {}: {}", next_at, err_msg);
                                    if let Err(up_err) = state.job_repo.reschedule(&job.id, attempts, next_at, err_msg).await {
                                        error!("Failed to reschedule job: {:?}", up_err);
                                    }
                                } else {
                                    error!("Send failed permanently after {} attempts: {}", attempts, err_msg);
                                    if let Err(up_err) = state.job_repo.mark_failed(&job.id, err_msg).await {
                                        error!("Failed to mark job as failed: {:?}", up_err);
                                    }
                                }
                            }
                        }
                    }
                        .instrument(span)
                        .await;
                }
            }
            Err(e) => error!("Failed to claim pending jobs: {:?}", e),
        }
        sleep(Duration::from_secs(POLL_INTERVAL_SECS)).await;
    }
}

async fn process_job(state: &Arc<AppState>, job: &NotificationJob) -> Result<(), AppError> {
    let reservation = state.reservation_repo.find_by_id(&job.reservation_id).await?
        .ok_or(AppError::NotFound(format!("Reservation {} not found", job.reservation_id)))?;
    let slot = state.slot_repo.find_by_id(&reservation.slot_id).await?
        .ok_or(AppError::NotFound(format!("Slot {} not found", reservation.slot_id)))?;

    let message = format!(
        "[상담예약] {}님, {}월 {}일 {} 상담 예약이 확정되었습니다.",
        reservation.student_name,
        slot.counseling_date.month(),
        slot.counseling_date.day(),
        slot.start_time.format("%H:%M"),
    );

    state.sms_service.send(&reservation.contact_phone, &message).await
}
