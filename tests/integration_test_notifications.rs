mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{TestApp, ADMIN_TOKEN};
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn job_statuses(app: &TestApp) -> Vec<String> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT status FROM notification_jobs")
        .fetch_all(&app.pool)
        .await
        .unwrap();
    rows.into_iter().map(|(s,)| s).collect()
}

#[tokio::test]
async fn test_booking_enqueues_and_dispatches_confirmation_sms() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/admin/slots")
            .header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_TOKEN))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "counseling_date": "2025-03-10", "start_time": "14:00", "duration_minutes": 30
            }).to_string())).unwrap()
    ).await.unwrap();
    let slot_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/counseling/reservations")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "slot_id": slot_id, "student_name": "김민준", "contact_phone": "010-1234-5678"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // The job commits with the booking.
    let statuses = job_statuses(&app).await;
    assert_eq!(statuses.len(), 1);

    // The worker polls every 5s; give it time to claim and dispatch.
    let mut sent = false;
    for _ in 0..30 {
        if job_statuses(&app).await == vec!["SENT".to_string()] {
            sent = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
    assert!(sent, "notification job never reached SENT");

    let messages = app.sent_sms.lock().unwrap().clone();
    assert_eq!(messages.len(), 1);
    let (phone, message) = &messages[0];
    assert_eq!(phone, "01012345678");
    assert!(message.contains("김민준"), "message was {}", message);
    assert!(message.contains("3월 10일"), "message was {}", message);
    assert!(message.contains("14:00"), "message was {}", message);
}

#[tokio::test]
async fn test_rejected_booking_enqueues_nothing() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/counseling/reservations")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "slot_id": "no-such-slot", "student_name": "김민준", "contact_phone": "010-1234-5678"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    assert!(job_statuses(&app).await.is_empty());
}
