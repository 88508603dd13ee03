mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{TestApp, ADMIN_TOKEN};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_slot(app: &TestApp, date: &str, time: &str) -> Value {
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/admin/slots")
            .header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_TOKEN))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "counseling_date": date, "start_time": time, "duration_minutes": 30
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await
}

#[tokio::test]
async fn test_create_slot_starts_open() {
    let app = TestApp::new().await;
    let slot = create_slot(&app, "2025-03-10", "14:00").await;

    assert_eq!(slot["status"], "open");
    assert_eq!(slot["counseling_date"], "2025-03-10");
    assert_eq!(slot["duration_minutes"], 30);
}

#[tokio::test]
async fn test_list_slots_is_ordered_by_date_then_time() {
    let app = TestApp::new().await;
    create_slot(&app, "2025-03-12", "10:00").await;
    create_slot(&app, "2025-03-10", "16:00").await;
    create_slot(&app, "2025-03-10", "09:00").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/admin/slots?start_date=2025-03-10&end_date=2025-03-16")
            .header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_TOKEN))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let slots = parse_body(res).await;
    let slots = slots.as_array().unwrap();
    assert_eq!(slots.len(), 3);
    assert_eq!(slots[0]["counseling_date"], "2025-03-10");
    assert_eq!(slots[0]["start_time"], "09:00:00");
    assert_eq!(slots[1]["start_time"], "16:00:00");
    assert_eq!(slots[2]["counseling_date"], "2025-03-12");
}

#[tokio::test]
async fn test_list_slots_range_is_inclusive() {
    let app = TestApp::new().await;
    create_slot(&app, "2025-03-09", "10:00").await;
    create_slot(&app, "2025-03-10", "10:00").await;
    create_slot(&app, "2025-03-16", "10:00").await;
    create_slot(&app, "2025-03-17", "10:00").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/admin/slots?start_date=2025-03-10&end_date=2025-03-16")
            .header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_TOKEN))
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    let slots = parse_body(res).await;
    let dates: Vec<&str> = slots.as_array().unwrap().iter()
        .map(|s| s["counseling_date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2025-03-10", "2025-03-16"]);
}

#[tokio::test]
async fn test_monthly_listing_covers_leap_february() {
    let app = TestApp::new().await;
    create_slot(&app, "2024-02-01", "10:00").await;
    create_slot(&app, "2024-02-29", "10:00").await;
    create_slot(&app, "2024-03-01", "10:00").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/admin/slots/monthly?year=2024&month=2")
            .header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_TOKEN))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let slots = parse_body(res).await;
    let dates: Vec<&str> = slots.as_array().unwrap().iter()
        .map(|s| s["counseling_date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-02-01", "2024-02-29"]);

    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/admin/slots/monthly?year=2024&month=13")
            .header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_TOKEN))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_range_rejected() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/admin/slots?start_date=2025-03-16&end_date=2025-03-10")
            .header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_TOKEN))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/admin/slots?start_date=banana&end_date=2025-03-10")
            .header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_TOKEN))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_close_and_manually_reopen_slot() {
    let app = TestApp::new().await;
    let slot = create_slot(&app, "2025-03-10", "14:00").await;
    let slot_id = slot["id"].as_str().unwrap();

    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/admin/slots/{}/status", slot_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_TOKEN))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"status": "closed"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["status"], "closed");

    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/admin/slots/{}/status", slot_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_TOKEN))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"status": "open"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["status"], "open");
}

#[tokio::test]
async fn test_booked_is_not_a_manager_transition() {
    let app = TestApp::new().await;
    let slot = create_slot(&app, "2025-03-10", "14:00").await;
    let slot_id = slot["id"].as_str().unwrap();

    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/admin/slots/{}/status", slot_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_TOKEN))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"status": "booked"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_slot() {
    let app = TestApp::new().await;
    let slot = create_slot(&app, "2025-03-10", "14:00").await;
    let slot_id = slot["id"].as_str().unwrap();

    let res = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/admin/slots/{}", slot_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_TOKEN))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/admin/slots/{}", slot_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_TOKEN))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/admin/slots?start_date=2025-03-10&end_date=2025-03-16")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/admin/slots?start_date=2025-03-10&end_date=2025-03-16")
            .header(header::AUTHORIZATION, "Bearer wrong-token")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
