use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{availability, health, reservation, slot};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Public counseling flow
        .route("/api/counseling/availability", get(availability::weekly_availability))
        .route("/api/counseling/reservations", post(reservation::create_reservation))

        // Manager slot administration
        .route("/api/admin/slots", post(slot::create_slot).get(slot::list_slots))
        .route("/api/admin/slots/monthly", get(slot::list_slots_by_month))
        .route("/api/admin/slots/{slot_id}/status", put(slot::update_slot_status))
        .route("/api/admin/slots/{slot_id}", delete(slot::delete_slot))

        // Manager reservation administration
        .route("/api/admin/reservations", get(reservation::list_reservations))
        .route("/api/admin/reservations/{reservation_id}", put(reservation::update_reservation))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
