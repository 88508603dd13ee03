use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::manager::ManagerAuth;
use crate::api::dtos::requests::{CreateReservationRequest, UpdateReservationRequest, RangeQuery};
use crate::api::handlers::slot::parse_range;
use crate::domain::models::reservation::{
    CounselingReservation, NewReservationParams, RESERVATION_CANCELLED, RESERVATION_CONFIRMED,
};
use crate::domain::models::job::NotificationJob;
use crate::domain::models::slot::SLOT_OPEN;
use crate::domain::services::phone::{is_valid_mobile, normalize_phone};
use crate::error::AppError;
use std::sync::Arc;
use serde_json::json;
use tracing::{info, warn};

/// Public booking endpoint. Validation and the two pre-checks catch the
/// common cases; the definitive double-booking guard is the conditional
/// slot update inside `create_confirmed`, so two simultaneous requests
/// for the same slot can both reach step 4 and still only one commits.
pub async fn create_reservation(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.student_name.trim().is_empty() {
        return Err(AppError::Validation("Student name is required".into()));
    }

    let contact_phone = normalize_phone(&payload.contact_phone);
    if !is_valid_mobile(&contact_phone) {
        return Err(AppError::Validation("Invalid mobile number (010 prefix, 10-11 digits)".into()));
    }

    let slot = state.slot_repo.find_by_id(&payload.slot_id).await?
        .ok_or(AppError::NotFound("Slot not found".into()))?;

    if slot.status != SLOT_OPEN {
        return Err(AppError::Conflict("Slot is no longer available".into()));
    }

    // Covers the case where a partial prior failure left the slot flag
    // and the reservation table disagreeing.
    if state.reservation_repo.find_confirmed_by_slot(&slot.id).await?.is_some() {
        warn!("Slot {} is flagged open but already has a confirmed reservation", slot.id);
        return Err(AppError::Conflict("Slot is no longer available".into()));
    }

    let additional_answers = payload.additional_answers.map(|v| v.to_string());

    let reservation = CounselingReservation::new(NewReservationParams {
        slot_id: payload.slot_id,
        student_name: payload.student_name.trim().to_string(),
        contact_phone,
        academic_record: payload.academic_record,
        target_university: payload.target_university,
        question: payload.question,
        additional_answers,
    });

    let job = NotificationJob::new(reservation.id.clone(), state.clock.now());

    let created = state.reservation_repo.create_confirmed(&reservation, &job).await?;
    info!("Reservation confirmed: {} for slot {}", created.id, created.slot_id);

    Ok(Json(json!({ "success": true })))
}

pub async fn list_reservations(
    State(state): State<Arc<AppState>>,
    _auth: ManagerAuth,
    Query(range): Query<RangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (start, end) = parse_range(&range)?;
    let reservations = state.reservation_repo.list_by_range(start, end).await?;
    Ok(Json(reservations))
}

/// Manager mutation: memo and/or status. Cancelling never reopens the
/// slot; that is the manager's explicit manual reset on the slot itself.
pub async fn update_reservation(
    State(state): State<Arc<AppState>>,
    _auth: ManagerAuth,
    Path(reservation_id): Path<String>,
    Json(payload): Json<UpdateReservationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut reservation = state.reservation_repo.find_by_id(&reservation_id).await?
        .ok_or(AppError::NotFound("Reservation not found".into()))?;

    if let Some(status) = payload.status {
        match status.as_str() {
            RESERVATION_CONFIRMED | RESERVATION_CANCELLED => reservation.status = status,
            _ => return Err(AppError::Validation("Unknown reservation status".into())),
        }
    }

    if let Some(memo) = payload.memo {
        if memo.is_empty() {
            reservation.memo = None;
        } else {
            reservation.memo = Some(memo);
        }
    }

    let updated = state.reservation_repo.update(&reservation).await?;
    info!("Reservation updated: {} ({})", updated.id, updated.status);
    Ok(Json(updated))
}
