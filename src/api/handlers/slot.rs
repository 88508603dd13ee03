use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::manager::ManagerAuth;
use crate::api::dtos::requests::{CreateSlotRequest, UpdateSlotStatusRequest, MonthQuery, RangeQuery};
use crate::domain::models::slot::{CounselingSlot, NewSlotParams, SLOT_OPEN, SLOT_BOOKED, SLOT_CLOSED};
use crate::domain::services::week_range::month_range;
use crate::error::AppError;
use std::sync::Arc;
use chrono::{NaiveDate, NaiveTime};
use tracing::info;

pub async fn create_slot(
    State(state): State<Arc<AppState>>,
    _auth: ManagerAuth,
    Json(payload): Json<CreateSlotRequest>,
) -> Result<impl IntoResponse, AppError> {
    let counseling_date = NaiveDate::parse_from_str(&payload.counseling_date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))?;
    let start_time = NaiveTime::parse_from_str(&payload.start_time, "%H:%M")
        .map_err(|_| AppError::Validation("Invalid time format (HH:MM)".into()))?;

    if payload.duration_minutes <= 0 {
        return Err(AppError::Validation("Duration must be positive".into()));
    }

    let slot = CounselingSlot::new(NewSlotParams {
        counseling_date,
        start_time,
        duration_minutes: payload.duration_minutes,
        notes: payload.notes,
    });

    let created = state.slot_repo.create(&slot).await?;
    info!("Slot created: {} on {} {}", created.id, created.counseling_date, created.start_time);
    Ok(Json(created))
}

pub async fn list_slots(
    State(state): State<Arc<AppState>>,
    _auth: ManagerAuth,
    Query(range): Query<RangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (start, end) = parse_range(&range)?;
    let slots = state.slot_repo.list_by_range(start, end).await?;
    Ok(Json(slots))
}

/// Calendar-month view of the slot grid.
pub async fn list_slots_by_month(
    State(state): State<Arc<AppState>>,
    _auth: ManagerAuth,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse, AppError> {
    let range = month_range(query.year, query.month)
        .ok_or(AppError::Validation("Invalid year/month".into()))?;
    let slots = state.slot_repo.list_by_range(range.start, range.end).await?;
    Ok(Json(slots))
}

/// Manager-only status transitions: `closed` takes a slot out of public
/// availability; `open` is the manual reset (a booked slot never reopens
/// on its own). `booked` is reserved for the booking flow.
pub async fn update_slot_status(
    State(state): State<Arc<AppState>>,
    _auth: ManagerAuth,
    Path(slot_id): Path<String>,
    Json(payload): Json<UpdateSlotStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    match payload.status.as_str() {
        SLOT_OPEN | SLOT_CLOSED => {}
        SLOT_BOOKED => {
            return Err(AppError::Validation("Slots become booked through reservations only".into()));
        }
        _ => return Err(AppError::Validation("Unknown slot status".into())),
    }

    let updated = state.slot_repo.update_status(&slot_id, &payload.status).await?;
    info!("Slot {} status set to {}", updated.id, updated.status);
    Ok(Json(updated))
}

pub async fn delete_slot(
    State(state): State<Arc<AppState>>,
    _auth: ManagerAuth,
    Path(slot_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.slot_repo.delete(&slot_id).await?;
    info!("Slot deleted: {}", slot_id);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}

pub fn parse_range(range: &RangeQuery) -> Result<(NaiveDate, NaiveDate), AppError> {
    let start = NaiveDate::parse_from_str(&range.start_date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid start_date (YYYY-MM-DD)".into()))?;
    let end = NaiveDate::parse_from_str(&range.end_date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid end_date (YYYY-MM-DD)".into()))?;
    if end < start {
        return Err(AppError::Validation("end_date must not precede start_date".into()));
    }
    Ok((start, end))
}
