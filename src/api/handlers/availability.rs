use axum::{extract::{State, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::responses::{AvailabilityResponse, WeekNavigation};
use crate::domain::services::week_range::{build_week_href, resolve_week_range};
use crate::error::AppError;
use std::sync::Arc;

const AVAILABILITY_PATH: &str = "/api/counseling/availability";

/// Public weekly calendar: open slots for the week containing `week`
/// (today when absent or malformed), plus prev/next navigation links
/// that keep every other query parameter intact.
pub async fn weekly_availability(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let week_param = params.iter()
        .find(|(key, _)| key == "week")
        .map(|(_, value)| value.as_str());

    let range = resolve_week_range(week_param, &state.clock);
    let slots = state.slot_repo.list_open_by_range(range.start, range.end).await?;

    Ok(Json(AvailabilityResponse {
        week: WeekNavigation {
            label: range.label.clone(),
            param: range.param.clone(),
            start: range.start,
            end: range.end,
            previous: build_week_href(AVAILABILITY_PATH, &params, range.previous_start),
            next: build_week_href(AVAILABILITY_PATH, &params, range.next_start),
        },
        slots,
    }))
}
