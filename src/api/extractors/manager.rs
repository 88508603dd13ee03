use axum::{
    extract::{FromRequestParts, FromRef},
    http::{header, request::Parts, StatusCode},
};
use crate::state::AppState;
use std::sync::Arc;

/// Marks manager-only routes. Session handling stays with the frontend
/// platform; the backend only checks the static admin API token.
pub struct ManagerAuth;

impl<S> FromRequestParts<S> for ManagerAuth
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header_val = parts.headers.get(header::AUTHORIZATION)
            .ok_or(StatusCode::UNAUTHORIZED)?
            .to_str()
            .map_err(|_| StatusCode::UNAUTHORIZED)?;

        let token = header_val.strip_prefix("Bearer ")
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        if token != app_state.config.admin_api_token {
            return Err(StatusCode::UNAUTHORIZED);
        }

        Ok(ManagerAuth)
    }
}
