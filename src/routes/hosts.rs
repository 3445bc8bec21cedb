//! Host dashboard route handlers

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::booking::responses::HostBookingsResponse;
use crate::booking::services;
use crate::error::Result;
use crate::session::AuthSession;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/hosts/:id/bookings", get(host_bookings))
}

/// All bookings across the host's listings, in one query
async fn host_bookings(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(host_id): Path<i32>,
) -> Result<Json<HostBookingsResponse>> {
    let summary = services::host_booking_summary(&state.db, &session, host_id).await?;

    Ok(Json(HostBookingsResponse::new(host_id, summary)))
}
