//! Booking route handlers

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{Datelike, Utc};
use tracing::debug;

use crate::error::Result;
use crate::AppState;

use super::calendar::month_calendar;
use super::requests::{BreakdownRequest, CalendarQuery, DateRangeQuery, SearchQuery};
use super::responses::{
    BlockedDatesResponse, CalendarResponse, PriceBreakdownResponse, PropertySearchResponse,
    QuoteResponse,
};
use super::services;

/// Booking API routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/pricing/breakdown", post(breakdown))
        .route("/api/properties", get(search))
        .route("/api/properties/:id/quote", get(quote))
        .route("/api/properties/:id/blocked-dates", get(blocked_dates))
        .route("/api/properties/:id/calendar", get(calendar))
}

/// Price a stay from explicit inputs
async fn breakdown(
    State(state): State<AppState>,
    Json(req): Json<BreakdownRequest>,
) -> Result<Json<PriceBreakdownResponse>> {
    let breakdown = super::calculators::compute_price_breakdown_with_rate(
        req.nightly_rate,
        req.check_in,
        req.check_out,
        req.cleaning_fee.unwrap_or(state.config.pricing.cleaning_fee),
        state.config.pricing.service_fee_rate,
        req.service_fee_override,
    )?;

    Ok(Json(breakdown.into()))
}

/// Search listings, optionally only those free for the given dates
async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<PropertySearchResponse>> {
    let filter = query.filter();
    let range = query.dates.range();
    debug!("Property search {:?} for {:?}", filter, range);

    let properties = services::search_available_properties(&state.db, &filter, &range).await?;

    Ok(Json(PropertySearchResponse {
        total: properties.len(),
        properties,
    }))
}

/// Quote a stored property for the given dates
async fn quote(
    State(state): State<AppState>,
    Path(property_id): Path<i32>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<QuoteResponse>> {
    let quote = services::quote_stay(
        &state.db,
        &state.cache,
        &state.config.pricing,
        property_id,
        &query.range(),
    )
    .await?;

    Ok(Json(quote.into()))
}

async fn blocked_dates(
    State(state): State<AppState>,
    Path(property_id): Path<i32>,
) -> Result<Json<BlockedDatesResponse>> {
    let dates = services::blocked_dates_for_property(&state.db, &state.cache, property_id).await?;

    Ok(Json(BlockedDatesResponse { property_id, dates }))
}

/// Month grid for the booking widget; defaults to the current month
async fn calendar(
    State(state): State<AppState>,
    Path(property_id): Path<i32>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>> {
    let today = Utc::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());

    let blocked = services::blocked_dates_for_property(&state.db, &state.cache, property_id).await?;
    let days = month_calendar(year, month, today, &blocked)?;

    Ok(Json(CalendarResponse {
        property_id,
        year,
        month,
        days,
    }))
}
