//! Booking service functions with database access.
//!
//! These combine stored listings and reservations with the pure pricing and
//! availability functions.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::cache::AppCache;
use crate::error::{AppError, Result};
use crate::session::Session;

use super::availability::{BlockedDateSet, DateInterval};
use super::calculators::{PriceBreakdown, PricingPolicy};
use super::dates::RequestedRange;
use super::models::{Booking, Property};
use super::queries::{self, PropertyFilter};

/// Booking errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BookingError {
    #[error("Both check-in and check-out dates are required")]
    MissingDates,

    #[error("Requested dates overlap {} booked night(s)", .conflicts.len())]
    DatesUnavailable { conflicts: Vec<NaiveDate> },

    #[error("Property {0} is not accepting bookings")]
    PropertyInactive(i32),
}

/// Priced stay for a stored property
#[derive(Debug, Clone)]
pub struct StayQuote {
    pub property: Arc<Property>,
    pub stay: DateInterval,
    pub breakdown: PriceBreakdown,
}

/// Quote a stay, rejecting dates already taken.
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `cache` - Application cache (for the property lookup)
/// * `policy` - Marketplace fees
/// * `property_id` - Listing to price
/// * `range` - Requested dates, both required
pub async fn quote_stay(
    pool: &PgPool,
    cache: &AppCache,
    policy: &PricingPolicy,
    property_id: i32,
    range: &RequestedRange,
) -> Result<StayQuote> {
    let (check_in, check_out) = range.complete().ok_or(BookingError::MissingDates)?;

    let property = cache.property(pool, property_id).await?;
    if !property.is_active() {
        return Err(BookingError::PropertyInactive(property_id).into());
    }

    let breakdown = policy.price(property.nightly_rate(), check_in, check_out, None)?;
    let stay = DateInterval::new(check_in, check_out)?;

    let bookings = queries::get_property_bookings(pool, property_id).await?;
    check_availability(&BlockedDateSet::from_reservations(&bookings), &stay)?;

    Ok(StayQuote {
        property,
        stay,
        breakdown,
    })
}

/// Reject a stay that overlaps blocked dates.
pub fn check_availability(blocked: &BlockedDateSet, stay: &DateInterval) -> Result<()> {
    let conflicts = blocked.conflicts(stay);
    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(BookingError::DatesUnavailable { conflicts }.into())
    }
}

/// Blocked dates of one property, read fresh from the bookings table.
pub async fn blocked_dates_for_property(
    pool: &PgPool,
    cache: &AppCache,
    property_id: i32,
) -> Result<BlockedDateSet> {
    cache.property(pool, property_id).await?;
    let bookings = queries::get_property_bookings(pool, property_id).await?;
    Ok(BlockedDateSet::from_reservations(&bookings))
}

/// Search listings, dropping those booked during a complete, ordered range.
///
/// Half-specified or inverted ranges do not filter.
pub async fn search_available_properties(
    pool: &PgPool,
    filter: &PropertyFilter,
    range: &RequestedRange,
) -> Result<Vec<Property>> {
    let properties = queries::search_properties(pool, filter).await?;

    let Some(stay) = range
        .complete()
        .and_then(|(from, to)| DateInterval::new(from, to).ok())
    else {
        return Ok(properties);
    };

    let ids: Vec<i32> = properties.iter().map(|p| p.id).collect();
    let bookings = queries::get_bookings_for_properties(pool, &ids).await?;

    Ok(filter_available(properties, &bookings, &stay))
}

/// Keep properties whose own bookings leave `stay` free.
pub fn filter_available(
    properties: Vec<Property>,
    bookings: &[Booking],
    stay: &DateInterval,
) -> Vec<Property> {
    let mut by_property: HashMap<i32, Vec<Booking>> = HashMap::new();
    for booking in bookings {
        by_property
            .entry(booking.property_id)
            .or_default()
            .push(booking.clone());
    }

    properties
        .into_iter()
        .filter(|property| match by_property.get(&property.id) {
            Some(own) => BlockedDateSet::from_reservations(own).is_range_available(stay),
            None => true,
        })
        .collect()
}

/// Bookings across a host's listings with dashboard counts
#[derive(Debug, Clone)]
pub struct HostBookingSummary {
    pub bookings: Vec<Booking>,
    pub pending: usize,
    pub confirmed: usize,
    pub earnings: Decimal,
}

impl HostBookingSummary {
    /// Earnings count paid bookings that were not cancelled.
    pub fn from_bookings(bookings: Vec<Booking>) -> Self {
        let pending = bookings.iter().filter(|b| b.status == "pending").count();
        let confirmed = bookings.iter().filter(|b| b.status == "confirmed").count();
        let earnings = bookings
            .iter()
            .filter(|b| b.payment_status == "paid" && b.status != "cancelled")
            .map(|b| Decimal::from(b.total_price))
            .sum();

        Self {
            bookings,
            pending,
            confirmed,
            earnings,
        }
    }
}

/// Host dashboard bookings, readable only by the host themself.
pub async fn host_booking_summary(
    pool: &PgPool,
    session: &Session,
    host_id: i32,
) -> Result<HostBookingSummary> {
    if !session.is_host_of(host_id) {
        return Err(AppError::Forbidden(format!(
            "bookings of host {} are not visible to user {}",
            host_id, session.user.id
        )));
    }

    let bookings = queries::get_bookings_for_host(pool, host_id).await?;
    Ok(HostBookingSummary::from_bookings(bookings))
}
