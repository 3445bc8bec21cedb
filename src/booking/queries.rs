//! Database queries for the booking engine.
//!
//! The marketplace tables are owned by the main application; these queries
//! only read them.

use sqlx::PgPool;

use crate::error::{AppError, Result};

use super::models::{Booking, Property};

/// Filters accepted by property search
#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    pub location: Option<String>,
    pub property_type: Option<String>,
    pub guests: Option<i32>,
    pub max_price: Option<i32>,
}

const PROPERTY_COLUMNS: &str = r#"
    id, host_id, title, location, price_per_night,
    bedrooms, bathrooms, max_guests, property_type, status
"#;

const BOOKING_COLUMNS: &str = r#"
    b.id, b.property_id, b.user_id, b.check_in_date, b.check_out_date,
    b.number_of_guests, b.total_price, b.status, b.payment_status, b.created_at
"#;

/// Get a property by id
pub async fn get_property(pool: &PgPool, property_id: i32) -> Result<Property> {
    sqlx::query_as::<_, Property>(&format!(
        "SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = $1"
    ))
    .bind(property_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("property {}", property_id)))
}

/// Search active properties
pub async fn search_properties(pool: &PgPool, filter: &PropertyFilter) -> Result<Vec<Property>> {
    let properties = sqlx::query_as::<_, Property>(&format!(
        r#"
        SELECT {PROPERTY_COLUMNS}
        FROM properties
        WHERE status = 'active'
          AND ($1::text IS NULL OR location ILIKE '%' || $1 || '%')
          AND ($2::text IS NULL OR property_type = $2)
          AND ($3::int IS NULL OR max_guests >= $3)
          AND ($4::int IS NULL OR price_per_night <= $4)
        ORDER BY created_at DESC
        "#
    ))
    .bind(filter.location.as_deref())
    .bind(filter.property_type.as_deref())
    .bind(filter.guests)
    .bind(filter.max_price)
    .fetch_all(pool)
    .await?;

    Ok(properties)
}

/// Get every booking of one property
pub async fn get_property_bookings(pool: &PgPool, property_id: i32) -> Result<Vec<Booking>> {
    let bookings = sqlx::query_as::<_, Booking>(&format!(
        r#"
        SELECT {BOOKING_COLUMNS}
        FROM bookings b
        WHERE b.property_id = $1
        ORDER BY b.check_in_date
        "#
    ))
    .bind(property_id)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

/// Get bookings for a set of properties in one round trip
pub async fn get_bookings_for_properties(
    pool: &PgPool,
    property_ids: &[i32],
) -> Result<Vec<Booking>> {
    if property_ids.is_empty() {
        return Ok(Vec::new());
    }

    let bookings = sqlx::query_as::<_, Booking>(&format!(
        r#"
        SELECT {BOOKING_COLUMNS}
        FROM bookings b
        WHERE b.property_id = ANY($1)
        ORDER BY b.property_id, b.check_in_date
        "#
    ))
    .bind(property_ids)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

/// Get bookings across all properties owned by a host
pub async fn get_bookings_for_host(pool: &PgPool, host_id: i32) -> Result<Vec<Booking>> {
    let bookings = sqlx::query_as::<_, Booking>(&format!(
        r#"
        SELECT {BOOKING_COLUMNS}
        FROM bookings b
        JOIN properties p ON p.id = b.property_id
        WHERE p.host_id = $1
        ORDER BY b.check_in_date DESC
        "#
    ))
    .bind(host_id)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}
