//! Database models for booking queries.
//!
//! These models use sqlx's FromRow derive for direct database deserialization.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use super::availability::{holds_dates, DateInterval, Reservation};

/// Listing from properties
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: i32,
    pub host_id: i32,
    pub title: String,
    pub location: String,
    pub price_per_night: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub max_guests: i32,
    pub property_type: String,
    pub status: String,
}

impl Property {
    pub fn nightly_rate(&self) -> Decimal {
        Decimal::from(self.price_per_night)
    }

    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

/// Reservation from bookings
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i32,
    pub property_id: i32,
    pub user_id: i32,
    pub check_in_date: DateTime<Utc>,
    pub check_out_date: DateTime<Utc>,
    pub number_of_guests: i32,
    pub total_price: i32,
    pub status: String,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
}

impl Reservation for Booking {
    fn occupied(&self) -> Option<DateInterval> {
        if !holds_dates(&self.status) {
            return None;
        }
        DateInterval::new(self.check_in_date.date_naive(), self.check_out_date.date_naive()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn booking(status: &str, check_in: (u32, u32), check_out: (u32, u32)) -> Booking {
        Booking {
            id: 1,
            property_id: 7,
            user_id: 3,
            check_in_date: Utc.with_ymd_and_hms(2024, check_in.0, check_in.1, 14, 0, 0).unwrap(),
            check_out_date: Utc.with_ymd_and_hms(2024, check_out.0, check_out.1, 11, 0, 0).unwrap(),
            number_of_guests: 2,
            total_price: 10975,
            status: status.to_string(),
            payment_status: "pending".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_booking_occupies_calendar_dates() {
        let interval = booking("confirmed", (7, 1), (7, 4)).occupied().unwrap();
        assert_eq!(interval.start(), NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        assert_eq!(interval.end(), NaiveDate::from_ymd_opt(2024, 7, 4).unwrap());
    }

    #[test]
    fn test_cancelled_booking_releases_dates() {
        assert!(booking("cancelled", (7, 1), (7, 4)).occupied().is_none());
    }

    #[test]
    fn test_same_day_booking_holds_nothing() {
        assert!(booking("pending", (7, 1), (7, 1)).occupied().is_none());
    }

    #[test]
    fn test_booking_serializes_camel_case() {
        let json = serde_json::to_value(booking("pending", (7, 1), (7, 4))).unwrap();
        assert_eq!(json["propertyId"], 7);
        assert_eq!(json["paymentStatus"], "pending");
    }
}
