//! Response DTOs for booking API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::availability::BlockedDateSet;
use super::calendar::CalendarDay;
use super::calculators::PriceBreakdown;
use super::dates::format_date_range;
use super::models::{Booking, Property};
use super::services::{HostBookingSummary, StayQuote};

/// Display currency for every amount
pub const CURRENCY: &str = "INR";

/// Price breakdown for JSON responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdownResponse {
    pub nights: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub cleaning_fee: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub service_fee: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    pub currency: String,
}

impl From<PriceBreakdown> for PriceBreakdownResponse {
    fn from(b: PriceBreakdown) -> Self {
        Self {
            nights: b.nights,
            subtotal: b.subtotal,
            cleaning_fee: b.cleaning_fee,
            service_fee: b.service_fee,
            total: b.total,
            currency: CURRENCY.to_string(),
        }
    }
}

/// Response for a stored property's quote
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub property_id: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub display_range: String,
    pub breakdown: PriceBreakdownResponse,
}

impl From<StayQuote> for QuoteResponse {
    fn from(quote: StayQuote) -> Self {
        Self {
            property_id: quote.property.id,
            check_in: quote.stay.start(),
            check_out: quote.stay.end(),
            display_range: format_date_range(quote.stay.start(), quote.stay.end()),
            breakdown: quote.breakdown.into(),
        }
    }
}

/// Response for blocked dates
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedDatesResponse {
    pub property_id: i32,
    pub dates: BlockedDateSet,
}

/// Response for the availability calendar
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarResponse {
    pub property_id: i32,
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

/// Response for property search
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySearchResponse {
    pub total: usize,
    pub properties: Vec<Property>,
}

/// Response for the host dashboard
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostBookingsResponse {
    pub host_id: i32,
    pub pending: usize,
    pub confirmed: usize,
    #[serde(with = "rust_decimal::serde::str")]
    pub earnings: Decimal,
    pub currency: String,
    pub bookings: Vec<Booking>,
}

impl HostBookingsResponse {
    pub fn new(host_id: i32, summary: HostBookingSummary) -> Self {
        Self {
            host_id,
            pending: summary.pending,
            confirmed: summary.confirmed,
            earnings: summary.earnings,
            currency: CURRENCY.to_string(),
            bookings: summary.bookings,
        }
    }
}

/// Generic error response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
