//! Booking engine for StayLocal.
//!
//! Prices stays, derives blocked dates from existing reservations and answers
//! availability questions for listings. The pure functions live in
//! `calculators`, `availability`, `calendar` and `dates`; `services` combines
//! them with the database.

pub mod availability;
pub mod calculators;
pub mod calendar;
pub mod dates;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use availability::{
    dates_in_range, is_date_booked, AvailabilityError, BlockedDateSet, DateInterval, Reservation,
    ReservationRecord,
};
pub use calculators::{
    compute_nights, compute_price_breakdown, round_money, PriceBreakdown, PricingError,
    PricingPolicy,
};
pub use calendar::{month_calendar, CalendarDay, DayState};
pub use dates::{format_date, parse_requested_range, RequestedRange};
pub use models::{Booking, Property};
pub use routes::router;
pub use services::BookingError;
