//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::booking::responses::ErrorResponse;
use crate::booking::{AvailabilityError, BookingError, PricingError};
use crate::payment::PaymentError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Availability(#[from] AvailabilityError),

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
            AppError::Pricing(PricingError::InvalidRange { .. }) => {
                (StatusCode::BAD_REQUEST, "invalid_range")
            }
            AppError::Pricing(_) => (StatusCode::BAD_REQUEST, "invalid_pricing"),
            AppError::Availability(_) => (StatusCode::BAD_REQUEST, "invalid_dates"),
            AppError::Booking(BookingError::MissingDates) => {
                (StatusCode::BAD_REQUEST, "missing_dates")
            }
            AppError::Booking(BookingError::DatesUnavailable { .. }) => {
                (StatusCode::CONFLICT, "dates_unavailable")
            }
            AppError::Booking(BookingError::PropertyInactive(_)) => {
                (StatusCode::CONFLICT, "property_inactive")
            }
            AppError::Payment(_) => (StatusCode::BAD_REQUEST, "payment_rejected"),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();

        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "Database error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal error".to_string()
            }
            other => {
                tracing::warn!("Request rejected: {}", other);
                other.to_string()
            }
        };

        let details = match &self {
            AppError::Booking(BookingError::DatesUnavailable { conflicts }) => {
                Some(serde_json::json!({ "conflicts": conflicts }))
            }
            _ => None,
        };

        let body = ErrorResponse {
            error_type: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        let cases = vec![
            (AppError::NotFound("property 1".into()), StatusCode::NOT_FOUND),
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
            (AppError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (
                AppError::Pricing(PricingError::InvalidRange {
                    check_in: date(2024, 7, 4),
                    check_out: date(2024, 7, 1),
                }),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::Pricing(PricingError::AmountOverflow), StatusCode::BAD_REQUEST),
            (
                AppError::Booking(BookingError::DatesUnavailable { conflicts: vec![] }),
                StatusCode::CONFLICT,
            ),
            (AppError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_pricing_error_types() {
        assert_eq!(
            AppError::Pricing(PricingError::AmountOverflow).status_and_type(),
            (StatusCode::BAD_REQUEST, "invalid_pricing")
        );
        assert_eq!(
            AppError::Pricing(PricingError::FractionalAmount {
                name: "nightly rate",
                amount: rust_decimal_macros::dec!(999.99),
            })
            .status_and_type(),
            (StatusCode::BAD_REQUEST, "invalid_pricing")
        );
    }

    #[test]
    fn test_error_display() {
        let err = AppError::Pricing(PricingError::InvalidRange {
            check_in: date(2024, 7, 4),
            check_out: date(2024, 7, 1),
        });
        assert!(err.to_string().contains("2024-07-01"));

        let err = AppError::NotFound("property 42".into());
        assert!(err.to_string().contains("property 42"));
    }
}
