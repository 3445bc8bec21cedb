//! Simulated payments for bookings.
//!
//! No gateway is contacted. UPI intents and their QR codes are generated
//! locally and settlements are simulated.

pub mod processor;
pub mod upi;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use processor::simulate_payment;
pub use upi::{render_qr_png_base64, upi_intent_uri, validate_upi_id, DEFAULT_PAYEE};

/// Payment errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaymentError {
    #[error("Payment amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("Invalid UPI id: {0}")]
    InvalidUpiId(String),

    #[error("Could not render QR code: {0}")]
    QrEncoding(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Upi,
    Card,
    Netbanking,
}

/// Payment submitted for a booking
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub booking_id: i32,
    pub amount: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub upi_id: Option<String>,
}

fn default_currency() -> String {
    "INR".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Success,
    Failed,
}

/// Result of a simulated payment
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOutcome {
    pub booking_id: i32,
    pub status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payment_request_wire_format() {
        let json = r#"{"bookingId":7,"amount":10975,"paymentMethod":"upi","upiId":"asha@okaxis"}"#;
        let req: PaymentRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.booking_id, 7);
        assert_eq!(req.amount, dec!(10975));
        assert_eq!(req.currency, "INR");
        assert_eq!(req.payment_method, PaymentMethod::Upi);
        assert_eq!(req.upi_id.as_deref(), Some("asha@okaxis"));
    }

    #[test]
    fn test_outcome_omits_missing_transaction() {
        let outcome = PaymentOutcome {
            booking_id: 1,
            status: PaymentStatus::Failed,
            transaction_id: None,
            message: "Invalid UPI id".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["status"], "failed");
        assert!(json.get("transactionId").is_none());
    }
}
