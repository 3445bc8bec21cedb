//! Simulated settlement

use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use super::upi::validate_upi_id;
use super::{PaymentError, PaymentMethod, PaymentOutcome, PaymentRequest, PaymentStatus};

/// Settle a payment without a gateway.
///
/// Malformed requests are errors. A UPI payment with a bad or missing UPI id
/// is a well-formed request that fails, so it yields a `Failed` outcome.
pub fn simulate_payment(request: &PaymentRequest) -> Result<PaymentOutcome, PaymentError> {
    if request.amount <= Decimal::ZERO {
        return Err(PaymentError::InvalidAmount(request.amount));
    }
    if !request.currency.eq_ignore_ascii_case("INR") {
        return Err(PaymentError::UnsupportedCurrency(request.currency.clone()));
    }

    if request.payment_method == PaymentMethod::Upi {
        let upi_id = request.upi_id.as_deref().unwrap_or_default();
        if !validate_upi_id(upi_id) {
            warn!("UPI payment for booking {} rejected: bad UPI id", request.booking_id);
            return Ok(PaymentOutcome {
                booking_id: request.booking_id,
                status: PaymentStatus::Failed,
                transaction_id: None,
                message: "Invalid UPI id".to_string(),
            });
        }
    }

    let transaction_id = new_transaction_id();
    info!(
        "Payment {} of {} INR for booking {} via {:?}",
        transaction_id, request.amount, request.booking_id, request.payment_method
    );

    Ok(PaymentOutcome {
        booking_id: request.booking_id,
        status: PaymentStatus::Success,
        transaction_id: Some(transaction_id),
        message: "Payment successful".to_string(),
    })
}

/// `TXN` followed by 12 uppercase hex digits.
fn new_transaction_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("TXN{}", hex[..12].to_uppercase())
}
