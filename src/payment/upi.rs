//! UPI ids, payment intents and QR codes

use std::io::Cursor;
use std::sync::LazyLock;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, Luma};
use qrcode::QrCode;
use regex::Regex;
use rust_decimal::Decimal;
use url::Url;

use super::PaymentError;

/// Payee used when the caller names none
pub const DEFAULT_PAYEE: &str = "staylocal@upi";

const PAYEE_NAME: &str = "StayLocal";
const NOTE: &str = "StayLocal Booking";
const QR_SIZE: u32 = 200;

const UPI_ID_PATTERN: &str = r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9]+$";

static UPI_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(UPI_ID_PATTERN).expect("UPI id pattern is a valid regex"));

/// `handle@provider`, provider alphanumeric only.
pub fn validate_upi_id(upi_id: &str) -> bool {
    UPI_ID.is_match(upi_id)
}

/// Build the `upi://pay` intent for an amount in rupees.
pub fn upi_intent_uri(amount: Decimal, payee: Option<&str>) -> Result<String, PaymentError> {
    if amount <= Decimal::ZERO {
        return Err(PaymentError::InvalidAmount(amount));
    }

    let payee = payee.unwrap_or(DEFAULT_PAYEE);
    if !validate_upi_id(payee) {
        return Err(PaymentError::InvalidUpiId(payee.to_string()));
    }

    let amount = amount.normalize().to_string();
    let url = Url::parse_with_params(
        "upi://pay",
        &[
            ("pa", payee),
            ("pn", PAYEE_NAME),
            ("am", amount.as_str()),
            ("cu", "INR"),
            ("tn", NOTE),
        ],
    )
    .map_err(|e| PaymentError::QrEncoding(e.to_string()))?;

    Ok(url.into())
}

/// Render `data` as a QR code and return the PNG bytes base64-encoded.
pub fn render_qr_png_base64(data: &str) -> Result<String, PaymentError> {
    let code = QrCode::new(data.as_bytes()).map_err(|e| PaymentError::QrEncoding(e.to_string()))?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(QR_SIZE, QR_SIZE)
        .build();

    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| PaymentError::QrEncoding(e.to_string()))?;

    Ok(STANDARD.encode(png))
}
