//! Payment route handlers

use axum::{routing::post, Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::payment::{self, PaymentOutcome, PaymentRequest};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/payments", post(create_payment))
        .route("/api/payments/upi-intent", post(upi_intent))
}

/// Simulated payment for a booking
async fn create_payment(Json(req): Json<PaymentRequest>) -> Result<Json<PaymentOutcome>> {
    Ok(Json(payment::simulate_payment(&req)?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpiIntentRequest {
    pub amount: Decimal,
    #[serde(default)]
    pub upi_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpiIntentResponse {
    pub uri: String,
    /// Base64 PNG
    pub qr_code: String,
}

async fn upi_intent(Json(req): Json<UpiIntentRequest>) -> Result<Json<UpiIntentResponse>> {
    let uri = payment::upi_intent_uri(req.amount, req.upi_id.as_deref())?;
    let qr_code = payment::render_qr_png_base64(&uri)?;

    Ok(Json(UpiIntentResponse { uri, qr_code }))
}
