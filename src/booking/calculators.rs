//! Core stay pricing functions.
//!
//! Pure functions for booking math - no database access.
//! All amounts are whole Rupees held as `Decimal`.

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// Cleaning fee charged once per stay when the caller does not supply one.
pub const DEFAULT_CLEANING_FEE: Decimal = dec!(2500);

/// Marketplace commission applied to the subtotal (13%).
pub const DEFAULT_SERVICE_FEE_RATE: Decimal = dec!(0.13);

/// Pricing errors raised before a breakdown is produced
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("Check-out {check_out} must be after check-in {check_in}")]
    InvalidRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("Nightly rate must be positive, got {0}")]
    InvalidRate(Decimal),

    #[error("{name} must not be negative, got {amount}")]
    NegativeFee { name: &'static str, amount: Decimal },

    #[error("{name} must be whole rupees, got {amount}")]
    FractionalAmount { name: &'static str, amount: Decimal },

    #[error("Stay price is too large to compute")]
    AmountOverflow,
}

/// Round to whole currency units, half-up.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use staylocal_booking::booking::round_money;
///
/// assert_eq!(round_money(dec!(974.5)), dec!(975));
/// assert_eq!(round_money(dec!(974.49)), dec!(974));
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Whole calendar days between check-in and check-out.
///
/// Zero or negative when the dates are not in order; callers must not price
/// such a result.
pub fn compute_nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Service fee for a subtotal at the given commission rate.
pub fn calculate_service_fee(subtotal: Decimal, rate: Decimal) -> Result<Decimal, PricingError> {
    subtotal
        .checked_mul(rate)
        .map(round_money)
        .ok_or(PricingError::AmountOverflow)
}

/// Price breakdown for one stay
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreakdown {
    pub nights: i64,
    pub subtotal: Decimal,
    pub cleaning_fee: Decimal,
    pub service_fee: Decimal,
    pub total: Decimal,
}

impl PriceBreakdown {
    /// Breakdown shown before both dates are chosen.
    pub fn empty(cleaning_fee: Decimal) -> Self {
        Self {
            nights: 0,
            subtotal: Decimal::ZERO,
            cleaning_fee,
            service_fee: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}

/// Compute the price of a stay with the default 13% service fee.
///
/// # Arguments
/// * `nightly_rate` - Price per night, must be positive
/// * `check_in` - First night of the stay
/// * `check_out` - Departure day (not charged)
/// * `cleaning_fee` - Flat fee, usually `DEFAULT_CLEANING_FEE`
/// * `service_fee_override` - Fee stored on an existing booking; replaces the computed fee
///
/// # Errors
/// `PricingError::InvalidRange` when `check_out <= check_in`, `InvalidRate` for a
/// non-positive rate, `NegativeFee` for negative fees, `FractionalAmount` when
/// the rate or a fee is not whole rupees and `AmountOverflow` when the total
/// does not fit a `Decimal`.
pub fn compute_price_breakdown(
    nightly_rate: Decimal,
    check_in: NaiveDate,
    check_out: NaiveDate,
    cleaning_fee: Decimal,
    service_fee_override: Option<Decimal>,
) -> Result<PriceBreakdown, PricingError> {
    compute_price_breakdown_with_rate(
        nightly_rate,
        check_in,
        check_out,
        cleaning_fee,
        DEFAULT_SERVICE_FEE_RATE,
        service_fee_override,
    )
}

/// Same as [`compute_price_breakdown`] with an explicit commission rate.
pub fn compute_price_breakdown_with_rate(
    nightly_rate: Decimal,
    check_in: NaiveDate,
    check_out: NaiveDate,
    cleaning_fee: Decimal,
    service_fee_rate: Decimal,
    service_fee_override: Option<Decimal>,
) -> Result<PriceBreakdown, PricingError> {
    if nightly_rate <= Decimal::ZERO {
        return Err(PricingError::InvalidRate(nightly_rate));
    }
    require_whole("nightly rate", nightly_rate)?;
    require_fee("cleaning fee", cleaning_fee)?;
    if let Some(fee) = service_fee_override {
        require_fee("service fee", fee)?;
    }

    let nights = compute_nights(check_in, check_out);
    if nights <= 0 {
        return Err(PricingError::InvalidRange {
            check_in,
            check_out,
        });
    }

    let subtotal = nightly_rate
        .checked_mul(Decimal::from(nights))
        .ok_or(PricingError::AmountOverflow)?;
    let service_fee = match service_fee_override {
        Some(fee) => fee,
        None => calculate_service_fee(subtotal, service_fee_rate)?,
    };
    let total = subtotal
        .checked_add(cleaning_fee)
        .and_then(|sum| sum.checked_add(service_fee))
        .ok_or(PricingError::AmountOverflow)?;

    Ok(PriceBreakdown {
        nights,
        subtotal,
        cleaning_fee,
        service_fee,
        total,
    })
}

fn require_whole(name: &'static str, amount: Decimal) -> Result<(), PricingError> {
    if amount.fract().is_zero() {
        Ok(())
    } else {
        Err(PricingError::FractionalAmount { name, amount })
    }
}

fn require_fee(name: &'static str, amount: Decimal) -> Result<(), PricingError> {
    if amount < Decimal::ZERO {
        return Err(PricingError::NegativeFee { name, amount });
    }
    require_whole(name, amount)
}

/// Marketplace-wide fee settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PricingPolicy {
    pub cleaning_fee: Decimal,
    pub service_fee_rate: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            cleaning_fee: DEFAULT_CLEANING_FEE,
            service_fee_rate: DEFAULT_SERVICE_FEE_RATE,
        }
    }
}

impl PricingPolicy {
    /// Price a stay with this policy's fees.
    pub fn price(
        &self,
        nightly_rate: Decimal,
        check_in: NaiveDate,
        check_out: NaiveDate,
        service_fee_override: Option<Decimal>,
    ) -> Result<PriceBreakdown, PricingError> {
        compute_price_breakdown_with_rate(
            nightly_rate,
            check_in,
            check_out,
            self.cleaning_fee,
            self.service_fee_rate,
            service_fee_override,
        )
    }
}
