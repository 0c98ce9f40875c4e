//! Price types and the two-decimal rounding primitive.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::FareError;
use crate::models::VehicleType;

// Above 2^53 every f64 is an integer, so rounding is the identity.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Rounds a raw price to two decimal places, half-up.
///
/// Rounding works on the shortest decimal representation of `value`, so
/// `1.315` rounds to `1.32` even though its binary value sits just below
/// the midpoint. Midpoints round away from zero. Non-finite values are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use u_parking::fare::format_price;
///
/// assert_eq!(format_price(1.317), 1.32);
/// assert_eq!(format_price(1.315), 1.32);
/// assert_eq!(format_price(1.314), 1.31);
/// assert_eq!(format_price(0.0), 0.0);
/// ```
pub fn format_price(value: f64) -> f64 {
    if !value.is_finite() || value.abs() >= EXACT_INTEGER_LIMIT {
        return value;
    }
    match decimal_from_f64(value) {
        Some(decimal) => decimal_to_f64(round_cents(decimal)),
        None => value,
    }
}

/// Parses the shortest decimal representation of a finite `f64`.
pub(crate) fn decimal_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_str(&value.to_string()).ok()
}

pub(crate) fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// Goes through the decimal string so the result is the f64 nearest to the
// exact decimal value.
fn decimal_to_f64(value: Decimal) -> f64 {
    value
        .to_string()
        .parse::<f64>()
        .ok()
        .or_else(|| value.to_f64())
        .unwrap_or(f64::NAN)
}

/// A final, rounded price.
///
/// Produced by [`FareCalculator::apply_discount`](super::FareCalculator::apply_discount)
/// or [`Price::new`]; always holds a value with at most two decimals.
/// Deserialization rejects negative and non-finite amounts and rounds the
/// rest.
///
/// # Examples
///
/// ```
/// use u_parking::fare::Price;
///
/// let p = Price::new(2.849999);
/// assert_eq!(p.amount(), 2.85);
/// assert_eq!(p.to_string(), "2.85");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    /// A zero price.
    pub const ZERO: Price = Price(0.0);

    /// Creates a price by rounding `raw` with [`format_price`].
    pub fn new(raw: f64) -> Self {
        Price(format_price(raw))
    }

    pub(crate) fn from_decimal(amount: Decimal) -> Self {
        Price(decimal_to_f64(round_cents(amount)))
    }

    /// Amount in currency units.
    pub fn amount(self) -> f64 {
        self.0
    }

    /// Returns `true` if nothing is owed.
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl TryFrom<f64> for Price {
    type Error = FareError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value < 0.0 {
            return Err(FareError::InvalidPrice { value });
        }
        Ok(Price::new(value))
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// The undiscounted fare for a ticket, before rounding.
///
/// Deliberately not `Clone`: [`FareCalculator::apply_discount`](super::FareCalculator::apply_discount)
/// consumes it, so a discount can be applied to a base fare at most once.
#[derive(Debug, PartialEq)]
pub struct BaseFare {
    amount: Decimal,
    duration_hours: f64,
    vehicle_type: VehicleType,
    free: bool,
}

impl BaseFare {
    pub(crate) fn charged(amount: Decimal, duration_hours: f64, vehicle_type: VehicleType) -> Self {
        Self {
            amount,
            duration_hours,
            vehicle_type,
            free: false,
        }
    }

    pub(crate) fn free(duration_hours: f64, vehicle_type: VehicleType) -> Self {
        Self {
            amount: Decimal::ZERO,
            duration_hours,
            vehicle_type,
            free: true,
        }
    }

    /// Exact, unrounded amount.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Parking duration in fractional hours.
    pub fn duration_hours(&self) -> f64 {
        self.duration_hours
    }

    /// Vehicle type whose rate was applied.
    pub fn vehicle_type(&self) -> VehicleType {
        self.vehicle_type
    }

    /// Returns `true` if the stay fell within the grace period.
    pub fn is_free(&self) -> bool {
        self.free
    }
}
