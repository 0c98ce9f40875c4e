//! Fare schedule: rates, grace period, and loyalty discount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::price::decimal_from_f64;
use crate::error::{FareError, FareResult};
use crate::models::VehicleType;

/// Free parking threshold in minutes.
pub const GRACE_PERIOD_MINUTES: f64 = 30.0;
/// Recurring-customer discount as a fraction of the base fare.
pub const DISCOUNT_RATE: f64 = 0.05;

const RATE_TOLERANCE: f64 = 1e-9;

/// Hourly and per-minute rate for one vehicle type.
///
/// Both values are stored; [`FareSchedule::validate`] checks that they agree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleRates {
    /// Rate per hour.
    pub per_hour: f64,
    /// Rate per minute.
    pub per_minute: f64,
}

impl VehicleRates {
    /// The canonical rates for a vehicle type.
    pub fn canonical(vehicle_type: VehicleType) -> Self {
        Self {
            per_hour: vehicle_type.rate_per_hour(),
            per_minute: vehicle_type.rate_per_minute(),
        }
    }

    fn validate(&self, vehicle_type: VehicleType) -> FareResult<()> {
        if !self.per_hour.is_finite() || self.per_hour < 0.0 {
            return Err(invalid(format!(
                "{vehicle_type} rate per hour must be finite and non-negative, got {}",
                self.per_hour
            )));
        }
        if !self.per_minute.is_finite() || self.per_minute < 0.0 {
            return Err(invalid(format!(
                "{vehicle_type} rate per minute must be finite and non-negative, got {}",
                self.per_minute
            )));
        }
        if decimal_from_f64(self.per_hour).is_none() {
            return Err(invalid(format!(
                "{vehicle_type} rate per hour {} is out of range",
                self.per_hour
            )));
        }
        let derived = self.per_minute * 60.0;
        if (derived - self.per_hour).abs() > RATE_TOLERANCE * self.per_hour.max(1.0) {
            return Err(invalid(format!(
                "{vehicle_type} rates disagree: {} per minute is {derived} per hour, not {}",
                self.per_minute, self.per_hour
            )));
        }
        Ok(())
    }
}

/// Configuration read by [`FareCalculator`](super::FareCalculator).
///
/// `Default` carries the canonical constants: Car 1.5/hour, Bike 1.0/hour,
/// a 30 minute grace period and a 5% recurring-customer discount.
///
/// # Examples
///
/// ```
/// use u_parking::fare::{FareSchedule, VehicleRates};
/// use u_parking::models::VehicleType;
///
/// let schedule = FareSchedule::default()
///     .with_rates(VehicleType::Car, VehicleRates { per_hour: 3.0, per_minute: 0.05 })
///     .with_grace_period_minutes(15.0);
/// assert!(schedule.validate().is_ok());
/// assert_eq!(schedule.rates(VehicleType::Car).per_hour, 3.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FareSchedule {
    car: VehicleRates,
    bike: VehicleRates,
    grace_period_minutes: f64,
    discount_rate: f64,
}

impl FareSchedule {
    /// Parses and validates a schedule from JSON.
    ///
    /// Missing fields fall back to the defaults.
    pub fn from_json(json: &str) -> FareResult<Self> {
        let schedule: FareSchedule = serde_json::from_str(json)?;
        schedule.validate()?;
        Ok(schedule)
    }

    /// Sets the rates for one vehicle type.
    pub fn with_rates(mut self, vehicle_type: VehicleType, rates: VehicleRates) -> Self {
        match vehicle_type {
            VehicleType::Car => self.car = rates,
            VehicleType::Bike => self.bike = rates,
        }
        self
    }

    /// Sets the free parking threshold.
    pub fn with_grace_period_minutes(mut self, minutes: f64) -> Self {
        self.grace_period_minutes = minutes;
        self
    }

    /// Sets the recurring-customer discount fraction.
    pub fn with_discount_rate(mut self, rate: f64) -> Self {
        self.discount_rate = rate;
        self
    }

    /// Rates for a vehicle type.
    pub fn rates(&self, vehicle_type: VehicleType) -> VehicleRates {
        match vehicle_type {
            VehicleType::Car => self.car,
            VehicleType::Bike => self.bike,
        }
    }

    /// Free parking threshold in minutes.
    pub fn grace_period_minutes(&self) -> f64 {
        self.grace_period_minutes
    }

    /// Free parking threshold in hours.
    pub fn grace_period_hours(&self) -> f64 {
        self.grace_period_minutes / 60.0
    }

    /// Discount fraction for recurring customers.
    pub fn discount_rate(&self) -> f64 {
        self.discount_rate
    }

    pub(crate) fn hourly_rate_decimal(&self, vehicle_type: VehicleType) -> FareResult<Decimal> {
        let per_hour = self.rates(vehicle_type).per_hour;
        decimal_from_f64(per_hour).ok_or_else(|| {
            invalid(format!("{vehicle_type} rate per hour {per_hour} is out of range"))
        })
    }

    pub(crate) fn grace_period_millis_decimal(&self) -> FareResult<Decimal> {
        decimal_from_f64(self.grace_period_minutes)
            .and_then(|minutes| minutes.checked_mul(Decimal::from(60_000)))
            .ok_or_else(|| {
                invalid(format!(
                    "grace period {} minutes is out of range",
                    self.grace_period_minutes
                ))
            })
    }

    pub(crate) fn discount_rate_decimal(&self) -> FareResult<Decimal> {
        decimal_from_f64(self.discount_rate).ok_or_else(|| {
            invalid(format!("discount rate {} is out of range", self.discount_rate))
        })
    }

    /// Checks rates, grace period, and discount rate.
    pub fn validate(&self) -> FareResult<()> {
        for vt in VehicleType::ALL {
            self.rates(vt).validate(vt)?;
        }
        if !self.grace_period_minutes.is_finite() || self.grace_period_minutes < 0.0 {
            return Err(invalid(format!(
                "grace period must be finite and non-negative, got {}",
                self.grace_period_minutes
            )));
        }
        self.grace_period_millis_decimal()?;
        if !(0.0..1.0).contains(&self.discount_rate) {
            return Err(invalid(format!(
                "discount rate must be in [0, 1), got {}",
                self.discount_rate
            )));
        }
        self.discount_rate_decimal()?;
        Ok(())
    }
}

impl Default for FareSchedule {
    fn default() -> Self {
        Self {
            car: VehicleRates::canonical(VehicleType::Car),
            bike: VehicleRates::canonical(VehicleType::Bike),
            grace_period_minutes: GRACE_PERIOD_MINUTES,
            discount_rate: DISCOUNT_RATE,
        }
    }
}

fn invalid(reason: String) -> FareError {
    FareError::InvalidSchedule { reason }
}
