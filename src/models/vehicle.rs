//! Vehicle type with its canonical parking rates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FareError;

/// Car rate per hour of parking.
pub const CAR_RATE_PER_HOUR: f64 = 1.5;
/// Car rate per minute of parking.
pub const CAR_RATE_PER_MINUTE: f64 = 0.025;
/// Bike rate per hour of parking.
pub const BIKE_RATE_PER_HOUR: f64 = 1.0;
/// Bike rate per minute of parking.
pub const BIKE_RATE_PER_MINUTE: f64 = 1.0 / 60.0;

/// The kind of vehicle a parking spot is sized for.
///
/// Both the hourly and the per-minute rate are stored as separate
/// constants so neither is derived from the other at runtime.
///
/// # Examples
///
/// ```
/// use u_parking::models::VehicleType;
///
/// let car: VehicleType = "car".parse().unwrap();
/// assert_eq!(car, VehicleType::Car);
/// assert_eq!(car.rate_per_hour(), 1.5);
/// assert_eq!(car.rate_per_minute(), 0.025);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    /// Passenger car.
    Car,
    /// Bicycle or motorbike.
    Bike,
}

impl VehicleType {
    /// All vehicle types, in declaration order.
    pub const ALL: [VehicleType; 2] = [VehicleType::Car, VehicleType::Bike];

    /// Canonical rate per hour.
    pub fn rate_per_hour(self) -> f64 {
        match self {
            VehicleType::Car => CAR_RATE_PER_HOUR,
            VehicleType::Bike => BIKE_RATE_PER_HOUR,
        }
    }

    /// Canonical rate per minute.
    pub fn rate_per_minute(self) -> f64 {
        match self {
            VehicleType::Car => CAR_RATE_PER_MINUTE,
            VehicleType::Bike => BIKE_RATE_PER_MINUTE,
        }
    }

    /// Lowercase name, as used in serialized schedules.
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleType::Car => "car",
            VehicleType::Bike => "bike",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = FareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car" => Ok(VehicleType::Car),
            "bike" => Ok(VehicleType::Bike),
            _ => Err(FareError::UnknownVehicleType {
                value: s.to_string(),
            }),
        }
    }
}
