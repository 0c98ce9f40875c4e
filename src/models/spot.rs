//! Parking spot type.

use serde::{Deserialize, Serialize};

use super::VehicleType;

/// A physical parking space.
///
/// The vehicle type may be unset; pricing a ticket on such a spot fails
/// with [`FareError::InvalidVehicleType`](crate::FareError::InvalidVehicleType).
///
/// # Examples
///
/// ```
/// use u_parking::models::{ParkingSpot, VehicleType};
///
/// let spot = ParkingSpot::new(1, VehicleType::Car);
/// assert_eq!(spot.id(), 1);
/// assert_eq!(spot.vehicle_type(), Some(VehicleType::Car));
/// assert!(spot.is_available());
///
/// let untyped = ParkingSpot::untyped(2);
/// assert!(untyped.vehicle_type().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingSpot {
    id: u32,
    vehicle_type: Option<VehicleType>,
    available: bool,
}

impl ParkingSpot {
    /// Creates an available spot for the given vehicle type.
    pub fn new(id: u32, vehicle_type: VehicleType) -> Self {
        Self {
            id,
            vehicle_type: Some(vehicle_type),
            available: true,
        }
    }

    /// Creates an available spot whose vehicle type is not set.
    pub fn untyped(id: u32) -> Self {
        Self {
            id,
            vehicle_type: None,
            available: true,
        }
    }

    /// Sets the availability flag.
    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Spot number.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Vehicle type this spot is for, if set.
    pub fn vehicle_type(&self) -> Option<VehicleType> {
        self.vehicle_type
    }

    /// Whether the spot is free to be assigned.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Marks the spot as taken or free.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }
}
