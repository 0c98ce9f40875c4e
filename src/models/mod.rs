//! Domain model types for parking fares.
//!
//! Provides the vehicle types with their canonical rates, the parking spots
//! they occupy, and the tickets that record each stay.

mod spot;
mod ticket;
mod vehicle;

pub use spot::ParkingSpot;
pub use ticket::Ticket;
pub use vehicle::{
    VehicleType, BIKE_RATE_PER_HOUR, BIKE_RATE_PER_MINUTE, CAR_RATE_PER_HOUR,
    CAR_RATE_PER_MINUTE,
};
