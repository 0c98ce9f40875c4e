//! # u-parking
//!
//! Parking fare calculation: given a ticket's entry and exit time and the
//! vehicle type of its spot, computes the price owed, with a free grace
//! period, a recurring-customer discount, and half-up rounding to cents.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (VehicleType, ParkingSpot, Ticket)
//! - [`fare`] — Fare calculator, schedule, and price rounding
//! - [`error`] — Error taxonomy for rejected calculations

pub mod error;
pub mod fare;
pub mod models;

pub use error::{FareError, FareResult};
