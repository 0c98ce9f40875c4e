//! Fare calculation.
//!
//! - [`FareCalculator`] — two-phase pricing of a [`Ticket`](crate::models::Ticket)
//! - [`FareSchedule`] — rates, grace period, and discount configuration
//! - [`format_price`] — half-up rounding to two decimals

mod calculator;
mod price;
mod schedule;

pub use calculator::FareCalculator;
pub use price::{format_price, BaseFare, Price};
pub use schedule::{FareSchedule, VehicleRates, DISCOUNT_RATE, GRACE_PERIOD_MINUTES};
