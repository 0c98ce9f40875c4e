//! Parking ticket type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ParkingSpot;
use crate::fare::Price;

/// A parking ticket: one stay of one vehicle in one spot.
///
/// Created at entry with an open exit; the exit time is set at checkout and
/// the price is written by [`FareCalculator`](crate::fare::FareCalculator).
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use u_parking::models::{ParkingSpot, Ticket, VehicleType};
///
/// let now = Utc::now();
/// let mut ticket = Ticket::new(ParkingSpot::new(1, VehicleType::Car), now - Duration::hours(1))
///     .with_vehicle_reg_number("ABCDEF");
/// assert!(ticket.exit_time().is_none());
///
/// ticket.check_out(now);
/// assert_eq!(ticket.exit_time(), Some(now));
/// assert!(ticket.price().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    id: Option<u64>,
    vehicle_reg_number: String,
    parking_spot: ParkingSpot,
    entry_time: DateTime<Utc>,
    exit_time: Option<DateTime<Utc>>,
    price: Option<Price>,
    recurring: bool,
}

impl Ticket {
    /// Creates an open ticket for a vehicle entering `parking_spot`.
    pub fn new(parking_spot: ParkingSpot, entry_time: DateTime<Utc>) -> Self {
        Self {
            id: None,
            vehicle_reg_number: String::new(),
            parking_spot,
            entry_time,
            exit_time: None,
            price: None,
            recurring: false,
        }
    }

    /// Sets the ticket id assigned by the ticket store.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the vehicle registration number.
    pub fn with_vehicle_reg_number(mut self, reg: impl Into<String>) -> Self {
        self.vehicle_reg_number = reg.into();
        self
    }

    /// Sets the exit time.
    pub fn with_exit_time(mut self, exit_time: DateTime<Utc>) -> Self {
        self.exit_time = Some(exit_time);
        self
    }

    /// Flags the ticket as belonging to a recurring customer.
    pub fn with_recurring(mut self, recurring: bool) -> Self {
        self.recurring = recurring;
        self
    }

    /// Records the vehicle leaving at `exit_time`.
    pub fn check_out(&mut self, exit_time: DateTime<Utc>) {
        self.exit_time = Some(exit_time);
    }

    /// Ticket id, if persisted.
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    /// Vehicle registration number.
    pub fn vehicle_reg_number(&self) -> &str {
        &self.vehicle_reg_number
    }

    /// The spot this ticket occupies.
    pub fn parking_spot(&self) -> &ParkingSpot {
        &self.parking_spot
    }

    /// Entry timestamp.
    pub fn entry_time(&self) -> DateTime<Utc> {
        self.entry_time
    }

    /// Exit timestamp, once checked out.
    pub fn exit_time(&self) -> Option<DateTime<Utc>> {
        self.exit_time
    }

    /// Computed price, once calculated.
    pub fn price(&self) -> Option<Price> {
        self.price
    }

    /// Whether the customer is a recurring one (eligible for the discount).
    pub fn is_recurring(&self) -> bool {
        self.recurring
    }

    /// Sets the recurring-customer flag.
    pub fn set_recurring(&mut self, recurring: bool) {
        self.recurring = recurring;
    }

    pub(crate) fn set_price(&mut self, price: Price) {
        self.price = Some(price);
    }
}
