//! Fare calculator: base fare, loyalty discount, and final rounding.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::{BaseFare, FareSchedule, Price};
use crate::error::{FareError, FareResult};
use crate::models::Ticket;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Computes parking fares from tickets.
///
/// Fares are computed in decimal arithmetic from whole milliseconds, so
/// exact midpoints such as 1.425 round up.
///
/// Pricing runs in two phases. [`compute_base_fare`](Self::compute_base_fare)
/// validates the ticket and applies the hourly rate and the grace period;
/// [`apply_discount`](Self::apply_discount) consumes the resulting
/// [`BaseFare`], applies the recurring-customer discount and rounds.
/// [`calculate_fare`](Self::calculate_fare) runs both and stores the price
/// on the ticket.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use u_parking::fare::FareCalculator;
/// use u_parking::models::{ParkingSpot, Ticket, VehicleType};
///
/// let now = Utc::now();
/// let mut ticket = Ticket::new(ParkingSpot::new(1, VehicleType::Car), now - Duration::minutes(60))
///     .with_exit_time(now);
///
/// let calculator = FareCalculator::new();
/// let price = calculator.calculate_fare(&mut ticket, false).unwrap();
/// assert_eq!(price.amount(), 1.5);
/// assert_eq!(ticket.price(), Some(price));
/// ```
#[derive(Debug, Clone)]
pub struct FareCalculator {
    schedule: FareSchedule,
    grace_period_millis: Decimal,
    discount_factor: Decimal,
}

impl FareCalculator {
    /// Creates a calculator with the default schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calculator with a validated custom schedule.
    pub fn with_schedule(schedule: FareSchedule) -> FareResult<Self> {
        schedule.validate()?;
        let grace_period_millis = schedule.grace_period_millis_decimal()?;
        let discount_factor = Decimal::ONE - schedule.discount_rate_decimal()?;
        Ok(Self {
            schedule,
            grace_period_millis,
            discount_factor,
        })
    }

    /// The schedule in use.
    pub fn schedule(&self) -> &FareSchedule {
        &self.schedule
    }

    /// Validates a ticket and computes its undiscounted fare.
    ///
    /// Stays no longer than the grace period cost nothing. Otherwise the
    /// fare is the duration in fractional hours times the hourly rate.
    ///
    /// # Errors
    ///
    /// - [`FareError::InvalidVehicleType`] if the spot has no vehicle type
    /// - [`FareError::MissingExitTime`] if the ticket is not checked out
    /// - [`FareError::InvalidTimeRange`] if exit precedes entry
    pub fn compute_base_fare(&self, ticket: &Ticket) -> FareResult<BaseFare> {
        let spot = ticket.parking_spot();
        let vehicle_type = spot
            .vehicle_type()
            .ok_or(FareError::InvalidVehicleType { spot_id: spot.id() })?;
        let entry = ticket.entry_time();
        let exit = ticket.exit_time().ok_or(FareError::MissingExitTime)?;
        if exit < entry {
            return Err(FareError::InvalidTimeRange { entry, exit });
        }

        let duration_ms = (exit - entry).num_milliseconds();
        let duration_hours = duration_ms as f64 / MILLIS_PER_HOUR as f64;
        let elapsed = Decimal::from(duration_ms);
        if elapsed <= self.grace_period_millis {
            debug!(%vehicle_type, duration_hours, "stay within grace period");
            return Ok(BaseFare::free(duration_hours, vehicle_type));
        }

        let rate = self.schedule.hourly_rate_decimal(vehicle_type)?;
        let amount = elapsed
            .checked_mul(rate)
            .and_then(|total| total.checked_div(Decimal::from(MILLIS_PER_HOUR)))
            .ok_or(FareError::FareOverflow {
                duration_ms,
                rate: self.schedule.rates(vehicle_type).per_hour,
            })?;
        debug!(%vehicle_type, duration_hours, %amount, "computed base fare");
        Ok(BaseFare::charged(amount, duration_hours, vehicle_type))
    }

    /// Applies the recurring-customer discount if `eligible`, then rounds.
    ///
    /// Consumes the base fare, so the discount cannot be applied twice.
    pub fn apply_discount(&self, base: BaseFare, eligible: bool) -> Price {
        // discount_factor is in (0, 1], so the product cannot overflow
        let amount = if eligible {
            base.amount() * self.discount_factor
        } else {
            base.amount()
        };
        let price = Price::from_decimal(amount);
        debug!(eligible, %price, "final price");
        price
    }

    /// Prices a ticket and stores the result on it.
    ///
    /// On error the ticket is left untouched.
    pub fn calculate_fare(&self, ticket: &mut Ticket, discount_eligible: bool) -> FareResult<Price> {
        let base = self.compute_base_fare(ticket).inspect_err(|e| {
            warn!(ticket_id = ?ticket.id(), error = %e, "fare calculation rejected");
        })?;
        let price = self.apply_discount(base, discount_eligible);
        ticket.set_price(price);
        Ok(price)
    }

    /// Prices a ticket using its own recurring-customer flag for the discount.
    pub fn calculate_ticket_fare(&self, ticket: &mut Ticket) -> FareResult<Price> {
        let eligible = ticket.is_recurring();
        self.calculate_fare(ticket, eligible)
    }
}

impl Default for FareCalculator {
    fn default() -> Self {
        Self {
            schedule: FareSchedule::default(),
            grace_period_millis: Decimal::from(30 * 60_000),
            discount_factor: Decimal::new(95, 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fare::VehicleRates;
    use crate::models::{ParkingSpot, VehicleType, CAR_RATE_PER_MINUTE};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn exit() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 18, 0, 0).unwrap()
    }

    fn ticket(vehicle_type: VehicleType, minutes: i64) -> Ticket {
        Ticket::new(
            ParkingSpot::new(1, vehicle_type),
            exit() - Duration::minutes(minutes),
        )
        .with_exit_time(exit())
    }

    #[test]
    fn test_base_fare_one_hour() {
        let calc = FareCalculator::new();
        let base = calc.compute_base_fare(&ticket(VehicleType::Car, 60)).unwrap();
        assert_eq!(base.amount(), Decimal::new(15, 1));
        assert!((base.duration_hours() - 1.0).abs() < 1e-10);
        assert_eq!(base.vehicle_type(), VehicleType::Car);
    }

    #[test]
    fn test_grace_period_boundary() {
        let calc = FareCalculator::new();
        let at_limit = calc.compute_base_fare(&ticket(VehicleType::Car, 30)).unwrap();
        assert!(at_limit.is_free());

        let mut t = ticket(VehicleType::Car, 30);
        t.check_out(exit() + Duration::milliseconds(1));
        let over = calc.compute_base_fare(&t).unwrap();
        assert!(!over.is_free());
    }

    #[test]
    fn test_zero_duration_is_free() {
        let calc = FareCalculator::new();
        let mut t = ticket(VehicleType::Bike, 0);
        let price = calc.calculate_fare(&mut t, true).unwrap();
        assert!(price.is_zero());
        assert_eq!(t.price(), Some(Price::ZERO));
    }

    #[test]
    fn test_missing_vehicle_type() {
        let calc = FareCalculator::new();
        let mut t = Ticket::new(ParkingSpot::untyped(7), exit() - Duration::hours(1))
            .with_exit_time(exit());
        let err = calc.calculate_fare(&mut t, false).unwrap_err();
        assert!(matches!(err, FareError::InvalidVehicleType { spot_id: 7 }));
        assert!(t.price().is_none());
    }

    #[test]
    fn test_vehicle_type_checked_before_time_range() {
        let calc = FareCalculator::new();
        let t = Ticket::new(ParkingSpot::untyped(2), exit() + Duration::hours(1))
            .with_exit_time(exit());
        assert!(matches!(
            calc.compute_base_fare(&t).unwrap_err(),
            FareError::InvalidVehicleType { .. }
        ));
    }

    #[test]
    fn test_missing_exit_time() {
        let calc = FareCalculator::new();
        let mut t = Ticket::new(ParkingSpot::new(1, VehicleType::Car), exit());
        let err = calc.calculate_fare(&mut t, false).unwrap_err();
        assert!(matches!(err, FareError::MissingExitTime));
        assert!(t.price().is_none());
    }

    #[test]
    fn test_exit_before_entry() {
        let calc = FareCalculator::new();
        let mut t = ticket(VehicleType::Bike, -60);
        let err = calc.calculate_fare(&mut t, false).unwrap_err();
        assert!(matches!(err, FareError::InvalidTimeRange { .. }));
        assert!(t.price().is_none());
    }

    #[test]
    fn test_discount_applied_once() {
        let calc = FareCalculator::new();
        let base = calc.compute_base_fare(&ticket(VehicleType::Car, 120)).unwrap();
        let price = calc.apply_discount(base, true);
        let expected = (120.0 * CAR_RATE_PER_MINUTE) - (CAR_RATE_PER_MINUTE * 120.0 * 0.05);
        assert_eq!(price.amount(), crate::fare::format_price(expected));
        assert_eq!(price.amount(), 2.85);
    }

    #[test]
    fn test_midpoint_rounds_up() {
        let calc = FareCalculator::new();
        // 57 min at 1.5/hour is exactly 1.425
        let mut t = ticket(VehicleType::Car, 57);
        assert_eq!(calc.calculate_fare(&mut t, false).unwrap().amount(), 1.43);
        // 60 min discounted is exactly 1.425
        let mut t = ticket(VehicleType::Car, 60);
        assert_eq!(calc.calculate_fare(&mut t, true).unwrap().amount(), 1.43);
        // 84 min discounted is exactly 1.995
        let mut t = ticket(VehicleType::Car, 84);
        assert_eq!(calc.calculate_fare(&mut t, true).unwrap().amount(), 2.0);
    }

    #[test]
    fn test_base_fare_exact_amount() {
        let calc = FareCalculator::new();
        let base = calc.compute_base_fare(&ticket(VehicleType::Car, 57)).unwrap();
        assert_eq!(base.amount(), Decimal::new(1425, 3));
    }

    #[test]
    fn test_zero_rate_past_grace_is_not_free() {
        let schedule = FareSchedule::default().with_rates(
            VehicleType::Bike,
            VehicleRates {
                per_hour: 0.0,
                per_minute: 0.0,
            },
        );
        let calc = FareCalculator::with_schedule(schedule).unwrap();
        let base = calc.compute_base_fare(&ticket(VehicleType::Bike, 120)).unwrap();
        assert!(!base.is_free());
        assert!(calc.apply_discount(base, false).is_zero());
    }

    #[test]
    fn test_fare_overflow_rejected() {
        let schedule = FareSchedule::default().with_rates(
            VehicleType::Car,
            VehicleRates {
                per_hour: 1e28,
                per_minute: 1e28 / 60.0,
            },
        );
        let calc = FareCalculator::with_schedule(schedule).unwrap();
        let mut t = ticket(VehicleType::Car, 120);
        let err = calc.calculate_fare(&mut t, false).unwrap_err();
        assert!(matches!(err, FareError::FareOverflow { duration_ms: 7_200_000, .. }));
        assert!(t.price().is_none());
    }

    #[test]
    fn test_default_matches_default_schedule() {
        let built = FareCalculator::with_schedule(FareSchedule::default()).unwrap();
        let default = FareCalculator::default();
        assert_eq!(built.grace_period_millis, default.grace_period_millis);
        assert_eq!(built.discount_factor, default.discount_factor);
        assert_eq!(built.schedule, default.schedule);
    }

    #[test]
    fn test_discount_not_eligible() {
        let calc = FareCalculator::new();
        let base = calc.compute_base_fare(&ticket(VehicleType::Car, 120)).unwrap();
        assert_eq!(calc.apply_discount(base, false).amount(), 3.0);
    }

    #[test]
    fn test_ticket_recurring_flag() {
        let calc = FareCalculator::new();
        let mut t = ticket(VehicleType::Bike, 120).with_recurring(true);
        assert_eq!(calc.calculate_ticket_fare(&mut t).unwrap().amount(), 1.9);
        let mut t = ticket(VehicleType::Bike, 120);
        assert_eq!(calc.calculate_ticket_fare(&mut t).unwrap().amount(), 2.0);
    }

    #[test]
    fn test_custom_schedule() {
        let schedule = FareSchedule::default()
            .with_rates(
                VehicleType::Car,
                VehicleRates {
                    per_hour: 3.0,
                    per_minute: 0.05,
                },
            )
            .with_grace_period_minutes(0.0)
            .with_discount_rate(0.1);
        let calc = FareCalculator::with_schedule(schedule).unwrap();
        let mut t = ticket(VehicleType::Car, 20);
        assert_eq!(calc.calculate_fare(&mut t, false).unwrap().amount(), 1.0);
        let mut t = ticket(VehicleType::Car, 60);
        assert_eq!(calc.calculate_fare(&mut t, true).unwrap().amount(), 2.7);
    }

    #[test]
    fn test_invalid_schedule_rejected() {
        let schedule = FareSchedule::default().with_discount_rate(2.0);
        assert!(matches!(
            FareCalculator::with_schedule(schedule).unwrap_err(),
            FareError::InvalidSchedule { .. }
        ));
    }
}
