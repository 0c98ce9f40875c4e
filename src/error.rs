//! Error types for fare calculation.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type alias for fare operations.
pub type FareResult<T> = Result<T, FareError>;

/// Errors raised while validating or pricing a ticket.
///
/// Every variant is a precondition failure detected before any arithmetic;
/// a ticket is never left partially updated.
#[derive(Error, Debug)]
pub enum FareError {
    /// The ticket's parking spot has no vehicle type.
    #[error("parking spot {spot_id} has no vehicle type")]
    InvalidVehicleType { spot_id: u32 },

    /// A string does not name a known vehicle type.
    #[error("unknown vehicle type '{value}'")]
    UnknownVehicleType { value: String },

    /// The ticket has not been checked out.
    #[error("ticket has no exit time")]
    MissingExitTime,

    /// Exit time is earlier than entry time.
    #[error("exit time {exit} is before entry time {entry}")]
    InvalidTimeRange {
        entry: DateTime<Utc>,
        exit: DateTime<Utc>,
    },

    /// A price amount is negative or not finite.
    #[error("invalid price {value}")]
    InvalidPrice { value: f64 },

    /// The fare does not fit in the decimal range.
    #[error("fare overflows for {duration_ms} ms at {rate} per hour")]
    FareOverflow { duration_ms: i64, rate: f64 },

    /// A fare schedule failed validation.
    #[error("invalid fare schedule: {reason}")]
    InvalidSchedule { reason: String },

    /// A fare schedule could not be parsed.
    #[error("fare schedule JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
