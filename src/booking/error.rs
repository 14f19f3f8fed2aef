//! Validation errors raised while turning form input into booking values.

use thiserror::Error;

/// Booking input error types
///
/// The calculator functions themselves are total. These errors only come
/// from parsing raw input-control values and from building payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("Invalid timestamp '{0}', expected YYYY-MM-DDTHH:MM")]
    InvalidTimePoint(String),

    #[error("Slot interval of {0} minutes does not divide an hour")]
    InvalidInterval(u32),

    #[error("Invalid payload: {0}")]
    Payload(String),
}

impl BookingError {
    /// Short machine-readable tag used in JSON error bodies
    pub fn error_type(&self) -> &'static str {
        match self {
            BookingError::InvalidDate(_) => "invalid_date",
            BookingError::InvalidTime(_) => "invalid_time",
            BookingError::InvalidTimePoint(_) => "invalid_timestamp",
            BookingError::InvalidInterval(_) => "invalid_interval",
            BookingError::Payload(_) => "invalid_payload",
        }
    }
}
