//! Core booking window and fee calculation functions.
//!
//! Pure functions - no I/O, no clock access. The form layer feeds raw
//! input-control values through the `parse_*` helpers and keeps the
//! resulting values; everything past parsing is total.

use chrono::{NaiveDate, NaiveTime, Timelike, Weekday};
use rust_decimal::Decimal;

use super::error::BookingError;
use super::models::{BookingKind, BookingWindow, SlotInterval, TimePoint};

/// Refundable deposit included in every move fee
pub const MOVE_DEPOSIT: i64 = 500;

/// Moves are always billed for at least this many hours
pub const MINIMUM_BILLABLE_HOURS: i64 = 4;

const SECONDS_PER_HOUR: i64 = 3600;

/// Round a time point to the nearest slot boundary.
///
/// Halfway values round up. The date is kept, except that rounding past
/// 23:45 on a 15-minute grid carries into 00:00 of the next day.
///
/// # Examples
/// ```
/// use condo_booking_web::booking::{round_to_interval, SlotInterval, TimePoint};
///
/// let point = TimePoint::from_ymd_hm(2025, 3, 10, 9, 8).unwrap();
/// let rounded = round_to_interval(point, SlotInterval::QUARTER_HOUR);
/// assert_eq!(rounded.to_string(), "2025-03-10T09:15");
/// ```
pub fn round_to_interval(point: TimePoint, interval: SlotInterval) -> TimePoint {
    let minutes = i64::from(point.minutes_since_midnight());
    let step = i64::from(interval.minutes());

    // round(minutes / step) with ties up, in integer arithmetic
    let rounded = (2 * minutes + step).div_euclid(2 * step) * step;

    TimePoint::at_minutes_past_midnight(point.date(), rounded)
}

/// Move a time point to another calendar date, keeping its hour and minute.
pub fn combine_date_and_time(date: NaiveDate, reference: TimePoint) -> TimePoint {
    TimePoint::from_naive(date.and_time(reference.time()))
}

/// Replace the hour and minute of a time point and snap it to the 15-minute grid.
///
/// Out-of-range values overflow into later days the same way an hour of 24
/// does after rounding.
pub fn combine_time_into_date(existing: TimePoint, hour: u32, minute: u32) -> TimePoint {
    let minutes = i64::from(hour) * 60 + i64::from(minute);
    let replaced = TimePoint::at_minutes_past_midnight(existing.date(), minutes);
    round_to_interval(replaced, SlotInterval::QUARTER_HOUR)
}

/// Format as the value of an `<input type="date">`: `YYYY-MM-DD`.
pub fn format_date_for_input(point: TimePoint) -> String {
    point.date().format("%Y-%m-%d").to_string()
}

/// Format as the value of an `<input type="time">`: 24-hour `HH:MM`.
pub fn format_time_for_input(point: TimePoint) -> String {
    point.time().format("%H:%M").to_string()
}

/// Parse the value of a date input.
///
/// A bare calendar date carries no timezone, so the result can never be
/// shifted to a neighbouring day.
pub fn parse_date_input(value: &str) -> Result<NaiveDate, BookingError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| BookingError::InvalidDate(value.to_string()))
}

/// Parse the value of a time input. Browsers may append `:SS` when a step is set.
pub fn parse_time_input(value: &str) -> Result<NaiveTime, BookingError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map(|time| time.with_second(0).unwrap_or(time))
        .map_err(|_| BookingError::InvalidTime(value.to_string()))
}

/// Day-of-week price table for moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRate {
    pub base_cost: i64,
    pub extra_per_hour: i64,
}

impl MoveRate {
    pub const SATURDAY: Self = Self {
        base_cost: 300,
        extra_per_hour: 75,
    };

    /// Sunday through Friday. Sunday is deliberately not split out: the
    /// existing price list charges it like any weekday.
    pub const WEEKDAY: Self = Self {
        base_cost: 200,
        extra_per_hour: 50,
    };

    pub fn for_weekday(day: Weekday) -> Self {
        match day {
            Weekday::Sat => Self::SATURDAY,
            _ => Self::WEEKDAY,
        }
    }
}

/// Hours charged for a window: the duration rounded up to whole hours,
/// never less than [`MINIMUM_BILLABLE_HOURS`].
///
/// The duration is read off the wall clock, so a window spanning a DST
/// change bills the hours shown on the form rather than the elapsed time.
pub fn billable_hours(window: &BookingWindow) -> i64 {
    let seconds = window.duration().num_seconds();
    // ceiling division that also holds for negative durations
    let hours = (seconds + SECONDS_PER_HOUR - 1).div_euclid(SECONDS_PER_HOUR);
    hours.max(MINIMUM_BILLABLE_HOURS)
}

/// Breakdown of a booking fee in whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeBreakdown {
    pub deposit: Decimal,
    pub base_cost: Decimal,
    pub billable_hours: i64,
    pub extra_hours: i64,
    pub extra_cost: Decimal,
    pub total: Decimal,
}

impl FeeBreakdown {
    /// Fee for bookings that are not charged.
    pub const fn free() -> Self {
        Self {
            deposit: Decimal::ZERO,
            base_cost: Decimal::ZERO,
            billable_hours: 0,
            extra_hours: 0,
            extra_cost: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}

/// Compute the elevator fee for a booking.
///
/// Non-move bookings are free. Moves pay the deposit, the base cost for the
/// weekday the window *ends* on, and an hourly extra beyond the four-hour
/// minimum. Windows that end before they start are billed the minimum.
pub fn compute_move_fee(kind: BookingKind, window: &BookingWindow) -> FeeBreakdown {
    if !kind.charges_fee() {
        return FeeBreakdown::free();
    }

    let rate = MoveRate::for_weekday(window.end.weekday());
    let billable_hours = billable_hours(window);
    let extra_hours = billable_hours - MINIMUM_BILLABLE_HOURS;

    let deposit = Decimal::from(MOVE_DEPOSIT);
    let base_cost = Decimal::from(rate.base_cost);
    let extra_cost = Decimal::from(rate.extra_per_hour) * Decimal::from(extra_hours);

    FeeBreakdown {
        deposit,
        base_cost,
        billable_hours,
        extra_hours,
        extra_cost,
        total: deposit + base_cost + extra_cost,
    }
}
