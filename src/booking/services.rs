//! Booking form services.
//!
//! The booking form holds one immutable `BookingWindow`. Every edit produces a
//! new window from the old one; nothing here keeps state between calls.

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Timelike,
};
use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::{
    combine_date_and_time, combine_time_into_date, compute_move_fee, round_to_interval,
    FeeBreakdown,
};
use super::error::BookingError;
use super::models::{BookingKind, BookingWindow, SlotInterval, TimePoint};
use super::requests::{AmenityReservationRequest, ElevatorBookingRequest};

/// Length of the window a new form starts with
pub const DEFAULT_WINDOW_MINUTES: i64 = 30;

/// A single change made in the booking form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEdit {
    /// Date field changed; applies to both ends of the window
    Date(NaiveDate),
    StartTime(NaiveTime),
    EndTime(NaiveTime),
}

/// Window a new booking form starts with: now until half an hour later,
/// both snapped to the grid.
pub fn default_window(now: NaiveDateTime) -> BookingWindow {
    let start = TimePoint::from_naive(now);
    let end = TimePoint::from_naive(now + TimeDelta::minutes(DEFAULT_WINDOW_MINUTES));
    BookingWindow::new(
        round_to_interval(start, SlotInterval::QUARTER_HOUR),
        round_to_interval(end, SlotInterval::QUARTER_HOUR),
    )
}

/// Apply one form edit, returning the replacement window.
///
/// End-before-start is not rejected here; the backend validates ordering
/// when the booking is submitted.
pub fn apply_edit(window: &BookingWindow, edit: WindowEdit) -> BookingWindow {
    match edit {
        WindowEdit::Date(date) => BookingWindow::new(
            combine_date_and_time(date, window.start),
            combine_date_and_time(date, window.end),
        ),
        WindowEdit::StartTime(time) => BookingWindow::new(
            combine_time_into_date(window.start, time.hour(), time.minute()),
            window.end,
        ),
        WindowEdit::EndTime(time) => BookingWindow::new(
            window.start,
            combine_time_into_date(window.end, time.hour(), time.minute()),
        ),
    }
}

/// A window together with its fee, if the booking kind is charged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingQuote {
    pub kind: BookingKind,
    pub window: BookingWindow,
    pub fee: Option<FeeBreakdown>,
}

pub fn quote(kind: BookingKind, window: BookingWindow) -> BookingQuote {
    let fee = kind
        .charges_fee()
        .then(|| compute_move_fee(kind, &window));
    BookingQuote { kind, window, fee }
}

/// Form fields posted to the backend for an elevator booking.
///
/// Optional contact fields are left out of the payload entirely when the
/// resident did not fill them in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElevatorBookingSubmission {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub is_move: bool,
    pub is_delivery: bool,
    #[serde(with = "rust_decimal::serde::str")]
    pub fee: Decimal,
    pub name: String,
    pub unit: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_occupant_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub night_phone: Option<String>,
}

impl ElevatorBookingSubmission {
    /// Build the payload, resolving wall-clock times in `tz`.
    pub fn build<Tz: TimeZone>(
        request: &ElevatorBookingRequest,
        tz: &Tz,
    ) -> Result<Self, BookingError> {
        let contact = &request.contact;
        let name = required("name", &contact.name)?;
        let unit = required("unit", &contact.unit)?;
        let phone = required("phone", &contact.phone)?;

        let fee = compute_move_fee(request.kind, &request.window).total;

        Ok(Self {
            start: request.window.start.to_zoned(tz).fixed_offset(),
            end: request.window.end.to_zoned(tz).fixed_offset(),
            is_move: request.kind == BookingKind::Move,
            is_delivery: request.kind == BookingKind::DeliveryDisposal,
            fee,
            name,
            unit,
            phone,
            second_occupant_name: contact.second_occupant_name(),
            night_phone: contact.night_phone(),
        })
    }
}

/// Form fields posted to the backend for an amenity reservation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmenityReservationSubmission {
    pub amenity_id: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl AmenityReservationSubmission {
    pub fn build<Tz: TimeZone>(
        request: &AmenityReservationRequest,
        tz: &Tz,
    ) -> Result<Self, BookingError> {
        Ok(Self {
            amenity_id: required("amenity_id", &request.amenity_id)?,
            start: request.window.start.to_zoned(tz).fixed_offset(),
            end: request.window.end.to_zoned(tz).fixed_offset(),
        })
    }
}

fn required(field: &str, value: &str) -> Result<String, BookingError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BookingError::Payload(format!("'{field}' is required")));
    }
    Ok(trimmed.to_string())
}
