//! Request DTOs for booking endpoints.

use serde::Deserialize;

use super::calculators::{parse_date_input, parse_time_input};
use super::error::BookingError;
use super::models::{BookingKind, BookingWindow};
use super::services::WindowEdit;

/// Query for the initial window of a new booking form
#[derive(Debug, Default, Deserialize)]
pub struct DefaultWindowQuery {
    #[serde(default)]
    pub kind: BookingKind,
}

/// Which form field the resident changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditField {
    Date,
    StartTime,
    EndTime,
}

/// Request to apply one form edit to the current window
#[derive(Debug, Deserialize)]
pub struct EditWindowRequest {
    #[serde(default)]
    pub kind: BookingKind,
    pub window: BookingWindow,
    pub field: EditField,
    /// Raw value of the input control
    pub value: String,
}

impl EditWindowRequest {
    /// Parse the raw input value into a typed edit
    pub fn edit(&self) -> Result<WindowEdit, BookingError> {
        match self.field {
            EditField::Date => parse_date_input(&self.value).map(WindowEdit::Date),
            EditField::StartTime => parse_time_input(&self.value).map(WindowEdit::StartTime),
            EditField::EndTime => parse_time_input(&self.value).map(WindowEdit::EndTime),
        }
    }
}

/// Request to price a window
#[derive(Debug, Deserialize)]
pub struct FeeRequest {
    pub kind: BookingKind,
    pub window: BookingWindow,
}

/// Resident contact details as posted by the elevator booking form
///
/// Optional inputs may arrive missing, null, or as empty strings; all three
/// mean "not provided".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResidentContactRequest {
    pub name: String,
    pub unit: String,
    pub phone: String,
    #[serde(default)]
    pub second_occupant_name: Option<String>,
    #[serde(default)]
    pub night_phone: Option<String>,
}

impl ResidentContactRequest {
    pub fn second_occupant_name(&self) -> Option<String> {
        non_blank(self.second_occupant_name.as_deref())
    }

    pub fn night_phone(&self) -> Option<String> {
        non_blank(self.night_phone.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Request to build an elevator booking submission
#[derive(Debug, Deserialize)]
pub struct ElevatorBookingRequest {
    pub kind: BookingKind,
    pub window: BookingWindow,
    pub contact: ResidentContactRequest,
}

/// Request to build an amenity reservation submission
#[derive(Debug, Deserialize)]
pub struct AmenityReservationRequest {
    pub amenity_id: String,
    pub window: BookingWindow,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn edit_request(field: &str, value: &str) -> EditWindowRequest {
        serde_json::from_value(serde_json::json!({
            "window": {"start": "2025-03-10T09:00", "end": "2025-03-10T09:30"},
            "field": field,
            "value": value,
        }))
        .unwrap()
    }

    #[test]
    fn test_edit_request_defaults_to_delivery() {
        let request = edit_request("date", "2025-03-12");
        assert_eq!(request.kind, BookingKind::DeliveryDisposal);
    }

    #[test]
    fn test_edit_request_parses_value_by_field() {
        assert_eq!(
            edit_request("date", "2025-03-12").edit().unwrap(),
            WindowEdit::Date(NaiveDate::from_ymd_opt(2025, 3, 12).unwrap())
        );
        assert_eq!(
            edit_request("start_time", "10:05").edit().unwrap(),
            WindowEdit::StartTime(NaiveTime::from_hms_opt(10, 5, 0).unwrap())
        );
        assert_eq!(
            edit_request("end_time", "11:40").edit().unwrap(),
            WindowEdit::EndTime(NaiveTime::from_hms_opt(11, 40, 0).unwrap())
        );
    }

    #[test]
    fn test_edit_request_reports_invalid_value() {
        assert_eq!(
            edit_request("date", "10:05").edit(),
            Err(BookingError::InvalidDate("10:05".to_string()))
        );
        assert_eq!(
            edit_request("start_time", "2025-03-12").edit(),
            Err(BookingError::InvalidTime("2025-03-12".to_string()))
        );
    }

    #[test]
    fn test_contact_blank_optionals_are_absent() {
        let contact: ResidentContactRequest = serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "unit": "1204",
            "phone": "555-0100",
            "second_occupant_name": "   ",
            "night_phone": null,
        }))
        .unwrap();
        assert_eq!(contact.second_occupant_name(), None);
        assert_eq!(contact.night_phone(), None);

        let contact = ResidentContactRequest {
            second_occupant_name: Some(" Grace ".to_string()),
            ..Default::default()
        };
        assert_eq!(contact.second_occupant_name(), Some("Grace".to_string()));
    }
}
