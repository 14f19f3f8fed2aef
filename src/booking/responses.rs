//! Response DTOs for booking endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::{format_date_for_input, format_time_for_input, FeeBreakdown};
use super::models::{BookingKind, BookingWindow, TimePoint};
use super::services::BookingQuote;

/// Money value for JSON responses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyResponse {
    pub fn new(amount: Decimal, currency: &str) -> Self {
        Self {
            amount,
            currency: currency.to_string(),
        }
    }
}

/// Response for fee calculation
#[derive(Debug, Serialize)]
pub struct FeeResponse {
    pub total: MoneyResponse,
    pub deposit: MoneyResponse,
    pub base_cost: MoneyResponse,
    pub extra_cost: MoneyResponse,
    pub billable_hours: i64,
    pub extra_hours: i64,
}

impl FeeResponse {
    pub fn new(fee: &FeeBreakdown, currency: &str) -> Self {
        Self {
            total: MoneyResponse::new(fee.total, currency),
            deposit: MoneyResponse::new(fee.deposit, currency),
            base_cost: MoneyResponse::new(fee.base_cost, currency),
            extra_cost: MoneyResponse::new(fee.extra_cost, currency),
            billable_hours: fee.billable_hours,
            extra_hours: fee.extra_hours,
        }
    }
}

/// Window state for the booking form, with values ready for the input controls
#[derive(Debug, Serialize)]
pub struct BookingWindowResponse {
    pub kind: BookingKind,
    pub start: TimePoint,
    pub end: TimePoint,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<FeeResponse>,
}

impl BookingWindowResponse {
    pub fn new(quote: &BookingQuote, currency: &str) -> Self {
        let BookingWindow { start, end } = quote.window;
        Self {
            kind: quote.kind,
            start,
            end,
            date: format_date_for_input(start),
            start_time: format_time_for_input(start),
            end_time: format_time_for_input(end),
            fee: quote.fee.as_ref().map(|fee| FeeResponse::new(fee, currency)),
        }
    }
}
