//! Booking window and fee module.
//!
//! Shared by the elevator booking and amenity reservation forms: snaps
//! user-entered dates and times to the booking grid, formats them back for
//! the browser's date/time inputs, prices elevator moves, and builds the
//! form payloads the backend accepts.

pub mod calculators;
pub mod error;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{
    combine_date_and_time, combine_time_into_date, compute_move_fee, format_date_for_input,
    format_time_for_input, round_to_interval, FeeBreakdown,
};
pub use error::BookingError;
pub use models::{BookingKind, BookingWindow, SlotInterval, TimePoint};
pub use routes::router;
pub use services::{apply_edit, default_window, WindowEdit};
