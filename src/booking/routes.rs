//! Booking API routes.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Form, Json, Router,
};
use chrono::Local;

use crate::error::Result;
use crate::AppState;

use super::calculators::compute_move_fee;
use super::requests::{
    AmenityReservationRequest, DefaultWindowQuery, EditWindowRequest, ElevatorBookingRequest,
    FeeRequest,
};
use super::responses::{BookingWindowResponse, FeeResponse};
use super::services::{
    apply_edit, default_window, quote, AmenityReservationSubmission, ElevatorBookingSubmission,
};

/// Routes mounted under `/booking`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/window/default", get(default_window_handler))
        .route("/window", post(edit_window))
        .route("/fee", post(fee))
        .route("/elevator/payload", post(elevator_payload))
        .route("/amenity/payload", post(amenity_payload))
}

/// Initial window for a new booking form
async fn default_window_handler(
    State(state): State<AppState>,
    Query(query): Query<DefaultWindowQuery>,
) -> Json<BookingWindowResponse> {
    let window = default_window(Local::now().naive_local());
    Json(BookingWindowResponse::new(
        &quote(query.kind, window),
        &state.config.fee_currency,
    ))
}

/// Apply one form edit and return the replacement window
async fn edit_window(
    State(state): State<AppState>,
    Json(request): Json<EditWindowRequest>,
) -> Result<Json<BookingWindowResponse>> {
    let edit = request.edit()?;
    let window = apply_edit(&request.window, edit);
    tracing::debug!(
        field = ?request.field,
        start = %window.start,
        end = %window.end,
        "Applied booking window edit"
    );

    Ok(Json(BookingWindowResponse::new(
        &quote(request.kind, window),
        &state.config.fee_currency,
    )))
}

/// Price a window
async fn fee(
    State(state): State<AppState>,
    Json(request): Json<FeeRequest>,
) -> Json<FeeResponse> {
    let fee = compute_move_fee(request.kind, &request.window);
    Json(FeeResponse::new(&fee, &state.config.fee_currency))
}

/// Form-encoded elevator booking payload, as the backend expects it
async fn elevator_payload(
    Json(request): Json<ElevatorBookingRequest>,
) -> Result<Form<ElevatorBookingSubmission>> {
    let submission = ElevatorBookingSubmission::build(&request, &Local)?;
    tracing::info!(
        is_move = submission.is_move,
        fee = %submission.fee,
        "Built elevator booking payload"
    );
    Ok(Form(submission))
}

/// Form-encoded amenity reservation payload
async fn amenity_payload(
    Json(request): Json<AmenityReservationRequest>,
) -> Result<Form<AmenityReservationSubmission>> {
    let submission = AmenityReservationSubmission::build(&request, &Local)?;
    Ok(Form(submission))
}
