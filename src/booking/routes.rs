//! Booking route handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};

use crate::error::Result;
use crate::AppState;

use super::models::BookingFilter;
use super::requests::{
    CreateBookingRequest, GuestBookingRequest, ListBookingsQuery, QuoteEstimateQuery,
    StatusUpdateRequest,
};
use super::responses::{BookingListResponse, BookingResponse, QuoteEstimateResponse};
use super::services::{self, NewBooking, Payer};

/// Create a booking for a registered member
async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>)> {
    let input = NewBooking {
        service_id: req.service_id,
        scheduled_date: req.scheduled_date,
        scheduled_time: req.scheduled_time,
        address: req.address,
        square_meters: req.square_meters,
        special_instructions: req.special_instructions,
        payer: Payer::Member {
            customer_ref: req.customer_ref,
            name: req.customer_name,
            email: req.customer_email,
            phone: req.customer_phone,
        },
    };

    let booking = services::create_booking(&state.db, &state.cache, input).await?;
    Ok((StatusCode::CREATED, Json(booking.into())))
}

/// Create a guest booking (requires billing address fields)
async fn create_guest_booking(
    State(state): State<AppState>,
    Json(req): Json<GuestBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>)> {
    let billing_address = req.billing_address_line();
    let input = NewBooking {
        service_id: req.service_id,
        scheduled_date: req.scheduled_date,
        scheduled_time: req.scheduled_time,
        address: req.address,
        square_meters: req.square_meters,
        special_instructions: req.special_instructions,
        payer: Payer::Guest {
            name: req.guest_name,
            email: req.guest_email,
            phone: req.guest_phone,
            billing_address,
        },
    };

    let booking = services::create_booking(&state.db, &state.cache, input).await?;
    Ok((StatusCode::CREATED, Json(booking.into())))
}

/// List bookings (admin), filtered by status and/or recency
async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<BookingListResponse>> {
    let filter = BookingFilter {
        status: query.status,
        recent: query.recent.unwrap_or(false),
    };

    let bookings = services::list_bookings(&state.db, filter).await?;
    Ok(Json(BookingListResponse {
        bookings: bookings.into_iter().map(Into::into).collect(),
    }))
}

/// Apply a status transition (admin)
async fn update_booking_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<BookingResponse>> {
    let booking = services::update_status(&state.db, id, req.status).await?;
    Ok(Json(booking.into()))
}

/// Pricing preview with no persistence
async fn quote_estimate(
    State(state): State<AppState>,
    Query(query): Query<QuoteEstimateQuery>,
) -> Result<Json<QuoteEstimateResponse>> {
    let (service_name, estimated_price) = services::quote_estimate(
        &state.db,
        &state.cache,
        query.service_id,
        query.square_meters,
    )
    .await?;

    Ok(Json(QuoteEstimateResponse {
        service_id: query.service_id,
        service_name,
        square_meters: query.square_meters,
        estimated_price,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/guest/booking", post(create_guest_booking))
        .route("/quote/estimate", get(quote_estimate))
        .route("/admin/bookings", get(list_bookings))
        .route("/admin/bookings/:id", put(update_booking_status))
}
