//! Response DTOs for booking API endpoints.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::models::Booking;

/// A booking as returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct BookingResponse {
    pub id: i64,
    pub service_id: i64,
    pub service_name: String,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub address: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub square_meters: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_ref: Option<i64>,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    pub is_guest_booking: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            service_id: b.service_id,
            service_name: b.service_name,
            scheduled_date: b.scheduled_date,
            scheduled_time: b.scheduled_time,
            address: b.address,
            square_meters: b.square_meters,
            special_instructions: b.special_instructions,
            total_price: b.total_price,
            status: b.status,
            invoice_id: b.invoice_id,
            customer_ref: b.customer_ref,
            customer_name: b.customer_name,
            customer_email: b.customer_email,
            customer_phone: b.customer_phone,
            is_guest_booking: b.is_guest,
            billing_address: b.billing_address,
            created_at: b.created_at,
        }
    }
}

/// Listing wrapper
#[derive(Debug, Serialize)]
pub struct BookingListResponse {
    pub bookings: Vec<BookingResponse>,
}

/// Pricing preview for the quote estimate endpoint
#[derive(Debug, Serialize)]
pub struct QuoteEstimateResponse {
    pub service_id: i64,
    pub service_name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub square_meters: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub estimated_price: Decimal,
}
