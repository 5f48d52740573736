//! Database models for bookings.
//!
//! These models use sqlx's FromRow derive for direct database deserialization.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use super::status::BookingStatus;
use crate::error::Result;

/// Booking row joined with its service name
#[derive(Debug, Clone, FromRow)]
pub struct Booking {
    pub id: i64,
    pub service_id: i64,
    pub service_name: String,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub address: String,
    pub square_meters: Decimal,
    pub special_instructions: Option<String>,
    pub total_price: Decimal,
    pub status: String,
    pub invoice_id: Option<i64>,
    pub customer_ref: Option<i64>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub is_guest: bool,
    pub billing_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Stored status as the state-machine type
    pub fn status(&self) -> Result<BookingStatus> {
        BookingStatus::parse(&self.status)
    }
}

/// Explicit filter for booking listings.
///
/// Enumerated fields rather than a free-form map: status and a
/// created-in-the-last-24-hours window are the only supported filters.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub recent: bool,
}
