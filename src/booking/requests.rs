//! Request DTOs for booking API endpoints.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::status::BookingStatus;

/// Request to create a booking for a registered member.
///
/// The contact snapshot accompanies the member reference so invoices and
/// reports carry a customer name without consulting the external account
/// system again.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub service_id: i64,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub address: String,
    pub square_meters: Decimal,
    #[serde(default)]
    pub special_instructions: Option<String>,
    pub customer_ref: i64,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
}

/// Request to create a guest booking; requires full contact and billing info
#[derive(Debug, Deserialize)]
pub struct GuestBookingRequest {
    pub service_id: i64,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub address: String,
    pub square_meters: Decimal,
    #[serde(default)]
    pub special_instructions: Option<String>,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub billing_address: String,
    pub billing_city: String,
    pub billing_state: String,
    pub billing_zip_code: String,
    #[serde(default)]
    pub billing_country: Option<String>,
}

impl GuestBookingRequest {
    /// Collapse the billing fields into the single stored billing address line
    pub fn billing_address_line(&self) -> String {
        let country = self
            .billing_country
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or("United States");
        format!(
            "{}, {}, {} {}, {}",
            self.billing_address.trim(),
            self.billing_city.trim(),
            self.billing_state.trim(),
            self.billing_zip_code.trim(),
            country
        )
    }
}

/// Body for the admin status transition endpoint
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: BookingStatus,
}

/// Query parameters for the admin booking listing
#[derive(Debug, Deserialize, Default)]
pub struct ListBookingsQuery {
    #[serde(default)]
    pub status: Option<BookingStatus>,
    #[serde(default)]
    pub recent: Option<bool>,
}

/// Query parameters for the quote estimate endpoint
#[derive(Debug, Deserialize)]
pub struct QuoteEstimateQuery {
    pub service_id: i64,
    pub square_meters: Decimal,
}
