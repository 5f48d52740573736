use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Booking slice the calendar works with, joined with the service for
/// its name and duration.
#[derive(Debug, Clone, FromRow)]
pub struct CalendarBooking {
    pub id: i64,
    pub customer_name: String,
    pub service_name: String,
    pub status: String,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub duration_hours: Decimal,
    pub total_price: Decimal,
    pub address: String,
}
