//! Database queries for bookings.

use sqlx::PgPool;

use crate::error::{AppError, Result};

use super::models::{Booking, BookingFilter};
use super::status::BookingStatus;

const BOOKING_COLUMNS: &str = r#"
    b.id, b.service_id, s.name AS service_name,
    b.scheduled_date, b.scheduled_time, b.address, b.square_meters,
    b.special_instructions, b.total_price, b.status, b.invoice_id,
    b.customer_ref, b.customer_name, b.customer_email, b.customer_phone,
    b.is_guest, b.billing_address, b.created_at, b.updated_at
"#;

/// Get a booking by id
pub async fn get_booking(pool: &PgPool, id: i64) -> Result<Booking> {
    let query = format!(
        r#"
        SELECT {BOOKING_COLUMNS}
        FROM bookings b
        JOIN services s ON b.service_id = s.id
        WHERE b.id = $1
        "#
    );

    sqlx::query_as::<_, Booking>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound)
}

/// List bookings with the explicit filter, in stable insertion order
pub async fn list_bookings(pool: &PgPool, filter: BookingFilter) -> Result<Vec<Booking>> {
    let query = format!(
        r#"
        SELECT {BOOKING_COLUMNS}
        FROM bookings b
        JOIN services s ON b.service_id = s.id
        WHERE ($1::text IS NULL OR b.status = $1)
          AND ($2::bool = FALSE OR b.created_at >= NOW() - INTERVAL '24 hours')
        ORDER BY b.id
        "#
    );

    let bookings = sqlx::query_as::<_, Booking>(&query)
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.recent)
        .fetch_all(pool)
        .await?;

    Ok(bookings)
}

/// Insert parameters for a new booking
#[derive(Debug)]
pub struct InsertBooking<'a> {
    pub service_id: i64,
    pub scheduled_date: chrono::NaiveDate,
    pub scheduled_time: chrono::NaiveTime,
    pub address: &'a str,
    pub square_meters: rust_decimal::Decimal,
    pub special_instructions: Option<&'a str>,
    pub total_price: rust_decimal::Decimal,
    pub customer_ref: Option<i64>,
    pub customer_name: &'a str,
    pub customer_email: &'a str,
    pub customer_phone: Option<&'a str>,
    pub is_guest: bool,
    pub billing_address: Option<&'a str>,
}

/// Insert a new pending booking, returning its id
pub async fn insert_booking(pool: &PgPool, input: &InsertBooking<'_>) -> Result<i64> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO bookings (
            service_id, scheduled_date, scheduled_time, address, square_meters,
            special_instructions, total_price, status,
            customer_ref, customer_name, customer_email, customer_phone,
            is_guest, billing_address
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending', $8, $9, $10, $11, $12, $13)
        RETURNING id
        "#,
    )
    .bind(input.service_id)
    .bind(input.scheduled_date)
    .bind(input.scheduled_time)
    .bind(input.address)
    .bind(input.square_meters)
    .bind(input.special_instructions)
    .bind(input.total_price)
    .bind(input.customer_ref)
    .bind(input.customer_name)
    .bind(input.customer_email)
    .bind(input.customer_phone)
    .bind(input.is_guest)
    .bind(input.billing_address)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Apply a status transition guarded by the expected prior status.
///
/// The prior status sits in the WHERE clause so two concurrent transitions on
/// the same booking cannot both succeed. Returns the number of rows changed.
pub async fn update_status_guarded(
    pool: &PgPool,
    id: i64,
    from: BookingStatus,
    to: BookingStatus,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE bookings
        SET status = $3, updated_at = NOW()
        WHERE id = $1 AND status = $2
        "#,
    )
    .bind(id)
    .bind(from.as_str())
    .bind(to.as_str())
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
