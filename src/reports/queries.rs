use chrono::NaiveDate;
use sqlx::PgPool;

use super::models::{ReportBooking, ReportInvoice};
use crate::error::Result;

/// Bookings in the scheduled-date range, optionally narrowed to clients
/// whose name matches the filter (case-insensitive substring).
pub async fn bookings_for_report(
    pool: &PgPool,
    start: NaiveDate,
    end: NaiveDate,
    client: Option<&str>,
) -> Result<Vec<ReportBooking>> {
    let bookings = sqlx::query_as::<_, ReportBooking>(
        r#"
        SELECT b.customer_name, s.name AS service_name, b.status,
               b.scheduled_date, b.total_price
        FROM bookings b
        JOIN services s ON s.id = b.service_id
        WHERE b.scheduled_date >= $1 AND b.scheduled_date <= $2
          AND ($3::text IS NULL OR b.customer_name ILIKE '%' || $3 || '%')
        ORDER BY b.scheduled_date, b.id
        "#,
    )
    .bind(start)
    .bind(end)
    .bind(client)
    .fetch_all(pool)
    .await?;
    Ok(bookings)
}

/// Invoices whose service date falls in the range, same client narrowing.
pub async fn invoices_for_report(
    pool: &PgPool,
    start: NaiveDate,
    end: NaiveDate,
    client: Option<&str>,
) -> Result<Vec<ReportInvoice>> {
    let invoices = sqlx::query_as::<_, ReportInvoice>(
        r#"
        SELECT i.status, i.due_date, i.tax_amount, i.total_amount
        FROM invoices i
        WHERE i.service_date >= $1 AND i.service_date <= $2
          AND ($3::text IS NULL OR i.customer_name ILIKE '%' || $3 || '%')
        ORDER BY i.service_date, i.id
        "#,
    )
    .bind(start)
    .bind(end)
    .bind(client)
    .fetch_all(pool)
    .await?;
    Ok(invoices)
}
