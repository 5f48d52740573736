use chrono::NaiveDate;
use sqlx::PgPool;

use super::models::CalendarBooking;
use crate::error::Result;

const CALENDAR_COLUMNS: &str = r#"
    b.id, b.customer_name, s.name AS service_name, b.status,
    b.scheduled_date, b.scheduled_time, s.duration_hours,
    b.total_price, b.address
"#;

/// Bookings scheduled within the inclusive date range. Comparison is on
/// the DATE column directly; no timestamps are involved.
pub async fn bookings_in_range(
    pool: &PgPool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<CalendarBooking>> {
    let sql = format!(
        r#"
        SELECT {CALENDAR_COLUMNS}
        FROM bookings b
        JOIN services s ON s.id = b.service_id
        WHERE b.scheduled_date >= $1 AND b.scheduled_date <= $2
        ORDER BY b.scheduled_date, b.scheduled_time, b.id
        "#
    );
    let bookings = sqlx::query_as::<_, CalendarBooking>(&sql)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;
    Ok(bookings)
}
