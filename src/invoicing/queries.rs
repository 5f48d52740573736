use sqlx::PgPool;

use super::models::Invoice;
use crate::error::{AppError, Result};

pub async fn get_invoice(pool: &PgPool, id: i64) -> Result<Invoice> {
    sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound)
}

/// All invoices, newest first. Status filtering happens on the derived
/// view in the service layer so `overdue` means the same thing here as
/// everywhere else.
pub async fn list_invoices(pool: &PgPool) -> Result<Vec<Invoice>> {
    let invoices = sqlx::query_as::<_, Invoice>(
        "SELECT * FROM invoices ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(invoices)
}
