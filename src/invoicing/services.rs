use chrono::{Datelike, Days, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use super::models::Invoice;
use super::queries;
use super::requests::{CustomInvoiceRequest, ListInvoicesQuery, MarkPaidRequest};
use crate::booking::BookingStatus;
use crate::error::{AppError, Result};
use crate::pricing::{self, TaxBreakdown, DEFAULT_DUE_DAYS};

const MAX_DUE_DAYS: u32 = 365;

/// Whether a booking may have an invoice generated for it.
///
/// The existing-invoice check comes first: a repeat call on an already
/// invoiced booking reports `Conflict` regardless of status, so callers
/// can treat it as a benign duplicate rather than an eligibility failure.
/// Uninvoiced bookings must be `completed`, anything else is `NotEligible`.
pub fn check_invoiceable(booking_id: i64, status: &str, invoice_id: Option<i64>) -> Result<()> {
    if invoice_id.is_some() {
        return Err(AppError::Conflict(format!(
            "invoice already exists for booking {booking_id}"
        )));
    }

    let status = BookingStatus::parse(status)?;
    if status != BookingStatus::Completed {
        return Err(AppError::NotEligible(format!(
            "booking {booking_id} is '{}', only completed bookings can be invoiced",
            status.as_str()
        )));
    }

    Ok(())
}

/// Booking snapshot taken inside the generation transaction. The row is
/// locked so two concurrent generation calls for the same booking
/// serialize; the unique index on `invoices.booking_id` is the backstop.
#[derive(Debug, FromRow)]
struct BookingSnapshot {
    id: i64,
    status: String,
    invoice_id: Option<i64>,
    total_price: Decimal,
    square_meters: Decimal,
    scheduled_date: NaiveDate,
    scheduled_time: NaiveTime,
    address: String,
    billing_address: Option<String>,
    customer_name: String,
    customer_email: String,
    customer_phone: Option<String>,
    service_name: String,
    service_duration: Decimal,
}

/// Generate the invoice for a completed booking. At most one invoice can
/// ever exist per booking; a repeat call yields a conflict, never a
/// duplicate.
pub async fn generate_from_booking(pool: &PgPool, booking_id: i64) -> Result<Invoice> {
    let mut tx = pool.begin().await?;

    let booking = sqlx::query_as::<_, BookingSnapshot>(
        r#"
        SELECT b.id, b.status, b.invoice_id, b.total_price, b.square_meters,
               b.scheduled_date, b.scheduled_time, b.address, b.billing_address,
               b.customer_name, b.customer_email, b.customer_phone,
               s.name AS service_name, s.duration_hours AS service_duration
        FROM bookings b
        JOIN services s ON s.id = b.service_id
        WHERE b.id = $1
        FOR UPDATE OF b
        "#,
    )
    .bind(booking_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(AppError::NotFound)?;

    check_invoiceable(booking_id, &booking.status, booking.invoice_id)?;

    let breakdown = pricing::forward_tax(booking.total_price, false);
    let today = Utc::now().date_naive();
    let due_date = add_due_days(today, DEFAULT_DUE_DAYS);
    let invoice_number = next_invoice_number(&mut tx, today).await?;
    let billing_address = booking
        .billing_address
        .clone()
        .unwrap_or_else(|| booking.address.clone());

    let invoice_id = insert_invoice(
        &mut tx,
        NewInvoice {
            invoice_number: &invoice_number,
            booking_id: Some(booking.id),
            breakdown: &breakdown,
            tax_exempt: false,
            tax_exempt_reason: None,
            customer_name: &booking.customer_name,
            customer_email: &booking.customer_email,
            customer_phone: booking.customer_phone.as_deref(),
            service_name: &booking.service_name,
            service_date: booking.scheduled_date,
            service_time: Some(booking.scheduled_time),
            service_duration: Some(booking.service_duration),
            square_meters: Some(booking.square_meters),
            service_address: &booking.address,
            billing_address: &billing_address,
            due_date,
            notes: None,
        },
    )
    .await?;

    sqlx::query("UPDATE bookings SET invoice_id = $1, updated_at = NOW() WHERE id = $2")
        .bind(invoice_id)
        .bind(booking.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(
        invoice_id,
        booking_id,
        invoice_number = %invoice_number,
        total = %breakdown.total_amount,
        "invoice generated from booking"
    );

    queries::get_invoice(pool, invoice_id).await
}

/// Create an invoice with no backing booking from tax-inclusive input.
pub async fn generate_custom(pool: &PgPool, req: &CustomInvoiceRequest) -> Result<Invoice> {
    validate_custom(req)?;

    let breakdown = pricing::reverse_tax(req.total_amount, req.tax_exempt);
    let today = Utc::now().date_naive();
    let due_days = req.due_days.unwrap_or(DEFAULT_DUE_DAYS);
    let due_date = add_due_days(today, due_days);
    let billing_address = req
        .billing_address
        .clone()
        .unwrap_or_else(|| req.service_address.clone());

    let mut tx = pool.begin().await?;
    let invoice_number = next_invoice_number(&mut tx, today).await?;
    let invoice_id = insert_invoice(
        &mut tx,
        NewInvoice {
            invoice_number: &invoice_number,
            booking_id: None,
            breakdown: &breakdown,
            tax_exempt: req.tax_exempt,
            tax_exempt_reason: req.tax_exempt_reason.as_deref(),
            customer_name: &req.customer_name,
            customer_email: &req.customer_email,
            customer_phone: req.customer_phone.as_deref(),
            service_name: &req.service_name,
            service_date: req.service_date,
            service_time: req.service_time,
            service_duration: None,
            square_meters: None,
            service_address: &req.service_address,
            billing_address: &billing_address,
            due_date,
            notes: req.notes.as_deref(),
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        invoice_id,
        invoice_number = %invoice_number,
        total = %breakdown.total_amount,
        "custom invoice created"
    );

    queries::get_invoice(pool, invoice_id).await
}

/// Record payment on a pending invoice. The status guard runs in SQL, so
/// a lost race reads back the winner's state instead of double-paying.
pub async fn mark_paid(pool: &PgPool, id: i64, req: &MarkPaidRequest) -> Result<Invoice> {
    if req.payment_method.trim().is_empty() {
        return Err(AppError::Validation("payment_method is required".into()));
    }

    let result = sqlx::query(
        r#"
        UPDATE invoices
        SET status = 'paid', payment_method = $2, payment_reference = $3,
            payment_date = NOW(), updated_at = NOW()
        WHERE id = $1 AND status = 'pending'
        "#,
    )
    .bind(id)
    .bind(req.payment_method.trim())
    .bind(req.payment_reference.as_deref())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        let invoice = queries::get_invoice(pool, id).await?;
        return Err(AppError::InvalidTransition(format!(
            "invoice {id} is '{}', only pending invoices can be marked paid",
            invoice.status
        )));
    }

    tracing::info!(invoice_id = id, method = %req.payment_method.trim(), "invoice marked paid");
    queries::get_invoice(pool, id).await
}

/// List invoices, filtering on the derived status so `overdue` selects
/// pending invoices past their due date as of today.
pub async fn list_invoices(pool: &PgPool, query: &ListInvoicesQuery) -> Result<Vec<Invoice>> {
    let invoices = queries::list_invoices(pool).await?;
    match query.status {
        None => Ok(invoices),
        Some(wanted) => {
            let today = Utc::now().date_naive();
            let mut matched = Vec::new();
            for invoice in invoices {
                if invoice.display_status(today)? == wanted {
                    matched.push(invoice);
                }
            }
            Ok(matched)
        }
    }
}

struct NewInvoice<'a> {
    invoice_number: &'a str,
    booking_id: Option<i64>,
    breakdown: &'a TaxBreakdown,
    tax_exempt: bool,
    tax_exempt_reason: Option<&'a str>,
    customer_name: &'a str,
    customer_email: &'a str,
    customer_phone: Option<&'a str>,
    service_name: &'a str,
    service_date: NaiveDate,
    service_time: Option<NaiveTime>,
    service_duration: Option<Decimal>,
    square_meters: Option<Decimal>,
    service_address: &'a str,
    billing_address: &'a str,
    due_date: NaiveDate,
    notes: Option<&'a str>,
}

async fn insert_invoice(
    tx: &mut Transaction<'_, Postgres>,
    invoice: NewInvoice<'_>,
) -> Result<i64> {
    let tax_rate = if invoice.tax_exempt {
        Decimal::ZERO
    } else {
        pricing::TAX_RATE
    };

    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO invoices (
            invoice_number, booking_id, status,
            subtotal, tax_rate, tax_amount, total_amount,
            tax_exempt, tax_exempt_reason,
            customer_name, customer_email, customer_phone,
            service_name, service_date, service_time,
            service_duration, square_meters,
            service_address, billing_address,
            due_date, notes
        )
        VALUES ($1, $2, 'pending', $3, $4, $5, $6, $7, $8, $9, $10, $11,
                $12, $13, $14, $15, $16, $17, $18, $19, $20)
        RETURNING id
        "#,
    )
    .bind(invoice.invoice_number)
    .bind(invoice.booking_id)
    .bind(invoice.breakdown.subtotal)
    .bind(tax_rate)
    .bind(invoice.breakdown.tax_amount)
    .bind(invoice.breakdown.total_amount)
    .bind(invoice.tax_exempt)
    .bind(invoice.tax_exempt_reason)
    .bind(invoice.customer_name)
    .bind(invoice.customer_email)
    .bind(invoice.customer_phone)
    .bind(invoice.service_name)
    .bind(invoice.service_date)
    .bind(invoice.service_time)
    .bind(invoice.service_duration)
    .bind(invoice.square_meters)
    .bind(invoice.service_address)
    .bind(invoice.billing_address)
    .bind(invoice.due_date)
    .bind(invoice.notes)
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict(
            match invoice.booking_id {
                Some(bid) => format!("invoice already exists for booking {bid}"),
                None => "invoice number collision, retry".into(),
            },
        ),
        _ => AppError::Database(e),
    })?;

    Ok(id)
}

/// Next number from the per-database sequence, formatted with the
/// issuing year. Numbers are monotonic; gaps from rolled-back
/// transactions are acceptable.
async fn next_invoice_number(
    tx: &mut Transaction<'_, Postgres>,
    today: NaiveDate,
) -> Result<String> {
    let (seq,): (i64,) = sqlx::query_as("SELECT nextval('invoice_number_seq')")
        .fetch_one(&mut **tx)
        .await?;
    Ok(format!("INV-{}-{:05}", today.year(), seq))
}

fn add_due_days(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(today)
}

fn validate_custom(req: &CustomInvoiceRequest) -> Result<()> {
    if req.customer_name.trim().is_empty() {
        return Err(AppError::Validation("customer_name is required".into()));
    }
    if req.customer_email.trim().is_empty() {
        return Err(AppError::Validation("customer_email is required".into()));
    }
    if req.service_name.trim().is_empty() {
        return Err(AppError::Validation("service_name is required".into()));
    }
    if req.service_address.trim().is_empty() {
        return Err(AppError::Validation("service_address is required".into()));
    }
    if req.total_amount <= Decimal::ZERO {
        return Err(AppError::Validation(
            "total_amount must be greater than zero".into(),
        ));
    }
    if req.tax_exempt
        && req
            .tax_exempt_reason
            .as_deref()
            .map_or(true, |r| r.trim().is_empty())
    {
        return Err(AppError::Validation(
            "tax_exempt_reason is required for tax-exempt invoices".into(),
        ));
    }
    if let Some(days) = req.due_days {
        if days == 0 || days > MAX_DUE_DAYS {
            return Err(AppError::Validation(format!(
                "due_days must be between 1 and {MAX_DUE_DAYS}"
            )));
        }
    }
    Ok(())
}
