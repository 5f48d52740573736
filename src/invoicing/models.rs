use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::{AppError, Result};

/// Stored invoice lifecycle states.
///
/// `Overdue` never occurs as a stored value. It is derived from a pending
/// invoice's due date at read time via [`display_status`], so an invoice
/// that is paid late needs no corrective write.
///
/// [`display_status`]: Invoice::display_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            "overdue" => Ok(InvoiceStatus::Overdue),
            "cancelled" => Ok(InvoiceStatus::Cancelled),
            other => Err(AppError::Validation(format!(
                "unknown invoice status '{other}'"
            ))),
        }
    }
}

/// Effective status rule shared by invoice listings and reports. A
/// pending invoice past its due date reads as overdue; the due date
/// itself is still on time.
pub fn derive_status(stored: InvoiceStatus, due_date: NaiveDate, as_of: NaiveDate) -> InvoiceStatus {
    if stored == InvoiceStatus::Pending && as_of > due_date {
        InvoiceStatus::Overdue
    } else {
        stored
    }
}

/// Invoice row joined with nothing; all customer and service fields are
/// snapshotted at generation time so later edits to bookings or services
/// cannot rewrite issued invoices.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invoice {
    pub id: i64,
    pub invoice_number: String,
    pub booking_id: Option<i64>,
    pub status: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_amount: Decimal,
    pub tax_exempt: bool,
    pub tax_exempt_reason: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub service_name: String,
    pub service_date: NaiveDate,
    pub service_time: Option<NaiveTime>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub service_duration: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub square_meters: Option<Decimal>,
    pub service_address: String,
    pub billing_address: String,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
    pub payment_method: Option<String>,
    pub payment_reference: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    pub fn stored_status(&self) -> Result<InvoiceStatus> {
        InvoiceStatus::parse(&self.status)
    }

    /// Effective status as of a given date. Paid and cancelled invoices
    /// are unaffected by the clock.
    pub fn display_status(&self, as_of: NaiveDate) -> Result<InvoiceStatus> {
        Ok(derive_status(self.stored_status()?, self.due_date, as_of))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn invoice(status: &str, due_date: NaiveDate) -> Invoice {
        Invoice {
            id: 1,
            invoice_number: "INV-2026-00001".into(),
            booking_id: Some(7),
            status: status.into(),
            subtotal: dec!(150.00),
            tax_rate: dec!(0.07),
            tax_amount: dec!(10.50),
            total_amount: dec!(160.50),
            tax_exempt: false,
            tax_exempt_reason: None,
            customer_name: "Ana Cliente".into(),
            customer_email: "ana@example.com".into(),
            customer_phone: None,
            service_name: "Deep Clean".into(),
            service_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            service_time: None,
            service_duration: Some(dec!(4.00)),
            square_meters: Some(dec!(100)),
            service_address: "12 Palm Ave".into(),
            billing_address: "12 Palm Ave".into(),
            due_date,
            notes: None,
            payment_method: None,
            payment_reference: None,
            payment_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn pending_before_due_date_stays_pending() {
        let inv = invoice("pending", date(2026, 10, 1));
        assert_eq!(
            inv.display_status(date(2026, 9, 15)).unwrap(),
            InvoiceStatus::Pending
        );
    }

    #[test]
    fn due_date_itself_is_not_overdue() {
        let inv = invoice("pending", date(2026, 10, 1));
        assert_eq!(
            inv.display_status(date(2026, 10, 1)).unwrap(),
            InvoiceStatus::Pending
        );
    }

    #[test]
    fn day_after_due_date_is_overdue() {
        let inv = invoice("pending", date(2026, 10, 1));
        assert_eq!(
            inv.display_status(date(2026, 10, 2)).unwrap(),
            InvoiceStatus::Overdue
        );
    }

    #[test]
    fn paid_invoice_never_goes_overdue() {
        let inv = invoice("paid", date(2026, 10, 1));
        assert_eq!(
            inv.display_status(date(2027, 1, 1)).unwrap(),
            InvoiceStatus::Paid
        );
    }

    #[test]
    fn cancelled_invoice_never_goes_overdue() {
        let inv = invoice("cancelled", date(2026, 10, 1));
        assert_eq!(
            inv.display_status(date(2027, 1, 1)).unwrap(),
            InvoiceStatus::Cancelled
        );
    }

    #[test]
    fn status_parse_round_trips() {
        for s in ["pending", "paid", "overdue", "cancelled"] {
            assert_eq!(InvoiceStatus::parse(s).unwrap().as_str(), s);
        }
        assert!(InvoiceStatus::parse("draft").is_err());
    }
}
