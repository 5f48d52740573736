use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::models::{Invoice, InvoiceStatus};
use crate::error::Result;

/// Invoice as presented over the API. `status` is the derived view, so a
/// pending invoice past its due date serializes as `overdue` without a
/// stored-state change.
#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub id: i64,
    pub invoice_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<i64>,
    pub status: InvoiceStatus,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_amount: Decimal,
    pub tax_exempt: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_exempt_reason: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    pub service_name: String,
    pub service_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_time: Option<NaiveTime>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_duration: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub square_meters: Option<Decimal>,
    pub service_address: String,
    pub billing_address: String,
    pub due_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl InvoiceResponse {
    pub fn from_invoice(invoice: Invoice, as_of: NaiveDate) -> Result<Self> {
        let status = invoice.display_status(as_of)?;
        Ok(Self {
            id: invoice.id,
            invoice_number: invoice.invoice_number,
            booking_id: invoice.booking_id,
            status,
            subtotal: invoice.subtotal,
            tax_rate: invoice.tax_rate,
            tax_amount: invoice.tax_amount,
            total_amount: invoice.total_amount,
            tax_exempt: invoice.tax_exempt,
            tax_exempt_reason: invoice.tax_exempt_reason,
            customer_name: invoice.customer_name,
            customer_email: invoice.customer_email,
            customer_phone: invoice.customer_phone,
            service_name: invoice.service_name,
            service_date: invoice.service_date,
            service_time: invoice.service_time,
            service_duration: invoice.service_duration,
            square_meters: invoice.square_meters,
            service_address: invoice.service_address,
            billing_address: invoice.billing_address,
            due_date: invoice.due_date,
            notes: invoice.notes,
            payment_method: invoice.payment_method,
            payment_reference: invoice.payment_reference,
            payment_date: invoice.payment_date,
            created_at: invoice.created_at,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct InvoiceListResponse {
    pub invoices: Vec<InvoiceResponse>,
}

/// Acknowledgement for booking-backed generation. Clients fetch the full
/// document afterwards if they need it.
#[derive(Debug, Serialize)]
pub struct InvoiceCreatedResponse {
    pub invoice_id: i64,
    pub invoice_number: String,
}
