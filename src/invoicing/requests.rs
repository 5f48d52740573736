use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::models::InvoiceStatus;

/// Custom invoice input. `total_amount` is tax inclusive; the subtotal
/// and tax portion are derived from it, so the amount the customer was
/// quoted is the amount that appears on the invoice.
#[derive(Debug, Deserialize)]
pub struct CustomInvoiceRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub service_name: String,
    pub service_date: NaiveDate,
    pub service_time: Option<NaiveTime>,
    pub service_address: String,
    pub billing_address: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_amount: Decimal,
    #[serde(default)]
    pub tax_exempt: bool,
    pub tax_exempt_reason: Option<String>,
    pub notes: Option<String>,
    pub due_days: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct MarkPaidRequest {
    pub payment_method: String,
    pub payment_reference: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListInvoicesQuery {
    pub status: Option<InvoiceStatus>,
}
