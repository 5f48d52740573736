use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ReportBooking {
    pub customer_name: String,
    pub service_name: String,
    pub status: String,
    pub scheduled_date: NaiveDate,
    pub total_price: Decimal,
}

#[derive(Debug, Clone, FromRow)]
pub struct ReportInvoice {
    pub status: String,
    pub due_date: NaiveDate,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
}
