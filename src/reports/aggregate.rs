use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::models::{ReportBooking, ReportInvoice};
use crate::error::Result;
use crate::invoicing::{derive_status, InvoiceStatus};
use crate::pricing::round_money;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevenueSummary {
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub pending: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub overdue: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_collected: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub average_invoice: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub collection_rate: Decimal,
    pub paid_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceStats {
    pub count: usize,
    #[serde(with = "rust_decimal::serde::str")]
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientStats {
    pub booking_count: usize,
    #[serde(with = "rust_decimal::serde::str")]
    pub revenue: Decimal,
    pub last_service_date: NaiveDate,
}

/// Revenue figures over invoices, using the derived status as of the
/// given date. `total` and `tax_collected` cover paid invoices;
/// `collection_rate` is paid over everything invoiced except cancelled,
/// as a percentage.
pub fn revenue_summary(invoices: &[ReportInvoice], as_of: NaiveDate) -> Result<RevenueSummary> {
    let mut total = Decimal::ZERO;
    let mut pending = Decimal::ZERO;
    let mut overdue = Decimal::ZERO;
    let mut tax_collected = Decimal::ZERO;
    let mut invoiced = Decimal::ZERO;
    let mut paid_count = 0usize;

    for invoice in invoices {
        let stored = InvoiceStatus::parse(&invoice.status)?;
        match derive_status(stored, invoice.due_date, as_of) {
            InvoiceStatus::Paid => {
                total += invoice.total_amount;
                tax_collected += invoice.tax_amount;
                invoiced += invoice.total_amount;
                paid_count += 1;
            }
            InvoiceStatus::Pending => {
                pending += invoice.total_amount;
                invoiced += invoice.total_amount;
            }
            InvoiceStatus::Overdue => {
                overdue += invoice.total_amount;
                invoiced += invoice.total_amount;
            }
            InvoiceStatus::Cancelled => {}
        }
    }

    let average_invoice = if paid_count == 0 {
        Decimal::ZERO
    } else {
        round_money(total / Decimal::from(paid_count), 2)
    };
    let collection_rate = if invoiced.is_zero() {
        Decimal::ZERO
    } else {
        round_money(total / invoiced * Decimal::from(100), 2)
    };

    Ok(RevenueSummary {
        total,
        pending,
        overdue,
        tax_collected,
        average_invoice,
        collection_rate,
        paid_count,
    })
}

/// Bookings grouped by service name. Every booking counts regardless of
/// status; revenue is the sum of booking totals.
pub fn service_stats(bookings: &[ReportBooking]) -> BTreeMap<String, ServiceStats> {
    let mut stats: BTreeMap<String, ServiceStats> = BTreeMap::new();
    for booking in bookings {
        let entry = stats
            .entry(booking.service_name.clone())
            .or_insert(ServiceStats {
                count: 0,
                revenue: Decimal::ZERO,
            });
        entry.count += 1;
        entry.revenue += booking.total_price;
    }
    stats
}

/// Bookings grouped by customer name, with the most recent service date.
pub fn client_stats(bookings: &[ReportBooking]) -> BTreeMap<String, ClientStats> {
    let mut stats: BTreeMap<String, ClientStats> = BTreeMap::new();
    for booking in bookings {
        match stats.entry(booking.customer_name.clone()) {
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(ClientStats {
                    booking_count: 1,
                    revenue: booking.total_price,
                    last_service_date: booking.scheduled_date,
                });
            }
            std::collections::btree_map::Entry::Occupied(mut slot) => {
                let entry = slot.get_mut();
                entry.booking_count += 1;
                entry.revenue += booking.total_price;
                entry.last_service_date = entry.last_service_date.max(booking.scheduled_date);
            }
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn invoice(status: &str, due: NaiveDate, tax: Decimal, total: Decimal) -> ReportInvoice {
        ReportInvoice {
            status: status.into(),
            due_date: due,
            tax_amount: tax,
            total_amount: total,
        }
    }

    fn booking(customer: &str, service: &str, day: NaiveDate, price: Decimal) -> ReportBooking {
        ReportBooking {
            customer_name: customer.into(),
            service_name: service.into(),
            status: "completed".into(),
            scheduled_date: day,
            total_price: price,
        }
    }

    #[test]
    fn revenue_matches_hand_computed_sums() {
        let as_of = date(2026, 9, 15);
        let invoices = vec![
            invoice("paid", date(2026, 9, 30), dec!(10.50), dec!(160.50)),
            invoice("paid", date(2026, 9, 30), dec!(7.00), dec!(107.00)),
            invoice("pending", date(2026, 9, 30), dec!(3.50), dec!(53.50)),
            invoice("pending", date(2026, 9, 1), dec!(14.00), dec!(214.00)),
            invoice("cancelled", date(2026, 9, 30), dec!(70.00), dec!(1070.00)),
        ];
        let summary = revenue_summary(&invoices, as_of).unwrap();
        assert_eq!(summary.total, dec!(267.50));
        assert_eq!(summary.tax_collected, dec!(17.50));
        assert_eq!(summary.pending, dec!(53.50));
        // The invoice due 2026-09-01 is overdue as of the 15th.
        assert_eq!(summary.overdue, dec!(214.00));
        assert_eq!(summary.paid_count, 2);
        assert_eq!(summary.average_invoice, dec!(133.75));
        // 267.50 paid of 535.00 invoiced, cancelled excluded.
        assert_eq!(summary.collection_rate, dec!(50.00));
    }

    #[test]
    fn empty_report_divides_nothing() {
        let summary = revenue_summary(&[], date(2026, 9, 15)).unwrap();
        assert_eq!(summary.total, Decimal::ZERO);
        assert_eq!(summary.average_invoice, Decimal::ZERO);
        assert_eq!(summary.collection_rate, Decimal::ZERO);
    }

    #[test]
    fn service_stats_group_and_sum() {
        let d = date(2026, 9, 3);
        let bookings = vec![
            booking("Ana", "Deep Clean", d, dec!(150.00)),
            booking("Roberto", "Deep Clean", d, dec!(300.00)),
            booking("Ana", "Standard Clean", d, dec!(90.00)),
        ];
        let stats = service_stats(&bookings);
        assert_eq!(stats["Deep Clean"].count, 2);
        assert_eq!(stats["Deep Clean"].revenue, dec!(450.00));
        assert_eq!(stats["Standard Clean"].count, 1);
    }

    #[test]
    fn client_stats_track_latest_service_date() {
        let bookings = vec![
            booking("Ana", "Deep Clean", date(2026, 9, 3), dec!(150.00)),
            booking("Ana", "Deep Clean", date(2026, 9, 20), dec!(150.00)),
            booking("Ana", "Standard Clean", date(2026, 9, 10), dec!(90.00)),
        ];
        let stats = client_stats(&bookings);
        let ana = &stats["Ana"];
        assert_eq!(ana.booking_count, 3);
        assert_eq!(ana.revenue, dec!(390.00));
        assert_eq!(ana.last_service_date, date(2026, 9, 20));
    }

    #[test]
    fn per_service_revenue_totals_match_overall_booking_revenue() {
        let d = date(2026, 9, 3);
        let bookings = vec![
            booking("Ana", "Deep Clean", d, dec!(150.00)),
            booking("Roberto", "Standard Clean", d, dec!(90.00)),
            booking("Carla", "Deep Clean", d, dec!(210.00)),
        ];
        let by_service: Decimal = service_stats(&bookings).values().map(|s| s.revenue).sum();
        let by_client: Decimal = client_stats(&bookings).values().map(|c| c.revenue).sum();
        let overall: Decimal = bookings.iter().map(|b| b.total_price).sum();
        assert_eq!(by_service, overall);
        assert_eq!(by_client, overall);
    }
}
