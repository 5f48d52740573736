//! Sales tax computation.
//!
//! Single flat jurisdiction rate (7% Florida sales tax: 6% state + 1% county
//! surtax). Forward computation starts from a known subtotal; reverse
//! computation starts from a tax-inclusive total, as entered on custom
//! invoices. The reverse path is a left-inverse of the forward path within
//! currency rounding.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::calculators::round_money;

/// Combined sales tax rate applied to non-exempt invoices.
pub const TAX_RATE: Decimal = dec!(0.07);

/// Net-30 payment terms.
pub const DEFAULT_DUE_DAYS: u32 = 30;

/// Subtotal, tax, and total for one invoice.
///
/// Invariant: `total_amount == subtotal + tax_amount`, and `tax_amount` is
/// zero whenever the invoice is tax exempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxBreakdown {
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_amount: Decimal,
}

/// Compute tax forward from a known subtotal.
pub fn forward_tax(subtotal: Decimal, tax_exempt: bool) -> TaxBreakdown {
    if tax_exempt {
        return TaxBreakdown {
            subtotal,
            tax_amount: Decimal::ZERO,
            total_amount: subtotal,
        };
    }

    let tax_amount = round_money(subtotal * TAX_RATE, 2);
    TaxBreakdown {
        subtotal,
        tax_amount,
        total_amount: subtotal + tax_amount,
    }
}

/// Derive subtotal and tax from a tax-inclusive total.
///
/// The caller-supplied total is kept unchanged; the subtotal is rounded and
/// the tax absorbs the rounding remainder, so the invariant
/// `total == subtotal + tax` holds exactly.
pub fn reverse_tax(total_inclusive: Decimal, tax_exempt: bool) -> TaxBreakdown {
    if tax_exempt {
        return TaxBreakdown {
            subtotal: total_inclusive,
            tax_amount: Decimal::ZERO,
            total_amount: total_inclusive,
        };
    }

    let subtotal = round_money(total_inclusive / (Decimal::ONE + TAX_RATE), 2);
    TaxBreakdown {
        subtotal,
        tax_amount: total_inclusive - subtotal,
        total_amount: total_inclusive,
    }
}
