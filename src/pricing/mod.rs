//! Shared pricing and tax math.
//!
//! Booking creation, the quote estimate endpoint, invoice generation, and the
//! reporting engine all go through these definitions, so a price or tax figure
//! computed anywhere in the system is reproducible everywhere else.

pub mod calculators;
pub mod tax;

// Re-export commonly used items
pub use calculators::{booking_total, round_money};
pub use tax::{forward_tax, reverse_tax, TaxBreakdown, DEFAULT_DUE_DAYS, TAX_RATE};
