//! Invoice generator and tax calculator.
//!
//! Invoices are produced from completed bookings (at most one per booking,
//! enforced atomically) or created directly from tax-inclusive custom input.
//! Monetary math lives in `crate::pricing` so reports reproduce it exactly.

pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

pub use models::{derive_status, Invoice, InvoiceStatus};
pub use routes::router;
