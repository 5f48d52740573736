//! Reporting over bookings and invoices.
//!
//! Every report is recomputed from source rows on each request. Revenue
//! figures come from invoices using the same derived status view the
//! invoice endpoints serve, so the report never disagrees with a listing.

pub mod aggregate;
pub mod models;
pub mod queries;
pub mod routes;

pub use routes::router;
