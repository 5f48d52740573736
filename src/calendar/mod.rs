//! Schedule aggregation over bookings.
//!
//! Events are bucketed by calendar date only. The stored `scheduled_date`
//! and `scheduled_time` are combined into display instants at read time,
//! so a booking on a given date sorts under that date in every timezone.

pub mod models;
pub mod queries;
pub mod responses;
pub mod routes;
pub mod services;

pub use routes::router;
