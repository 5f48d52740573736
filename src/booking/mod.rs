//! Booking lifecycle manager.
//!
//! Owns booking creation, pricing at creation time, and status transitions.
//! Bookings are never deleted; cancellation is a terminal status.

pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;
pub mod status;

pub use models::{Booking, BookingFilter};
pub use routes::router;
pub use status::BookingStatus;
