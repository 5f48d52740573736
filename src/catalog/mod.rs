//! Service catalog: read-only reference data for offered cleaning services.
//!
//! The catalog is created and maintained by an external management process;
//! this application only reads it. Entries are cached aggressively.

pub mod models;
pub mod queries;
pub mod routes;

pub use models::Service;
pub use routes::router;
