//! HTTP adapter for provider availability.
//!
//! - `GET /api/providers/{id}/availability?date=YYYY-MM-DD` - public slot list

pub mod dto;
mod routes;

pub use routes::routes;
