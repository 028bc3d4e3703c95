//! HTTP adapter for review endpoints.
//!
//! - `POST /api/reviews` - submit a review for a completed appointment (client)

pub mod dto;
mod routes;

pub use routes::routes;
